//! Error types and classification
//!
//! Every per-case failure is a [`HarnessError`]. The run loop recovers from
//! all of them locally; only [`ConfigError`]s abort a run, and they do so
//! before the first case is processed.

use std::path::PathBuf;

/// Broad class of an error, used to decide how the run loop books it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// The case could not be materialised; it leaves the pool
    Discovery,
    /// The subject program (or checker) could not be run
    Invocation,
    /// The output could not be judged
    Evaluation,
    /// The run itself is misconfigured
    Configuration,
}

/// Harness-wide error type
#[derive(Debug, thiserror::Error)]
pub enum HarnessError {
    // Discovery errors
    #[error("The input file for test {path} is empty")]
    EmptyInput { path: PathBuf },

    #[error("Missing out file for test {path}")]
    MissingExpected { path: PathBuf },

    #[error("Could not read {path}: {source}")]
    ReadCase {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Could not list test directory {path}: {source}")]
    ReadDirectory {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    // Invocation errors
    #[error("Failed to spawn `{command}`: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("I/O error while running `{command}`: {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },

    // Evaluation errors
    #[error("Cannot interpret {value:?} as a number")]
    NumericParse { value: String },

    #[error("Checker `{command}` could not be run: {reason}")]
    Checker { command: String, reason: String },

    // Configuration errors
    #[error(transparent)]
    Config(#[from] ConfigError),
}

impl HarnessError {
    /// Classify this error
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::EmptyInput { .. }
            | Self::MissingExpected { .. }
            | Self::ReadCase { .. }
            | Self::ReadDirectory { .. } => ErrorKind::Discovery,
            Self::Spawn { .. } | Self::Io { .. } => ErrorKind::Invocation,
            Self::NumericParse { .. } | Self::Checker { .. } => ErrorKind::Evaluation,
            Self::Config(_) => ErrorKind::Configuration,
        }
    }

    /// Get the error code for this error type
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::EmptyInput { .. } => "EMPTY_INPUT",
            Self::MissingExpected { .. } => "MISSING_EXPECTED",
            Self::ReadCase { .. } => "READ_CASE",
            Self::ReadDirectory { .. } => "READ_DIRECTORY",
            Self::Spawn { .. } => "SPAWN_FAILED",
            Self::Io { .. } => "INVOCATION_IO",
            Self::NumericParse { .. } => "NUMERIC_PARSE",
            Self::Checker { .. } => "CHECKER_FAILED",
            Self::Config(_) => "CONFIGURATION_ERROR",
        }
    }
}

/// Configuration loading and validation errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Invalid value for environment variable: {0}")]
    InvalidValue(String),

    #[error("Ambiguous --auto switch, found: {0} applications")]
    AmbiguousAuto(usize),

    #[error("app argument not provided, nor the --auto switch was enabled")]
    MissingApp,

    #[error("Could not scan {path} for applications: {source}")]
    AutoScan {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Result type alias using HarnessError
pub type HarnessResult<T> = Result<T, HarnessError>;
