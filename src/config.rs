//! Application configuration management
//!
//! [`Config`] carries the environment-backed defaults and is loaded once at
//! startup. [`RunConfig`] is the fully resolved description of a single run,
//! built by the CLI from its flags and a [`Config`].

use std::env;
use std::path::PathBuf;
use std::time::Duration;

use crate::constants::{
    DEFAULT_AUTO_EXTENSION, DEFAULT_LOG_FILTER, DEFAULT_OVERTIME_MS, DEFAULT_TESTS_DIR,
};
use crate::error::ConfigError;
use crate::evaluator::ComparisonMode;
use crate::testcase::Ordering;

/// Environment-backed defaults
#[derive(Debug, Clone)]
pub struct Config {
    /// Tests directory used by `--auto` and when no directory is given
    pub tests_dir: PathBuf,
    /// Extension of the executable located by `--auto`
    pub auto_extension: String,
    /// Invocations slower than this count as overtime
    pub overtime_threshold: Duration,
    /// Whether a progress bar may be drawn on an interactive terminal
    pub progress: bool,
    /// Log filter for the tracing subscriber
    pub rust_log: String,
}

impl Config {
    /// Load configuration from environment variables
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let overtime_ms: u64 = env::var("THETACHECK_OVERTIME_MS")
            .unwrap_or_else(|_| DEFAULT_OVERTIME_MS.to_string())
            .parse()
            .map_err(|_| ConfigError::InvalidValue("THETACHECK_OVERTIME_MS".to_string()))?;

        Ok(Self {
            tests_dir: PathBuf::from(
                env::var("THETACHECK_TESTS_DIR").unwrap_or_else(|_| DEFAULT_TESTS_DIR.to_string()),
            ),
            auto_extension: env::var("THETACHECK_AUTO_EXTENSION")
                .unwrap_or_else(|_| DEFAULT_AUTO_EXTENSION.to_string()),
            overtime_threshold: Duration::from_millis(overtime_ms),
            progress: env::var("THETACHECK_PROGRESS")
                .unwrap_or_else(|_| "true".to_string())
                .parse()
                .map_err(|_| ConfigError::InvalidValue("THETACHECK_PROGRESS".to_string()))?,
            rust_log: env::var("RUST_LOG").unwrap_or_else(|_| DEFAULT_LOG_FILTER.to_string()),
        })
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            tests_dir: PathBuf::from(DEFAULT_TESTS_DIR),
            auto_extension: DEFAULT_AUTO_EXTENSION.to_string(),
            overtime_threshold: Duration::from_millis(DEFAULT_OVERTIME_MS),
            progress: true,
            rust_log: DEFAULT_LOG_FILTER.to_string(),
        }
    }
}

/// Where the cases of a run come from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CaseSelection {
    /// Every `<name>.in` in the directory
    Directory(PathBuf),
    /// A single case given by its path without extension
    Single(PathBuf),
}

/// How much the run loop prints per case
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub enum Verbosity {
    #[default]
    Quiet,
    Verbose,
    ExtraVerbose,
}

impl Verbosity {
    /// Map a repeated `-v` count to a level
    pub fn from_count(count: u8) -> Self {
        match count {
            0 => Verbosity::Quiet,
            1 => Verbosity::Verbose,
            _ => Verbosity::ExtraVerbose,
        }
    }

    pub fn is_verbose(self) -> bool {
        self >= Verbosity::Verbose
    }

    pub fn is_extra_verbose(self) -> bool {
        self == Verbosity::ExtraVerbose
    }
}

/// Fully resolved settings of one run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// Shell command line of the program under test
    pub app: String,
    pub selection: CaseSelection,
    pub ordering: Ordering,
    /// Only the first `limit` cases (after ordering) are run
    pub limit: Option<usize>,
    pub mode: ComparisonMode,
    pub verbosity: Verbosity,
    /// Print per-invocation timings
    pub timer: bool,
    pub overtime_threshold: Duration,
}

impl RunConfig {
    /// A run over `directory` with default settings
    pub fn new(app: impl Into<String>, selection: CaseSelection) -> Self {
        Self {
            app: app.into(),
            selection,
            ordering: Ordering::Natural,
            limit: None,
            mode: ComparisonMode::Exact,
            verbosity: Verbosity::Quiet,
            timer: false,
            overtime_threshold: Duration::from_millis(DEFAULT_OVERTIME_MS),
        }
    }
}
