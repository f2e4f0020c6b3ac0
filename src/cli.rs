//! Command-line surface
//!
//! Parses the flags and resolves them, together with the environment
//! defaults, into a [`RunConfig`].

use std::fs;
use std::path::{Path, PathBuf};

use clap::{ArgAction, ArgGroup, Parser};

use thetacheck::config::{CaseSelection, Config, RunConfig, Verbosity};
use thetacheck::error::ConfigError;
use thetacheck::evaluator::ComparisonMode;
use thetacheck::testcase::Ordering;

/// Given an app (-a/--app) and a test directory (-d/--dir) of <name>.in and
/// <name>.out files, reports statistics of the correctness of the app.
#[derive(Parser, Debug)]
#[command(name = "thetacheck")]
#[command(author, version, about, long_about = None)]
#[command(group(
    ArgGroup::new("ordering")
        .args(["shuffle", "sort_by_size", "natural_sort"])
        .multiple(false)
))]
#[command(group(ArgGroup::new("cases").args(["dir", "one_file"]).multiple(false)))]
pub struct Cli {
    /// The application used for testing (a shell command line)
    #[arg(short, long)]
    pub app: Option<String>,

    /// The application used for checking answers. It receives the input and
    /// the app's output as newline-separated text on stdin and must exit with
    /// status 0 if the answer is correct
    #[arg(short, long, conflicts_with = "result_dist")]
    pub checker: Option<String>,

    /// Print additional data during testing. Repeat it (-vv) for the extra
    /// verbose output: file names, input, expected and actual output
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,

    /// Same as -vv
    #[arg(long, alias = "extra_verbose", hide = true)]
    pub extra_verbose: bool,

    /// Interpret the output and expected output as one number and accept the
    /// result if it is within the given distance
    #[arg(short, long)]
    pub result_dist: Option<f64>,

    /// Only run the given number of tests
    #[arg(short, long)]
    pub limit: Option<usize>,

    /// Automatically locate the tests directory and app
    #[arg(short = 'x', long)]
    pub auto: bool,

    /// If the .out file is empty or missing the result is always counted as correct
    #[arg(short, long)]
    pub empty_means_any: bool,

    /// Print the time taken by the application
    #[arg(short, long)]
    pub timer: bool,

    /// Shuffle the tests randomly
    #[arg(short, long)]
    pub shuffle: bool,

    /// Sort the tests by input size
    #[arg(short = 'S', long)]
    pub sort_by_size: bool,

    /// Sort the tests using natural/human sorting (default)
    #[arg(short = 'N', long)]
    pub natural_sort: bool,

    /// The directory where the tests are to be found
    #[arg(short, long)]
    pub dir: Option<PathBuf>,

    /// Only run the program for one test (path without extension)
    #[arg(short, long)]
    pub one_file: Option<PathBuf>,
}

/// A resolved run plus an optional notice for the user
#[derive(Debug)]
pub struct Resolved {
    pub run: RunConfig,
    pub notice: Option<String>,
}

impl Cli {
    /// Resolve flags against the environment defaults
    pub fn resolve(self, config: &Config, cwd: &Path) -> Result<Resolved, ConfigError> {
        let mut app = self.app;
        let mut dir = self.dir;

        if self.auto && app.is_none() && dir.is_none() {
            app = Some(locate_app(cwd, &config.auto_extension)?);
            dir = Some(config.tests_dir.clone());
        }

        let app = app.ok_or(ConfigError::MissingApp)?;

        let mut notice = None;
        let selection = match (self.one_file, dir) {
            (Some(base), _) => CaseSelection::Single(base),
            (None, Some(dir)) => CaseSelection::Directory(dir),
            (None, None) => {
                notice = Some(format!(
                    "directory argument not provided{}. using cwd ({}/)",
                    if self.auto { "" } else { ", nor the --auto switch was enabled" },
                    config.tests_dir.display()
                ));
                CaseSelection::Directory(config.tests_dir.clone())
            }
        };

        let ordering = if self.shuffle {
            Ordering::Shuffled
        } else if self.sort_by_size {
            Ordering::BySize
        } else {
            Ordering::Natural
        };

        let run = RunConfig {
            app,
            selection,
            ordering,
            limit: self.limit,
            mode: ComparisonMode::select(self.result_dist, self.checker, self.empty_means_any),
            verbosity: Verbosity::from_count(if self.extra_verbose { 2 } else { self.verbose }),
            timer: self.timer,
            overtime_threshold: config.overtime_threshold,
        };

        Ok(Resolved { run, notice })
    }
}

/// Find the single file with extension `extension` in `dir`
pub fn locate_app(dir: &Path, extension: &str) -> Result<String, ConfigError> {
    let scan_error = |source: std::io::Error| ConfigError::AutoScan {
        path: dir.to_path_buf(),
        source,
    };

    let mut candidates = Vec::new();
    for entry in fs::read_dir(dir).map_err(scan_error)? {
        let path = entry.map_err(scan_error)?.path();
        if path.is_file() && path.extension().is_some_and(|ext| ext == extension) {
            candidates.push(path);
        }
    }

    match candidates.as_slice() {
        [only] => {
            let name = only
                .file_name()
                .map(|n| n.to_string_lossy().into_owned())
                .unwrap_or_default();
            Ok(format!(".{}{}", std::path::MAIN_SEPARATOR, name))
        }
        _ => Err(ConfigError::AmbiguousAuto(candidates.len())),
    }
}
