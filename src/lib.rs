//! thetacheck - Correctness harness for stdin/stdout programs
//!
//! Runs a program against a directory of `<name>.in` / `<name>.out` pairs,
//! judges every answer and reports how many were correct, which failed and
//! which took longer than the overtime threshold.
//!
//! # Architecture
//!
//! - **Invoker**: runs the program under test (and the checker)
//! - **Test case source**: discovers, orders and loads cases
//! - **Evaluator**: exact, empty-means-any, numeric or checker comparison
//! - **Runner**: the sequential run loop and its statistics

pub mod config;
pub mod constants;
pub mod error;
pub mod evaluator;
pub mod invoker;
pub mod progress;
pub mod runner;
pub mod stats;
pub mod testcase;
pub mod utils;

// Re-export commonly used types
pub use config::{CaseSelection, Config, RunConfig, Verbosity};
pub use error::{ConfigError, HarnessError, HarnessResult};
pub use evaluator::ComparisonMode;
pub use invoker::{InvocationResult, Invoker, ShellInvoker};
pub use runner::Runner;
pub use stats::RunStatistics;
pub use testcase::{Ordering, TestCase, TestCaseSource};
