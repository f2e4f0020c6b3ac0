//! Run statistics and the final report

use std::fmt;
use std::time::Duration;

use crate::constants::TIMING_REPORT_DIGITS;
use crate::utils::{format_float, format_percent, round_to};

/// Accumulated results of a run.
///
/// Only ever appended to while the run loop owns it; read once at the end.
/// `total == correct + failed.len()` holds at all times. Cases that raised an
/// invocation or evaluation error are listed in `errored` and are not part of
/// `total`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RunStatistics {
    /// Cases that were invoked and judged
    pub total: usize,
    pub correct: usize,
    pub overtime: usize,
    /// Names of incorrect cases, in run order
    pub failed: Vec<String>,
    /// Names of cases slower than the overtime threshold, in run order
    pub overtime_cases: Vec<String>,
    /// Wall-clock time of every successful invocation, in run order
    pub durations: Vec<Duration>,
    /// Names of cases whose invocation or evaluation raised an error
    pub errored: Vec<String>,
    /// The run stopped early on an interrupt
    pub interrupted: bool,
}

impl RunStatistics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Book a judged case
    pub fn record_outcome(&mut self, name: &str, correct: bool) {
        if correct {
            self.correct += 1;
        } else {
            self.failed.push(name.to_string());
        }
        self.total += 1;
    }

    /// Book an invocation time; returns whether the case went overtime
    pub fn record_timing(&mut self, name: &str, elapsed: Duration, threshold: Duration) -> bool {
        self.durations.push(elapsed);
        let overtime = elapsed > threshold;
        if overtime {
            self.overtime += 1;
            self.overtime_cases.push(name.to_string());
        }
        overtime
    }

    /// Book a case that raised an invocation or evaluation error
    pub fn record_error(&mut self, name: &str) {
        self.errored.push(name.to_string());
    }

    /// Whether any case was judged
    pub fn has_results(&self) -> bool {
        self.total > 0
    }

    /// Human-readable report of this run
    pub fn summary<'a>(&'a self, app: &'a str, show_times: bool) -> Summary<'a> {
        Summary {
            stats: self,
            app,
            show_times,
        }
    }
}

/// Final report printed after a completed or interrupted run
pub struct Summary<'a> {
    stats: &'a RunStatistics,
    app: &'a str,
    show_times: bool,
}

impl fmt::Display for Summary<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let stats = self.stats;
        writeln!(f, "Done testing {}", self.app)?;

        if !stats.has_results() {
            return writeln!(f, "No valid tests were found");
        }

        writeln!(
            f,
            "Correct {} out of {} ({}%)",
            stats.correct,
            stats.total,
            format_percent(stats.correct, stats.total)
        )?;

        if !stats.failed.is_empty() {
            writeln!(f, "Tests that failed:")?;
            writeln!(f, "{}", stats.failed.join(", "))?;
        }

        if !stats.overtime_cases.is_empty() {
            writeln!(
                f,
                "{} out of {} ({}%) tests went overtime:",
                stats.overtime,
                stats.total,
                format_percent(stats.overtime, stats.total)
            )?;
            writeln!(f, "{}", stats.overtime_cases.join(", "))?;
        }

        if !stats.errored.is_empty() {
            writeln!(f, "{} tests raised errors:", stats.errored.len())?;
            writeln!(f, "{}", stats.errored.join(", "))?;
        }

        if self.show_times {
            let times: Vec<String> = stats
                .durations
                .iter()
                .map(|d| round_to(d.as_secs_f64(), TIMING_REPORT_DIGITS))
                .filter(|&t| t != 0.0)
                .map(format_float)
                .collect();
            writeln!(f, "Times: {}", times.join(", "))?;
        }

        Ok(())
    }
}
