//! Run loop
//!
//! Takes the discovered cases one at a time, in order, and drives each
//! through `load -> invoke -> evaluate`, booking the outcome in a
//! [`RunStatistics`]. Every per-case error is reported and recovered from
//! locally. An interrupt stops the loop between cases (or discards the case
//! whose invocation it interrupted) and the partial statistics are returned
//! as if the run had completed.

use std::io::{self, Write};
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use colored::Colorize;

use crate::config::RunConfig;
use crate::constants::NO_EXPECTED_PLACEHOLDER;
use crate::error::{HarnessError, HarnessResult};
use crate::evaluator::{ComparisonMode, Evaluator};
use crate::invoker::Invoker;
use crate::progress::{NoProgress, ProgressReporter};
use crate::stats::RunStatistics;
use crate::testcase::{CaseFiles, TestCaseSource};
use crate::utils::{format_percent, format_seconds};

/// What happened to one case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum CaseStep {
    /// Could not be loaded; leaves the pool
    Skipped,
    /// Invocation or evaluation raised; kept out of the totals
    Errored,
    /// Judged correct or incorrect
    Judged,
    /// An interrupt arrived while the case was running
    Interrupted,
}

/// Sequential test runner
pub struct Runner {
    config: RunConfig,
    invoker: Box<dyn Invoker>,
    progress: Box<dyn ProgressReporter>,
    /// Per-case notices and verbose output
    out: Box<dyn Write + Send>,
    shutdown: Arc<AtomicBool>,
}

impl Runner {
    /// Create a new runner; `shutdown` is polled between and after cases
    pub fn new(config: RunConfig, invoker: Box<dyn Invoker>, shutdown: Arc<AtomicBool>) -> Self {
        Self {
            config,
            invoker,
            progress: Box::new(NoProgress),
            out: Box::new(io::stdout()),
            shutdown,
        }
    }

    /// Report progress through `progress` instead of staying silent
    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    /// Write per-case output to `out` instead of stdout
    pub fn with_output(mut self, out: Box<dyn Write + Send>) -> Self {
        self.out = out;
        self
    }

    pub fn config(&self) -> &RunConfig {
        &self.config
    }

    /// Discover the cases of this run and execute them.
    ///
    /// Fails only if the test directory cannot be listed.
    pub async fn run(&mut self) -> HarnessResult<RunStatistics> {
        let source = TestCaseSource::new(
            self.config.selection.clone(),
            self.config.ordering,
            self.config.limit,
        );
        let cases = source.discover().await?;

        tracing::info!(
            cases = cases.len(),
            mode = %self.config.mode,
            ordering = %self.config.ordering,
            "Starting run of {}",
            self.config.app
        );

        Ok(self.run_cases(&cases).await)
    }

    /// Execute `cases` in order and return the accumulated statistics
    pub async fn run_cases(&mut self, cases: &[CaseFiles]) -> RunStatistics {
        let mut stats = RunStatistics::new();
        let mut pool = cases.len();

        self.progress.start(cases.len());

        for (index, files) in cases.iter().enumerate() {
            if self.is_shutdown() {
                stats.interrupted = true;
                break;
            }

            let filenote = if self.config.verbosity.is_extra_verbose() {
                format!(
                    " ({} & {})",
                    files.input_path.display(),
                    files.expected_path().display()
                )
            } else {
                String::new()
            };
            self.verbose(format!(
                "Test {}{}, done {} out of {} ({}%)",
                files.name,
                filenote,
                stats.total,
                pool,
                format_percent(stats.total, pool)
            ));

            match self.run_case(files, &mut stats).await {
                CaseStep::Skipped => pool = pool.saturating_sub(1),
                CaseStep::Errored | CaseStep::Judged => {}
                CaseStep::Interrupted => {
                    stats.interrupted = true;
                    break;
                }
            }

            self.progress.advance(index + 1, cases.len());
        }

        self.progress.finish();
        let _ = self.out.flush();

        if stats.interrupted {
            tracing::info!("Run interrupted after {} judged cases", stats.total);
        }

        stats
    }

    async fn run_case(&mut self, files: &CaseFiles, stats: &mut RunStatistics) -> CaseStep {
        let mode = self.config.mode.clone();

        let case = match files.load(mode.requires_expected_output()).await {
            Ok(case) => case,
            Err(e) => {
                self.report_error(&files.name, &e);
                return CaseStep::Skipped;
            }
        };

        self.extra_verbose(format!("Input:\n{}", case.input));
        self.extra_verbose(format!(
            "Expected output:\n{}",
            match case.expected.as_deref() {
                Some(expected) if !expected.is_empty() => expected,
                _ => NO_EXPECTED_PLACEHOLDER,
            }
        ));

        let invocation = self.invoker.invoke(&self.config.app, &case.input).await;
        // The interrupt also reaches the subject program, so whatever it
        // produced is not a real result. The subject can die from it before
        // the shutdown flag is raised, hence the second check.
        let killed = matches!(&invocation, Ok(result) if result.interrupted);
        if killed || self.is_shutdown() {
            if killed {
                tracing::info!(case = %case.name, "Subject program was interrupted");
            }
            return CaseStep::Interrupted;
        }

        let invocation = match invocation {
            Ok(invocation) => invocation,
            Err(e) => {
                self.notice(format!(
                    "Got exception while executing test {} with {}: {}",
                    case.name, self.config.app, e
                ));
                tracing::warn!(case = %case.name, code = e.error_code(), "{}", e);
                stats.record_error(&case.name);
                return CaseStep::Errored;
            }
        };

        let elapsed = invocation.elapsed;
        if self.config.timer || elapsed > self.config.overtime_threshold {
            self.verbose(format!(
                "Process took {} seconds",
                format_seconds(elapsed, 2)
            ));
        }

        let actual = invocation.stdout.trim();
        self.extra_verbose(format!("Got:\n{}", actual));

        let evaluation = Evaluator::new(self.invoker.as_ref())
            .evaluate(&mode, &case.input, case.expected.as_deref(), actual)
            .await;
        if self.is_shutdown() {
            return CaseStep::Interrupted;
        }

        // Overtime is booked for every finished invocation, judged or not
        stats.record_timing(&case.name, elapsed, self.config.overtime_threshold);

        let evaluation = match evaluation {
            Ok(evaluation) => evaluation,
            Err(e) => {
                self.notice(format!("Could not judge the output of test {}: {}", case.name, e));
                tracing::warn!(case = %case.name, code = e.error_code(), "{}", e);
                stats.record_error(&case.name);
                return CaseStep::Errored;
            }
        };

        if matches!(mode, ComparisonMode::ExternalChecker(_)) {
            self.extra_verbose(format!("Checker: {}", evaluation.expected));
        }

        if evaluation.correct {
            self.verbose(format!("{}", "[+] Correct".green()));
        } else if self.config.verbosity.is_extra_verbose() {
            self.verbose(format!("{}", "[-] Wrong".red()));
        } else {
            self.verbose(format!(
                "{}\nExpected:\n{}\nGot:\n{}",
                "[-] Wrong".red(),
                evaluation.expected,
                actual
            ));
        }

        stats.record_outcome(&case.name, evaluation.correct);
        CaseStep::Judged
    }

    fn is_shutdown(&self) -> bool {
        self.shutdown.load(Ordering::SeqCst)
    }

    /// Report a case that could not be loaded
    fn report_error(&mut self, name: &str, error: &HarnessError) {
        tracing::warn!(case = %name, code = error.error_code(), "{}", error);
        self.notice(error.to_string());
    }

    /// Per-case error notice, always printed
    fn notice(&mut self, message: String) {
        self.progress.suspend();
        let _ = writeln!(self.out, "{} {}", "[Error]".red().bold(), message);
    }

    fn verbose(&mut self, message: String) {
        if self.config.verbosity.is_verbose() {
            let _ = writeln!(self.out, "{}", message);
        }
    }

    fn extra_verbose(&mut self, message: String) {
        if self.config.verbosity.is_extra_verbose() {
            let _ = writeln!(self.out, "{}", message);
        }
    }
}

#[cfg(test)]
mod tests {
    use std::path::Path;
    use std::sync::Mutex;
    use std::time::Duration;

    use async_trait::async_trait;
    use tempfile::TempDir;

    use super::*;
    use crate::config::{CaseSelection, Verbosity};
    use crate::invoker::InvocationResult;
    use crate::testcase::Ordering as CaseOrdering;

    /// In-memory subject program: echoes its input, with scripted timings,
    /// failures and interrupts. As a checker it accepts payloads whose last
    /// line is `ok`.
    #[derive(Default)]
    struct Scripted {
        elapsed: Duration,
        slow_inputs: Vec<String>,
        failing_inputs: Vec<String>,
        interrupt_on: Option<(String, Arc<AtomicBool>)>,
        /// Inputs whose run ends as if killed by SIGINT, before any flag is set
        killed_on: Vec<String>,
        outputs: Vec<(String, String)>,
        calls: Arc<Mutex<Vec<String>>>,
    }

    #[async_trait]
    impl Invoker for Scripted {
        async fn invoke(&self, command: &str, input: &str) -> HarnessResult<InvocationResult> {
            self.calls.lock().unwrap().push(input.to_string());

            if let Some((trigger, flag)) = &self.interrupt_on {
                if trigger == input {
                    flag.store(true, Ordering::SeqCst);
                }
            }
            if self.failing_inputs.iter().any(|i| i == input) {
                return Err(HarnessError::Spawn {
                    command: command.to_string(),
                    source: std::io::Error::other("scripted failure"),
                });
            }

            let stdout = self
                .outputs
                .iter()
                .find(|(i, _)| i == input)
                .map(|(_, o)| o.clone())
                .unwrap_or_else(|| format!("{}\n", input));
            let elapsed = if self.slow_inputs.iter().any(|i| i == input) {
                Duration::from_secs(2)
            } else {
                self.elapsed
            };
            let interrupted = self.killed_on.iter().any(|i| i == input);
            Ok(InvocationResult {
                stdout,
                elapsed,
                interrupted,
            })
        }

        async fn invoke_for_status(&self, _command: &str, input: &str) -> HarnessResult<i32> {
            Ok(if input.lines().last() == Some("ok") { 0 } else { 1 })
        }
    }

    /// Cloneable sink for the runner's per-case output
    #[derive(Clone, Default)]
    struct Captured(Arc<Mutex<Vec<u8>>>);

    impl Captured {
        fn text(&self) -> String {
            String::from_utf8_lossy(&self.0.lock().unwrap()).into_owned()
        }
    }

    impl Write for Captured {
        fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
            self.0.lock().unwrap().extend_from_slice(buf);
            Ok(buf.len())
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    async fn run_captured(config: RunConfig, invoker: Scripted) -> (RunStatistics, String) {
        let captured = Captured::default();
        let mut runner = Runner::new(config, Box::new(invoker), Arc::new(AtomicBool::new(false)))
            .with_output(Box::new(captured.clone()));
        let stats = runner.run().await.unwrap();
        (stats, captured.text())
    }

    fn write(dir: &Path, name: &str, contents: &str) {
        std::fs::write(dir.join(name), contents).unwrap();
    }

    fn run_config(dir: &Path, mode: ComparisonMode) -> RunConfig {
        let mut config = RunConfig::new("subject", CaseSelection::Directory(dir.to_path_buf()));
        config.mode = mode;
        config
    }

    async fn run_with(config: RunConfig, invoker: Scripted) -> RunStatistics {
        let mut runner = Runner::new(config, Box::new(invoker), Arc::new(AtomicBool::new(false)));
        runner.run().await.unwrap()
    }

    #[tokio::test]
    async fn test_echo_matches_expected() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.in", "5");
        write(dir.path(), "a.out", "5\n");

        let stats = run_with(run_config(dir.path(), ComparisonMode::Exact), Scripted::default()).await;
        assert_eq!(stats.total, 1);
        assert_eq!(stats.correct, 1);
        assert_eq!(
            stats.summary("subject", false).to_string(),
            "Done testing subject\nCorrect 1 out of 1 (100.0%)\n"
        );
    }

    #[tokio::test]
    async fn test_mismatch_lands_in_failed_list() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.in", "5");
        write(dir.path(), "a.out", "6");

        let stats = run_with(run_config(dir.path(), ComparisonMode::Exact), Scripted::default()).await;
        assert_eq!(stats.total, 1);
        assert_eq!(stats.correct, 0);
        assert_eq!(stats.failed, vec!["a"]);
        assert!(stats
            .summary("subject", false)
            .to_string()
            .contains("Correct 0 out of 1 (0.0%)"));
    }

    #[tokio::test]
    async fn test_empty_means_any_without_out_file() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.in", "5");

        let invoker = Scripted {
            outputs: vec![("5".to_string(), "something else".to_string())],
            ..Default::default()
        };
        let stats = run_with(run_config(dir.path(), ComparisonMode::EmptyMeansAny), invoker).await;
        assert_eq!(stats.total, 1);
        assert_eq!(stats.correct, 1);
    }

    #[tokio::test]
    async fn test_numeric_tolerance() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.in", "pi");
        write(dir.path(), "a.out", "3.14159");

        let invoker = Scripted {
            outputs: vec![("pi".to_string(), "3.14\n".to_string())],
            ..Default::default()
        };
        let stats = run_with(
            run_config(dir.path(), ComparisonMode::NumericTolerance(0.01)),
            invoker,
        )
        .await;
        assert_eq!(stats.correct, 1);
    }

    #[tokio::test]
    async fn test_no_cases_is_not_a_zero_score() {
        let dir = TempDir::new().unwrap();
        let stats = run_with(run_config(dir.path(), ComparisonMode::Exact), Scripted::default()).await;
        assert!(!stats.has_results());
        assert!(stats
            .summary("subject", false)
            .to_string()
            .ends_with("No valid tests were found\n"));
    }

    #[tokio::test]
    async fn test_discovery_errors_leave_the_pool() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "empty.in", "   ");
        write(dir.path(), "empty.out", "1");
        write(dir.path(), "no_out.in", "1");
        write(dir.path(), "ok.in", "1");
        write(dir.path(), "ok.out", "1");

        let invoker = Scripted::default();
        let stats = run_with(run_config(dir.path(), ComparisonMode::Exact), invoker).await;
        assert_eq!(stats.total, 1);
        assert_eq!(stats.correct, 1);
        assert!(stats.failed.is_empty());
        assert!(stats.errored.is_empty());
    }

    #[tokio::test]
    async fn test_missing_out_is_fine_for_checker() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "1.in", "ok");
        write(dir.path(), "2.in", "bad");

        let stats = run_with(
            run_config(dir.path(), ComparisonMode::ExternalChecker("judge".into())),
            Scripted::default(),
        )
        .await;
        assert_eq!(stats.total, 2);
        assert_eq!(stats.correct, 1);
        assert_eq!(stats.failed, vec!["2"]);
    }

    #[tokio::test]
    async fn test_invocation_and_evaluation_errors_are_excluded_from_total() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "t1.in", "1");
        write(dir.path(), "t1.out", "1");
        write(dir.path(), "t2.in", "crash");
        write(dir.path(), "t2.out", "2");
        write(dir.path(), "t3.in", "word");
        write(dir.path(), "t3.out", "3");
        write(dir.path(), "t4.in", "4");
        write(dir.path(), "t4.out", "5");

        let invoker = Scripted {
            failing_inputs: vec!["crash".to_string()],
            ..Default::default()
        };
        let stats = run_with(
            run_config(dir.path(), ComparisonMode::NumericTolerance(0.5)),
            invoker,
        )
        .await;

        assert_eq!(stats.total, 2);
        assert_eq!(stats.correct, 1);
        assert_eq!(stats.failed, vec!["t4"]);
        assert_eq!(stats.errored, vec!["t2", "t3"]);
        assert_eq!(stats.total, stats.correct + stats.failed.len());
    }

    #[tokio::test]
    async fn test_overtime_independent_of_correctness() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "fast.in", "f");
        write(dir.path(), "fast.out", "f");
        write(dir.path(), "slow_ok.in", "s");
        write(dir.path(), "slow_ok.out", "s");
        write(dir.path(), "slow_bad.in", "b");
        write(dir.path(), "slow_bad.out", "nope");

        let invoker = Scripted {
            elapsed: Duration::from_millis(10),
            slow_inputs: vec!["s".to_string(), "b".to_string()],
            ..Default::default()
        };
        let stats = run_with(run_config(dir.path(), ComparisonMode::Exact), invoker).await;

        assert_eq!(stats.overtime, 2);
        assert_eq!(stats.overtime_cases, vec!["slow_bad", "slow_ok"]);
        assert_eq!(stats.correct, 2);
        assert_eq!(stats.failed, vec!["slow_bad"]);
        assert_eq!(stats.durations.len(), 3);
    }

    #[tokio::test]
    async fn test_limit_applies_after_ordering() {
        let dir = TempDir::new().unwrap();
        for name in ["t10", "t2", "t1", "t3"] {
            write(dir.path(), &format!("{}.in", name), name);
            write(dir.path(), &format!("{}.out", name), name);
        }

        let mut config = run_config(dir.path(), ComparisonMode::Exact);
        config.ordering = CaseOrdering::Natural;
        config.limit = Some(3);

        let invoker = Scripted::default();
        let calls = invoker.calls.clone();
        let mut runner = Runner::new(config, Box::new(invoker), Arc::new(AtomicBool::new(false)));
        let stats = runner.run().await.unwrap();
        assert_eq!(stats.total, 3);
        assert_eq!(stats.correct, 3);
        assert_eq!(calls.lock().unwrap().as_slice(), ["t1", "t2", "t3"]);
    }

    #[tokio::test]
    async fn test_interrupt_before_start_keeps_empty_stats() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.in", "1");
        write(dir.path(), "a.out", "1");

        let shutdown = Arc::new(AtomicBool::new(true));
        let mut runner = Runner::new(
            run_config(dir.path(), ComparisonMode::Exact),
            Box::new(Scripted::default()),
            shutdown,
        );
        let stats = runner.run().await.unwrap();
        assert!(stats.interrupted);
        assert_eq!(stats.total, 0);
    }

    #[tokio::test]
    async fn test_interrupt_mid_run_keeps_partial_results() {
        let dir = TempDir::new().unwrap();
        for (name, input) in [("t1", "1"), ("t2", "2"), ("t3", "3")] {
            write(dir.path(), &format!("{}.in", name), input);
            write(dir.path(), &format!("{}.out", name), input);
        }

        let shutdown = Arc::new(AtomicBool::new(false));
        let invoker = Scripted {
            interrupt_on: Some(("2".to_string(), shutdown.clone())),
            ..Default::default()
        };
        let mut runner = Runner::new(
            run_config(dir.path(), ComparisonMode::Exact),
            Box::new(invoker),
            shutdown,
        );
        let stats = runner.run().await.unwrap();

        assert!(stats.interrupted);
        assert_eq!(stats.total, 1);
        assert_eq!(stats.correct, 1);
        assert!(stats.failed.is_empty());
        assert_eq!(
            stats.summary("subject", false).to_string(),
            "Done testing subject\nCorrect 1 out of 1 (100.0%)\n"
        );
    }

    #[tokio::test]
    async fn test_killed_subject_is_discarded_before_the_flag_is_set() {
        let dir = TempDir::new().unwrap();
        for (name, input) in [("t1", "1"), ("t2", "2"), ("t3", "3")] {
            write(dir.path(), &format!("{}.in", name), input);
            write(dir.path(), &format!("{}.out", name), input);
        }

        let invoker = Scripted {
            killed_on: vec!["2".to_string()],
            outputs: vec![("2".to_string(), String::new())],
            ..Default::default()
        };
        let calls = invoker.calls.clone();
        let stats = run_with(run_config(dir.path(), ComparisonMode::Exact), invoker).await;

        assert!(stats.interrupted);
        assert_eq!(stats.total, 1);
        assert!(stats.failed.is_empty());
        assert_eq!(stats.durations.len(), 1);
        assert_eq!(calls.lock().unwrap().as_slice(), ["1", "2"]);
    }

    #[tokio::test]
    async fn test_quiet_run_prints_only_notices() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "empty.in", "");
        write(dir.path(), "ok.in", "1");
        write(dir.path(), "ok.out", "2");

        let (stats, out) =
            run_captured(run_config(dir.path(), ComparisonMode::Exact), Scripted::default()).await;
        assert_eq!(stats.failed, vec!["ok"]);
        assert_eq!(out.lines().count(), 1);
        assert!(out.contains("[Error]"));
        assert!(out.contains("empty.in is empty"));
    }

    #[tokio::test]
    async fn test_verbose_output() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.in", "5");
        write(dir.path(), "a.out", "5");
        write(dir.path(), "b.in", "5");
        write(dir.path(), "b.out", "6");

        let mut config = run_config(dir.path(), ComparisonMode::Exact);
        config.verbosity = Verbosity::Verbose;
        config.timer = true;
        let invoker = Scripted {
            elapsed: Duration::from_millis(500),
            ..Default::default()
        };
        let (_, out) = run_captured(config, invoker).await;

        assert!(out.contains("Test a, done 0 out of 2 (0.0%)\n"));
        assert!(out.contains("Test b, done 1 out of 2 (50.0%)\n"));
        assert_eq!(out.matches("Process took 0.5 seconds\n").count(), 2);
        assert!(out.contains("[+] Correct"));
        assert!(out.contains("[-] Wrong"));
        assert!(out.contains("\nExpected:\n6\nGot:\n5\n"));
        assert!(!out.contains("Input:"));
    }

    #[tokio::test]
    async fn test_overtime_is_shown_without_timer() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.in", "5");
        write(dir.path(), "a.out", "5");

        let mut config = run_config(dir.path(), ComparisonMode::Exact);
        config.verbosity = Verbosity::Verbose;
        let invoker = Scripted {
            slow_inputs: vec!["5".to_string()],
            ..Default::default()
        };
        let (_, out) = run_captured(config, invoker).await;
        assert!(out.contains("Process took 2.0 seconds\n"));
    }

    #[tokio::test]
    async fn test_extra_verbose_output_with_checker() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.in", "ok");

        let mut config = run_config(dir.path(), ComparisonMode::ExternalChecker("judge".into()));
        config.verbosity = Verbosity::ExtraVerbose;
        let (stats, out) = run_captured(config, Scripted::default()).await;

        assert_eq!(stats.correct, 1);
        assert!(out.contains(&format!(
            "Test a ({} & {}), done 0 out of 1 (0.0%)\n",
            dir.path().join("a.in").display(),
            dir.path().join("a.out").display()
        )));
        assert!(out.contains("Input:\nok\n"));
        assert!(out.contains("Expected output:\n[[None given]]\n"));
        assert!(out.contains("Got:\nok\n"));
        assert!(out.contains("Checker: [[Got status code 0 from judge]]\n"));
        assert!(out.contains("[+] Correct"));
        assert!(!out.contains("Process took"));
    }

    #[tokio::test]
    async fn test_extra_verbose_wrong_answer_skips_the_diff() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "a.in", "5");
        write(dir.path(), "a.out", "6");

        let mut config = run_config(dir.path(), ComparisonMode::Exact);
        config.verbosity = Verbosity::ExtraVerbose;
        let (_, out) = run_captured(config, Scripted::default()).await;

        assert!(out.contains("Expected output:\n6\n"));
        assert!(out.contains("[-] Wrong"));
        assert!(!out.contains("Expected:\n"));
    }

    #[tokio::test]
    async fn test_single_case_selection() {
        let dir = TempDir::new().unwrap();
        write(dir.path(), "only.in", "7");
        write(dir.path(), "only.out", "7");
        write(dir.path(), "other.in", "8");

        let config = RunConfig::new("subject", CaseSelection::Single(dir.path().join("only")));
        let stats = run_with(config.clone(), Scripted::default()).await;
        assert_eq!(stats.total, 1);
        assert_eq!(stats.correct, 1);

        let mut limited = config;
        limited.limit = Some(0);
        let stats = run_with(limited, Scripted::default()).await;
        assert!(!stats.has_results());
    }

    #[tokio::test]
    async fn test_unreadable_directory_fails_the_run() {
        let dir = TempDir::new().unwrap();
        let config = run_config(&dir.path().join("missing"), ComparisonMode::Exact);
        let mut runner = Runner::new(
            config,
            Box::new(Scripted::default()),
            Arc::new(AtomicBool::new(false)),
        );
        assert!(runner.run().await.is_err());
    }

    #[cfg(unix)]
    mod processes {
        use super::*;
        use crate::invoker::ShellInvoker;

        async fn run_shell(config: RunConfig) -> RunStatistics {
            let mut runner = Runner::new(
                config,
                Box::new(ShellInvoker::new()),
                Arc::new(AtomicBool::new(false)),
            );
            runner.run().await.unwrap()
        }

        #[tokio::test]
        async fn test_cat_passes() {
            let dir = TempDir::new().unwrap();
            write(dir.path(), "a.in", "5");
            write(dir.path(), "a.out", "5");

            let mut config = run_config(dir.path(), ComparisonMode::Exact);
            config.app = "cat".to_string();
            let stats = run_shell(config).await;
            assert_eq!(
                stats.summary("cat", false).to_string(),
                "Done testing cat\nCorrect 1 out of 1 (100.0%)\n"
            );
        }

        #[tokio::test]
        async fn test_numeric_subject() {
            let dir = TempDir::new().unwrap();
            write(dir.path(), "a.in", "x");
            write(dir.path(), "a.out", "3.14159");

            let mut config = run_config(dir.path(), ComparisonMode::NumericTolerance(0.01));
            config.app = "echo 3.14".to_string();
            let stats = run_shell(config).await;
            assert_eq!(stats.correct, 1);
        }

        #[tokio::test]
        async fn test_sleeping_subject_goes_overtime() {
            let dir = TempDir::new().unwrap();
            write(dir.path(), "a.in", "5");
            write(dir.path(), "a.out", "6");

            let mut config = run_config(dir.path(), ComparisonMode::Exact);
            config.app = "sleep 2; cat".to_string();
            let stats = run_shell(config).await;
            assert_eq!(stats.overtime, 1);
            assert_eq!(stats.overtime_cases, vec!["a"]);
            assert_eq!(stats.failed, vec!["a"]);
        }
    }
}
