//! Process invoker for the program under test and the checker
//!
//! The run loop only talks to the [`Invoker`] trait. [`ShellInvoker`] is the
//! default implementation: it spawns the command through the platform shell,
//! feeds the input on stdin and captures stdout. A faster in-process call
//! path can be plugged in by implementing the trait.

use std::io;
use std::process::{Output, Stdio};
use std::time::{Duration, Instant};

use async_trait::async_trait;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

use crate::error::{HarnessError, HarnessResult};
use crate::utils::decode_text;

/// Captured output of a single invocation
#[derive(Debug, Clone)]
pub struct InvocationResult {
    /// Stdout decoded as UTF-8 (lossy) with CRLF normalised to LF
    pub stdout: String,
    /// Wall-clock time of the invocation
    pub elapsed: Duration,
    /// The program was killed by an interrupt (SIGINT); its output is partial
    pub interrupted: bool,
}

/// Runs external commands with a text payload on stdin
#[async_trait]
pub trait Invoker: Send + Sync {
    /// Run `command` with `input` on stdin and capture its output and timing.
    async fn invoke(&self, command: &str, input: &str) -> HarnessResult<InvocationResult>;

    /// Run `command` with `input` on stdin and return only its exit status.
    ///
    /// A non-zero exit is a normal result, not an error.
    async fn invoke_for_status(&self, command: &str, input: &str) -> HarnessResult<i32>;
}

/// Spawns commands through `sh -c` (or `cmd /C` on Windows)
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellInvoker;

impl ShellInvoker {
    pub fn new() -> Self {
        Self
    }

    fn shell_command(command: &str) -> Command {
        #[cfg(windows)]
        {
            let mut cmd = Command::new("cmd");
            cmd.arg("/C").arg(command);
            cmd
        }

        #[cfg(not(windows))]
        {
            let mut cmd = Command::new("sh");
            cmd.arg("-c").arg(command);
            cmd
        }
    }

    /// Spawn, feed stdin and wait for the process to exit.
    ///
    /// Stdin is written concurrently with draining stdout so large payloads
    /// cannot deadlock on a full pipe.
    async fn run(&self, command: &str, input: &str, stdout: Stdio) -> HarnessResult<Output> {
        let mut child = Self::shell_command(command)
            .stdin(Stdio::piped())
            .stdout(stdout)
            .stderr(Stdio::null())
            .kill_on_drop(true)
            .spawn()
            .map_err(|source| HarnessError::Spawn {
                command: command.to_string(),
                source,
            })?;

        let stdin = child.stdin.take();
        let payload = input.as_bytes();

        let feed = async move {
            let Some(mut stdin) = stdin else {
                return Ok(());
            };
            match stdin.write_all(payload).await {
                // The program is free to exit without reading its input
                Err(e) if e.kind() == io::ErrorKind::BrokenPipe => Ok(()),
                other => other,
            }
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());

        let io_error = |source: io::Error| HarnessError::Io {
            command: command.to_string(),
            source,
        };
        fed.map_err(io_error)?;
        output.map_err(io_error)
    }
}

#[async_trait]
impl Invoker for ShellInvoker {
    async fn invoke(&self, command: &str, input: &str) -> HarnessResult<InvocationResult> {
        let start = Instant::now();
        let output = self.run(command, input, Stdio::piped()).await?;
        let elapsed = start.elapsed();

        tracing::debug!(
            command,
            elapsed_ms = elapsed.as_millis() as u64,
            status = ?output.status.code(),
            "invocation finished"
        );

        Ok(InvocationResult {
            stdout: decode_text(&output.stdout),
            elapsed,
            interrupted: killed_by_interrupt(&output.status),
        })
    }

    async fn invoke_for_status(&self, command: &str, input: &str) -> HarnessResult<i32> {
        let output = self.run(command, input, Stdio::null()).await?;
        Ok(exit_code(&output.status))
    }
}

/// Exit code of a finished process; a signal death maps to `-signal`
fn exit_code(status: &std::process::ExitStatus) -> i32 {
    if let Some(code) = status.code() {
        return code;
    }

    #[cfg(unix)]
    {
        use std::os::unix::process::ExitStatusExt;
        if let Some(signal) = status.signal() {
            return -signal;
        }
    }

    -1
}

/// Whether the process died from SIGINT, as it does on a terminal ctrl-c
fn killed_by_interrupt(status: &std::process::ExitStatus) -> bool {
    #[cfg(unix)]
    {
        const SIGINT: i32 = 2;
        use std::os::unix::process::ExitStatusExt;
        status.signal() == Some(SIGINT)
    }

    #[cfg(not(unix))]
    {
        let _ = status;
        false
    }
}
