//! thetacheck - command-line entry point
//!
//! Runs an application against a directory of test cases and prints the
//! statistics of the run.

mod cli;

use std::path::Path;
use std::process::ExitCode;
use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

use anyhow::{Context, Result};
use clap::Parser;
use colored::Colorize;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use thetacheck::progress::reporter_for;
use thetacheck::{Config, RunStatistics, Runner, ShellInvoker};

use crate::cli::{Cli, Resolved};

/// Exit status for unusable configuration, matching clap's usage errors
const EXIT_CONFIG: u8 = 2;

/// Load the environment, start logging and resolve the flags into a run
fn prepare(cli: Cli) -> Result<(Config, Resolved)> {
    let config = Config::from_env().context("invalid environment configuration")?;

    // Logs go to stderr so they never interleave with the report
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(&config.rust_log))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let resolved = cli.resolve(&config, Path::new("."))?;
    tracing::debug!(app = %resolved.run.app, mode = %resolved.run.mode, "Run resolved");
    Ok((config, resolved))
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();

    let (config, resolved) = match prepare(cli) {
        Ok(prepared) => prepared,
        Err(e) => {
            tracing::error!(error_code = "CONFIGURATION_ERROR", "{:#}", e);
            eprintln!("{} {:#}", "[Error]".red().bold(), e);
            return ExitCode::from(EXIT_CONFIG);
        }
    };
    if let Some(notice) = &resolved.notice {
        println!("{}", notice);
    }

    // Create shutdown signal
    let shutdown = Arc::new(AtomicBool::new(false));
    let shutdown_clone = shutdown.clone();

    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_err() {
            tracing::warn!("Failed to install Ctrl+C handler");
            return;
        }
        tracing::info!("Interrupt received, stopping after the current test");
        shutdown_clone.store(true, Ordering::SeqCst);

        // A second interrupt abandons the run without a report
        if tokio::signal::ctrl_c().await.is_ok() {
            std::process::exit(130);
        }
    });

    let progress = reporter_for(config.progress, resolved.run.verbosity);
    let mut runner = Runner::new(resolved.run, Box::new(ShellInvoker::new()), shutdown)
        .with_progress(progress);

    let stats = match runner.run().await {
        Ok(stats) => stats,
        Err(e) => {
            tracing::error!(error_code = e.error_code(), "{}", e);
            println!("{} {}", "[Error]".red().bold(), e);
            RunStatistics::new()
        }
    };

    let run = runner.config();
    print!("{}", stats.summary(&run.app, run.timer));

    if stats.has_results() {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
