//! Progress reporting during a run
//!
//! Whether a bar is drawn is decided once at startup by [`reporter_for`];
//! the run loop only sees a [`ProgressReporter`] and never branches on it.

use std::io::{self, IsTerminal, Write};

use crate::config::Verbosity;
use crate::utils::format_percent;

const BAR_WIDTH: usize = 30;

/// Receives progress events from the run loop. Best-effort: failures to draw
/// are ignored.
pub trait ProgressReporter: Send {
    /// The run is about to process `pool` cases
    fn start(&mut self, pool: usize);

    /// `done` of `pool` cases have been processed
    fn advance(&mut self, done: usize, pool: usize);

    /// Make room for a line of regular output
    fn suspend(&mut self);

    /// The run is over
    fn finish(&mut self);
}

/// Draws nothing
#[derive(Debug, Default)]
pub struct NoProgress;

impl ProgressReporter for NoProgress {
    fn start(&mut self, _pool: usize) {}
    fn advance(&mut self, _done: usize, _pool: usize) {}
    fn suspend(&mut self) {}
    fn finish(&mut self) {}
}

/// Redraws a single-line bar in place
pub struct TerminalProgress<W: Write + Send> {
    out: W,
    drawn: bool,
}

impl<W: Write + Send> TerminalProgress<W> {
    pub fn new(out: W) -> Self {
        Self { out, drawn: false }
    }

    fn draw(&mut self, done: usize, pool: usize) {
        let _ = write!(self.out, "\r{}", render_bar(done, pool, BAR_WIDTH));
        let _ = self.out.flush();
        self.drawn = true;
    }

    fn end_line(&mut self) {
        if self.drawn {
            let _ = writeln!(self.out);
            let _ = self.out.flush();
            self.drawn = false;
        }
    }
}

impl<W: Write + Send> ProgressReporter for TerminalProgress<W> {
    fn start(&mut self, pool: usize) {
        self.draw(0, pool);
    }

    fn advance(&mut self, done: usize, pool: usize) {
        self.draw(done, pool);
    }

    fn suspend(&mut self) {
        self.end_line();
    }

    fn finish(&mut self) {
        self.end_line();
    }
}

/// `[=========>          ] 3/10 (30.0%)`
pub fn render_bar(done: usize, pool: usize, width: usize) -> String {
    let done = done.min(pool);
    let filled = if pool == 0 { 0 } else { done * width / pool };
    let mut bar = "=".repeat(filled);
    if filled < width {
        bar.push(if done > 0 { '>' } else { ' ' });
        bar.push_str(&" ".repeat(width - filled - 1));
    }
    format!("[{}] {}/{} ({}%)", bar, done, pool, format_percent(done, pool))
}

/// Pick the reporter for this run: a bar on an interactive stderr when the
/// run is not verbose, nothing otherwise.
pub fn reporter_for(enabled: bool, verbosity: Verbosity) -> Box<dyn ProgressReporter> {
    if enabled && !verbosity.is_verbose() && io::stderr().is_terminal() {
        Box::new(TerminalProgress::new(io::stderr()))
    } else {
        Box::new(NoProgress)
    }
}
