//! Throttled indexing progress, rendered on a background thread.
//!
//! Tokenization units send one [`Signal::FileDone`] per file over an unbounded
//! channel, and the builder sends [`Signal::Done`] once it has settled the
//! build's final state. The reporter only observes: if it cannot start, falls
//! behind or panics, the build carries on unaffected.

use crate::utils::progress::{ProgressBar, ProgressStyle};
use std::sync::mpsc::Receiver;
use std::thread::{self, JoinHandle};
use tracing::warn;

const BAR_TEMPLATE: &str = "Indexing [{bar:10}] {percent:>3}% {msg}";

/// Rounded completion percentage; an empty workload counts as done
pub fn percent(processed: usize, total: usize) -> u8 {
    if total == 0 {
        return 100;
    }
    let pct = (processed as f64 * 100.0 / total as f64).round();
    pct.min(100.0) as u8
}

/// Counts completed files and decides when a redraw is due
#[derive(Debug, Clone)]
pub struct ProgressTracker {
    total: usize,
    processed: usize,
    step: u8,
    last_rendered: u8,
}

impl ProgressTracker {
    pub fn new(total: usize, step: u8) -> Self {
        Self {
            total,
            processed: 0,
            step: step.max(1),
            last_rendered: 0,
        }
    }

    /// Record one completed file. Returns the percentage to render if progress
    /// advanced by at least `step` points since the last render.
    pub fn record(&mut self) -> Option<u8> {
        self.processed = (self.processed + 1).min(self.total);
        let pct = percent(self.processed, self.total);
        if pct >= self.last_rendered.saturating_add(self.step) {
            self.last_rendered = pct;
            Some(pct)
        } else {
            None
        }
    }

    pub fn processed(&self) -> usize {
        self.processed
    }

    pub fn total(&self) -> usize {
        self.total
    }
}

/// Message sent to the reporter thread
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Signal {
    /// One tokenization unit completed, whatever its outcome
    FileDone,
    /// The build settled as finished or cancelled
    Done { cancelled: bool },
}

/// Spawn the reporter thread. Returns `None` if the thread could not start.
///
/// The thread yields `true` if the bar ended as "finished".
pub(crate) fn spawn_reporter(
    total: usize,
    step: u8,
    visible: bool,
    signals: Receiver<Signal>,
) -> Option<JoinHandle<bool>> {
    let spawned = thread::Builder::new()
        .name("index-progress".to_string())
        .spawn(move || report(total, step, visible, signals));

    match spawned {
        Ok(handle) => Some(handle),
        Err(err) => {
            warn!("Progress reporter unavailable: {}", err);
            None
        }
    }
}

fn report(total: usize, step: u8, visible: bool, signals: Receiver<Signal>) -> bool {
    let bar = if visible {
        ProgressBar::new(total as u64).with_style(
            ProgressStyle::default_bar()
                .template(BAR_TEMPLATE)
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#_"),
        )
    } else {
        ProgressBar::hidden()
    };

    let mut tracker = ProgressTracker::new(total, step);
    // A channel closed without a verdict means the build unwound
    let mut cancelled = true;
    for signal in signals.iter() {
        match signal {
            Signal::FileDone => {
                if tracker.record().is_some() {
                    bar.set_position(tracker.processed() as u64);
                }
            }
            Signal::Done { cancelled: verdict } => {
                cancelled = verdict;
                break;
            }
        }
    }

    if cancelled {
        bar.abandon_with_message("cancelled");
    } else {
        bar.set_position(total as u64);
        bar.finish_with_message("finished");
    }
    !cancelled
}
