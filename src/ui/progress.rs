use indicatif::{MultiProgress, ProgressBar, ProgressStyle};
use std::sync::Arc;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use crate::core::types::Outcome;

/// Running counters of the pass in progress.
///
/// Completing probes only bump atomics here; the progress bar reads them
/// when it redraws, so recording an outcome never waits on the terminal.
#[derive(Debug, Default)]
pub struct PassTally {
    total: AtomicUsize,
    completed: AtomicUsize,
    successes: AtomicUsize,
    failures: AtomicUsize,
}

/// Point-in-time copy of a [`PassTally`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TallySnapshot {
    /// Entries probed in this pass
    pub total: usize,
    /// Probes of this pass that already finished
    pub completed: usize,
    /// Good entries so far, earlier passes included
    pub successes: usize,
    /// Failed probes in this pass
    pub failures: usize,
}

impl PassTally {
    fn reset(&self, total: usize, good_so_far: usize) {
        self.total.store(total, Ordering::Relaxed);
        self.completed.store(0, Ordering::Relaxed);
        self.successes.store(good_so_far, Ordering::Relaxed);
        self.failures.store(0, Ordering::Relaxed);
    }

    fn record(&self, success: bool) -> TallySnapshot {
        if success {
            self.successes.fetch_add(1, Ordering::Relaxed);
        } else {
            self.failures.fetch_add(1, Ordering::Relaxed);
        }
        self.completed.fetch_add(1, Ordering::Relaxed);
        self.snapshot()
    }

    pub fn snapshot(&self) -> TallySnapshot {
        TallySnapshot {
            total: self.total.load(Ordering::Relaxed),
            completed: self.completed.load(Ordering::Relaxed),
            successes: self.successes.load(Ordering::Relaxed),
            failures: self.failures.load(Ordering::Relaxed),
        }
    }
}

impl TallySnapshot {
    fn message(&self) -> String {
        format!("ok: {} | failed: {}", self.successes, self.failures)
    }
}

pub struct ProgressReporter {
    multi_progress: Arc<MultiProgress>,
    pass_progress: Option<ProgressBar>,
    tally: Arc<PassTally>,
    enabled: bool,
}

impl ProgressReporter {
    pub fn new(enabled: bool) -> Self {
        Self {
            multi_progress: Arc::new(MultiProgress::new()),
            pass_progress: None,
            tally: Arc::new(PassTally::default()),
            enabled,
        }
    }

    /// Start tracking a pass over `total` entries, `good_so_far` entries
    /// having succeeded in earlier passes.
    pub fn start_pass(&mut self, pass: u32, max_passes: u32, total: usize, good_so_far: usize) {
        self.tally.reset(total, good_so_far);

        if !self.enabled {
            return;
        }

        let pb = self.multi_progress.add(ProgressBar::new(total as u64));
        pb.set_style(
            ProgressStyle::default_bar()
                .template("{spinner:.green} [{elapsed_precise}] pass {prefix} [{bar:40.yellow/red}] {pos}/{len} {msg}")
                .unwrap_or_else(|_| ProgressStyle::default_bar())
                .progress_chars("#>-"),
        );
        pb.set_prefix(format!("{pass}/{max_passes}"));
        pb.set_message(self.tally.snapshot().message());
        pb.enable_steady_tick(Duration::from_millis(120));
        self.pass_progress = Some(pb);
    }

    /// Count one finished probe of the current pass.
    pub fn record(&self, outcome: &Outcome) {
        let snapshot = self.tally.record(outcome.success);
        if let Some(ref pb) = self.pass_progress {
            pb.set_position(snapshot.completed as u64);
            pb.set_message(snapshot.message());
        }
    }

    pub fn finish_pass(&self) {
        if let Some(ref pb) = self.pass_progress {
            let snapshot = self.tally.snapshot();
            let message = if snapshot.failures == 0 {
                format!("✓ {} | all reachable", snapshot.message())
            } else {
                format!("✓ {}", snapshot.message())
            };
            pb.finish_with_message(message);
        }
    }

    pub fn finish_and_clear(&self) {
        if self.enabled {
            // Clear the progress bars and add a blank line
            self.multi_progress.clear().unwrap_or(());
            println!();
        }
    }

    /// Counters of the pass in progress, or of the last finished pass.
    pub fn snapshot(&self) -> TallySnapshot {
        self.tally.snapshot()
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}
