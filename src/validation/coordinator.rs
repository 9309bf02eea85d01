use async_trait::async_trait;

use crate::config::Config;
use crate::core::constants::defaults;
use crate::core::types::{Entry, Outcome, Partition};
use crate::reporting::logging;
use crate::ui::progress::ProgressReporter;
use crate::validation::pool::WorkerPool;
use crate::validation::probe::Probe;

#[async_trait]
pub trait CheckEntries {
    /// Classify every entry as good or error, retrying failures pass by pass.
    async fn check_all(
        &self,
        entries: Vec<Entry>,
        progress: Option<&mut ProgressReporter>,
    ) -> Partition;
}

/// Working state of one run: entries not yet reachable and entries already good.
#[derive(Debug, Default)]
struct RetryState {
    pass: u32,
    remaining: Vec<Entry>,
    good: Vec<Entry>,
}

impl RetryState {
    fn new(entries: Vec<Entry>) -> Self {
        Self {
            pass: 0,
            remaining: entries,
            good: Vec::new(),
        }
    }

    fn is_terminal(&self, max_attempts: u32) -> bool {
        self.remaining.is_empty() || self.pass >= max_attempts
    }

    /// Fold one pass worth of outcomes, in the order they completed.
    ///
    /// Returns how many entries became good in this pass.
    fn fold(&mut self, outcomes: Vec<Outcome>) -> usize {
        self.pass += 1;
        let before = self.good.len();
        let mut still_failing = Vec::new();

        for outcome in outcomes {
            if outcome.success {
                self.good.push(outcome.into_entry());
            } else {
                still_failing.push(outcome.into_entry());
            }
        }

        self.remaining = still_failing;
        self.good.len() - before
    }

    fn into_partition(self) -> Partition {
        Partition {
            good: self.good,
            error: self.remaining,
            passes: self.pass,
        }
    }
}

/// Drives the worker pool over still-failing entries until all succeed or
/// the attempt budget is spent.
///
/// With `max_attempts == 1` this is a plain single sweep.
pub struct RetryCoordinator<P> {
    probe: P,
    pool: WorkerPool,
    max_attempts: u32,
}

impl<P: Probe> RetryCoordinator<P> {
    pub fn new(probe: P, concurrency: usize, max_attempts: u32) -> Self {
        Self {
            probe,
            pool: WorkerPool::new(concurrency),
            max_attempts,
        }
    }

    pub fn from_config(probe: P, config: &Config) -> Self {
        Self::new(probe, config.workers(), config.max_attempts())
    }

    pub fn with_defaults(probe: P) -> Self {
        Self::new(probe, defaults::WORKERS, defaults::MAX_ATTEMPTS)
    }

    pub fn max_attempts(&self) -> u32 {
        self.max_attempts
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }
}

#[async_trait]
impl<P: Probe> CheckEntries for RetryCoordinator<P> {
    async fn check_all(
        &self,
        entries: Vec<Entry>,
        mut progress: Option<&mut ProgressReporter>,
    ) -> Partition {
        let mut state = RetryState::new(entries);

        while !state.is_terminal(self.max_attempts) {
            let pass = state.pass + 1;
            let batch = std::mem::take(&mut state.remaining);
            logging::log_pass_start(pass, self.max_attempts, batch.len());

            if let Some(prog) = progress.as_mut() {
                prog.start_pass(pass, self.max_attempts, batch.len(), state.good.len());
            }

            let outcomes = self
                .pool
                .run_batch(&self.probe, batch, progress.as_deref())
                .await;
            let newly_good = state.fold(outcomes);

            if let Some(prog) = progress.as_ref() {
                prog.finish_pass();
            }
            logging::log_pass_complete(pass, newly_good, state.remaining.len());
        }

        state.into_partition()
    }
}
