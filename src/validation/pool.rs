use futures::{StreamExt, stream};

use crate::core::constants::defaults;
use crate::core::types::{Entry, Outcome};
use crate::reporting::logging;
use crate::ui::progress::ProgressReporter;
use crate::validation::probe::Probe;

/// Runs a bounded number of probes at once over a batch of entries.
#[derive(Debug, Clone, Copy)]
pub struct WorkerPool {
    concurrency: usize,
}

impl WorkerPool {
    /// A concurrency of 0 is treated as 1.
    pub fn new(concurrency: usize) -> Self {
        Self {
            concurrency: concurrency.max(1),
        }
    }

    pub fn concurrency(&self) -> usize {
        self.concurrency
    }

    /// Probe every entry, at most `concurrency` at a time.
    ///
    /// Outcomes come back in completion order, exactly one per entry. Each
    /// one is handed to `progress` as soon as its probe finishes. Returns once
    /// every probe of the batch has completed.
    pub async fn run_batch<P>(
        &self,
        probe: &P,
        entries: Vec<Entry>,
        progress: Option<&ProgressReporter>,
    ) -> Vec<Outcome>
    where
        P: Probe + ?Sized,
    {
        let mut outcomes = Vec::with_capacity(entries.len());

        let mut completions = stream::iter(entries)
            .map(|entry| probe.probe(entry))
            .buffer_unordered(self.concurrency);

        while let Some(outcome) = completions.next().await {
            logging::log_outcome(&outcome);
            if let Some(prog) = progress {
                prog.record(&outcome);
            }
            outcomes.push(outcome);
        }

        outcomes
    }
}

impl Default for WorkerPool {
    fn default() -> Self {
        Self::new(defaults::WORKERS)
    }
}
