//! Book source validation
//!
//! This module probes book source URLs over HTTP, runs the probes through a
//! bounded worker pool, and retries failing entries pass by pass until the
//! catalog converges to a good/error partition.

pub mod coordinator;
pub mod pool;
pub mod probe;

// Re-export commonly used items
pub use coordinator::{CheckEntries, RetryCoordinator};
pub use pool::WorkerPool;
pub use probe::{HttpProbe, Probe};
