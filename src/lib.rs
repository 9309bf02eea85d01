//! # bookcheck
//!
//! Audits the liveness of a book source catalog. Every entry's
//! `bookSourceUrl` is probed with an HTTP GET through a bounded worker pool;
//! entries that fail are retried in further passes, and the catalog ends up
//! split into reachable (`good`) and unreachable (`error`) entries.
//!
//! ```no_run
//! use bookcheck::validation::{CheckEntries, HttpProbe, RetryCoordinator};
//! use bookcheck::core::Entry;
//!
//! # async fn run() -> bookcheck::core::Result<()> {
//! let probe = HttpProbe::with_defaults()?;
//! let coordinator = RetryCoordinator::new(probe, 8, 5);
//! let partition = coordinator
//!     .check_all(vec![Entry::from_url("https://example.com")], None)
//!     .await;
//! println!("{} good, {} error", partition.good.len(), partition.error.len());
//! # Ok(())
//! # }
//! ```

pub mod catalog;
pub mod config;
pub mod core;
pub mod reporting;
pub mod ui;
pub mod validation;

// Re-export commonly used items at the crate root
pub use crate::core::{BookCheckError, Entry, Outcome, Partition, Result};
pub use catalog::{CatalogLoader, LoadCatalog};
pub use config::Config;
pub use validation::{CheckEntries, HttpProbe, Probe, RetryCoordinator};
