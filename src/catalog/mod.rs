//! Book source catalogs
//!
//! This module turns the configured catalog location (a local JSON file or
//! an http(s) URL) into the ordered list of entries to validate.

pub mod loader;

// Re-export commonly used items
pub use loader::{CatalogLoader, CatalogSource, LoadCatalog, parse_catalog};
