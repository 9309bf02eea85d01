//! Logging and result reporting
//!
//! This module handles structured logging for the application and
//! writing the final good/error result files.

pub mod logging;
pub mod results;

// Re-export commonly used items
pub use results::{ResultFiles, write_partition};
