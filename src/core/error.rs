use std::fmt;

/// Error types for bookcheck operations
///
/// Only configuration, catalog and output failures are represented here.
/// Probe failures never become errors; they are folded into an unreachable
/// [`Outcome`](crate::core::types::Outcome) at the probe boundary.
#[derive(Debug)]
pub enum BookCheckError {
    /// IO error (file operations, etc.)
    Io(std::io::Error),

    /// Configuration error
    Config(String),

    /// Catalog could not be loaded or parsed
    Catalog(String),

    /// HTTP client error
    Http(reqwest::Error),

    /// JSON parsing or serialization error
    Json(serde_json::Error),

    /// Result files could not be written
    Output(String),
}

impl fmt::Display for BookCheckError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            BookCheckError::Io(err) => write!(f, "IO error: {err}"),
            BookCheckError::Config(msg) => write!(f, "Configuration error: {msg}"),
            BookCheckError::Catalog(msg) => write!(f, "Catalog error: {msg}"),
            BookCheckError::Http(err) => write!(f, "HTTP error: {err}"),
            BookCheckError::Json(err) => write!(f, "JSON error: {err}"),
            BookCheckError::Output(msg) => write!(f, "Output error: {msg}"),
        }
    }
}

impl std::error::Error for BookCheckError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            BookCheckError::Io(err) => Some(err),
            BookCheckError::Http(err) => Some(err),
            BookCheckError::Json(err) => Some(err),
            _ => None,
        }
    }
}

impl From<std::io::Error> for BookCheckError {
    fn from(err: std::io::Error) -> Self {
        BookCheckError::Io(err)
    }
}

impl From<reqwest::Error> for BookCheckError {
    fn from(err: reqwest::Error) -> Self {
        BookCheckError::Http(err)
    }
}

impl From<serde_json::Error> for BookCheckError {
    fn from(err: serde_json::Error) -> Self {
        BookCheckError::Json(err)
    }
}

/// Type alias for Results using BookCheckError
pub type Result<T> = std::result::Result<T, BookCheckError>;
