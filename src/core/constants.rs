/// Application-wide constants to avoid magic values throughout the codebase.
///
/// This module centralizes the literal values shared by the probe, the
/// retry coordinator, the config loader and the output writer.
/// HTTP status code constants
pub mod http_status {
    /// HTTP 200 OK - the only status that marks a book source as reachable
    pub const OK: u16 = 200;
}

/// Timeout and duration constants
pub mod timeouts {
    /// Default per-probe timeout in seconds
    pub const DEFAULT_TIMEOUT_SECONDS: u64 = 3;
    /// Maximum reasonable probe timeout in seconds (1 hour)
    pub const MAX_TIMEOUT_SECONDS: u64 = 3600;
    /// Catalog downloads get this many probe timeouts to complete
    pub const CATALOG_FETCH_MULTIPLIER: u64 = 10;
}

/// Default configuration values
pub mod defaults {
    /// Default config file, looked up in the working directory
    pub const CONFIG_FILE: &str = "path.json";
    /// Default number of concurrent probes
    pub const WORKERS: usize = 5;
    /// Default number of passes over still-failing entries
    pub const MAX_ATTEMPTS: u32 = 5;
    /// Default output directory
    pub const OUTPATH: &str = "./";
    /// Default value of the reserved dedup flag
    pub const DEDUP: &str = "n";
    /// Maximum redirects followed by a single probe
    pub const MAX_REDIRECTS: usize = 10;
}

/// HTTP header constants
pub mod headers {
    /// Mobile browser user agent sent with every probe to avoid trivial bot blocking
    pub const MOBILE_USER_AGENT: &str = "Mozilla/5.0 (Linux; Android 6.0; Nexus 5 Build/MRA58N) \
         AppleWebKit/537.36 (KHTML, like Gecko) Chrome/94.0.4606.71 Mobile Safari/537.36";
}

/// Catalog format constants
pub mod catalog {
    /// Field holding the URL probed for each book source
    pub const URL_FIELD: &str = "bookSourceUrl";
    /// Extension of local catalogs that can be loaded
    pub const JSON_EXTENSION: &str = "json";
    /// Prefix identifying remote catalogs
    pub const REMOTE_PREFIX: &str = "http";
}

/// Output file constants
pub mod output_files {
    /// Entries that answered 200 at least once
    pub const GOOD: &str = "good.json";
    /// Entries that never answered 200
    pub const ERROR: &str = "error.json";
}

/// Error message constants
pub mod error_messages {
    /// Description used when an entry has no usable URL
    pub const MISSING_URL: &str = "missing bookSourceUrl";
    /// Fallback when an outcome carries neither status nor description
    pub const UNKNOWN_ERROR: &str = "unknown";
}

/// Display and formatting constants
pub mod display {
    /// Emoji for success status
    pub const SUCCESS_EMOJI: &str = "✅";
    /// Emoji for warning status
    pub const WARNING_EMOJI: &str = "⚠️";
    /// Emoji for file information
    pub const FILE_EMOJI: &str = "📁";
}
