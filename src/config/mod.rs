//! Configuration management
//!
//! This module handles loading the run configuration from a JSON (or TOML)
//! file and merging the few settings that can also come from the CLI.

use serde::{Deserialize, Deserializer, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::constants::{defaults, headers, timeouts};
use crate::core::error::{BookCheckError, Result};

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Local file path or URL of the book source catalog
    pub path: Option<String>,

    /// Number of concurrent probes
    #[serde(default, deserialize_with = "deserialize_count")]
    pub workers: Option<usize>,

    /// Reserved: only "y" switches it on. Parsed and reported, never acted upon
    pub dedup: Option<String>,

    /// Directory receiving good.json and error.json
    pub outpath: Option<String>,

    /// Timeout in seconds for a single probe
    pub timeout: Option<u64>,

    /// Number of passes over entries that are still failing
    pub max_attempts: Option<u32>,

    /// Custom User-Agent header
    pub user_agent: Option<String>,

    /// Enable verbose logging
    pub verbose: Option<bool>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            path: None, // Required, must come from the config file
            workers: Some(defaults::WORKERS),
            dedup: Some(defaults::DEDUP.to_string()),
            outpath: Some(defaults::OUTPATH.to_string()),
            timeout: Some(timeouts::DEFAULT_TIMEOUT_SECONDS),
            max_attempts: Some(defaults::MAX_ATTEMPTS),
            user_agent: None, // Mobile browser user agent
            verbose: Some(false),
        }
    }
}

/// Accept both `5` and `"5"`, since hand-edited configs use either.
fn deserialize_count<'de, D>(deserializer: D) -> std::result::Result<Option<usize>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum NumberOrString {
        Number(usize),
        Text(String),
    }

    match Option::<NumberOrString>::deserialize(deserializer)? {
        None => Ok(None),
        Some(NumberOrString::Number(count)) => Ok(Some(count)),
        Some(NumberOrString::Text(text)) => text
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| serde::de::Error::custom(format!("'{text}' is not a whole number"))),
    }
}

impl Config {
    /// Load configuration from file.
    ///
    /// Files ending in `.toml` are parsed as TOML, everything else as JSON.
    /// Keys missing from the file keep their default values.
    pub fn load_from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            BookCheckError::Config(format!(
                "Could not read config file '{}': {}",
                path.display(),
                e
            ))
        })?;

        let is_toml = path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext.eq_ignore_ascii_case("toml"));

        let parsed: Config = if is_toml {
            toml::from_str(&content).map_err(|e| {
                BookCheckError::Config(format!(
                    "Invalid TOML in config file '{}': {}",
                    path.display(),
                    e
                ))
            })?
        } else {
            serde_json::from_str(&content).map_err(|e| {
                BookCheckError::Config(format!(
                    "Invalid JSON in config file '{}': {}",
                    path.display(),
                    e
                ))
            })?
        };

        let config = parsed.with_defaults();
        config.validate()?;
        Ok(config)
    }

    /// Fill every unset option with its default value.
    fn with_defaults(self) -> Self {
        let defaults = Self::default();
        Self {
            path: self.path,
            workers: self.workers.or(defaults.workers),
            dedup: self.dedup.or(defaults.dedup),
            outpath: self.outpath.or(defaults.outpath),
            timeout: self.timeout.or(defaults.timeout),
            max_attempts: self.max_attempts.or(defaults.max_attempts),
            user_agent: self.user_agent.or(defaults.user_agent),
            verbose: self.verbose.or(defaults.verbose),
        }
    }

    /// Merge this config with CLI arguments (CLI takes precedence)
    pub fn merge_with_cli(&mut self, cli_config: &CliConfig) {
        if cli_config.verbose {
            self.verbose = Some(true);
        }
    }

    /// Catalog location; empty until a validated config provides one
    pub fn catalog_path(&self) -> &str {
        self.path.as_deref().map(str::trim).unwrap_or_default()
    }

    /// Number of concurrent probes
    pub fn workers(&self) -> usize {
        self.workers.unwrap_or(defaults::WORKERS)
    }

    /// Whether the reserved dedup flag is switched on
    pub fn dedup_enabled(&self) -> bool {
        self.dedup
            .as_deref()
            .is_some_and(|flag| flag.trim().eq_ignore_ascii_case("y"))
    }

    /// Output directory, an empty value meaning the working directory
    pub fn output_dir(&self) -> PathBuf {
        match self.outpath.as_deref().map(str::trim) {
            Some(dir) if !dir.is_empty() => PathBuf::from(dir),
            _ => PathBuf::from(defaults::OUTPATH),
        }
    }

    /// Get timeout as Duration
    pub fn timeout_duration(&self) -> Duration {
        Duration::from_secs(self.timeout.unwrap_or(timeouts::DEFAULT_TIMEOUT_SECONDS))
    }

    /// Number of passes the retry coordinator may run
    pub fn max_attempts(&self) -> u32 {
        self.max_attempts.unwrap_or(defaults::MAX_ATTEMPTS)
    }

    /// User agent sent with every probe
    pub fn user_agent(&self) -> &str {
        self.user_agent
            .as_deref()
            .unwrap_or(headers::MOBILE_USER_AGENT)
    }

    /// Validate configuration values
    pub fn validate(&self) -> Result<()> {
        if self.catalog_path().is_empty() {
            return Err(BookCheckError::Config(
                "Missing required field 'path'. Expected a catalog file path or URL.".to_string(),
            ));
        }

        if let Some(workers) = self.workers {
            if workers == 0 {
                return Err(BookCheckError::Config(
                    "Worker count cannot be 0. Expected a positive integer.".to_string(),
                ));
            }
            if workers > 1000 {
                return Err(BookCheckError::Config(format!(
                    "Worker count of {workers} is extremely high and may cause system instability. Consider using a smaller value."
                )));
            }
        }

        if let Some(timeout) = self.timeout {
            if timeout == 0 {
                return Err(BookCheckError::Config(
                    "Timeout cannot be 0. Expected a positive integer representing seconds."
                        .to_string(),
                ));
            }
            if timeout > timeouts::MAX_TIMEOUT_SECONDS {
                return Err(BookCheckError::Config(format!(
                    "Timeout of {timeout} seconds is extremely large (>1 hour). Consider using a smaller value."
                )));
            }
        }

        if self.max_attempts == Some(0) {
            return Err(BookCheckError::Config(
                "max_attempts cannot be 0. Expected at least one pass.".to_string(),
            ));
        }

        Ok(())
    }
}

/// Options that can come from the CLI
#[derive(Debug, Default)]
pub struct CliConfig {
    pub config_file: Option<String>, // --config
    pub verbose: bool,               // --verbose
    pub quiet: bool,                 // --quiet
    pub no_progress: bool,           // --no-progress
}
