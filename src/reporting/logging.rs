use crate::config::Config;
use crate::core::constants::error_messages;
use crate::core::types::Outcome;
use log::{debug, error, info, warn};

/// Log level for the given verbosity flags; `quiet` wins over `verbose`
pub fn level_for(verbose: bool, quiet: bool) -> log::LevelFilter {
    if quiet {
        log::LevelFilter::Off
    } else if verbose {
        log::LevelFilter::Debug
    } else {
        log::LevelFilter::Warn // Warnings only, the rest needs --verbose
    }
}

/// Initialize the logger with appropriate level based on verbosity
pub fn init_logger(verbose: bool, quiet: bool) {
    let level = level_for(verbose, quiet);

    env_logger::Builder::from_default_env()
        .filter_level(level)
        .format_timestamp(None)
        .format_module_path(false)
        .format_target(false)
        .init();

    debug!("Logger initialized with level: {level:?}");
}

/// Log configuration information
pub fn log_config_info(config: &Config) {
    info!(
        "Configuration: catalog={}, workers={}, timeout={}s, max_attempts={}",
        config.catalog_path(),
        config.workers(),
        config.timeout_duration().as_secs(),
        config.max_attempts()
    );
    info!("Output directory: {}", config.output_dir().display());
    if config.dedup_enabled() {
        info!("dedup=y is reserved and currently has no effect");
    }
}

/// Log catalog loading information
pub fn log_catalog_loaded(origin: &str, entry_count: usize) {
    info!("Loaded {entry_count} book source(s) from {origin}");
}

/// Log the start of a validation pass
pub fn log_pass_start(pass: u32, max_passes: u32, entry_count: usize) {
    info!("Pass {pass}/{max_passes}: probing {entry_count} entries");
}

/// Log the end of a validation pass
pub fn log_pass_complete(pass: u32, newly_good: usize, still_failing: usize) {
    info!("Pass {pass} complete: {newly_good} newly reachable, {still_failing} still failing");
}

/// Log run completion
pub fn log_run_complete(good: usize, errors: usize, passes: u32, duration_ms: u128) {
    if errors == 0 {
        info!("✅ Check complete: {good} reachable after {passes} pass(es) ({duration_ms}ms)");
    } else {
        info!(
            "❌ Check complete: {good} reachable, {errors} unreachable after {passes} pass(es) ({duration_ms}ms)"
        );
    }
}

/// Log individual probe outcomes for debugging
pub fn log_outcome(outcome: &Outcome) {
    let url = &outcome.entry;
    match (outcome.status_code, outcome.description.as_deref()) {
        (Some(status), _) if outcome.success => debug!("✓ {url} -> {status}"),
        (Some(status), _) => debug!("✗ {url} -> {status}"),
        (None, Some(desc)) => debug!("✗ {url} -> {desc}"),
        (None, None) => debug!("? {url} -> {}", error_messages::UNKNOWN_ERROR),
    }
}

/// Log error information
pub fn log_error(message: &str, source: Option<&dyn std::error::Error>) {
    match source {
        Some(err) => error!("{message}: {err}"),
        None => error!("{message}"),
    }
}

/// Log warning information
pub fn log_warning(message: &str) {
    warn!("{message}");
}
