use bookcheck::catalog::{CatalogLoader, LoadCatalog};
use bookcheck::config::{CliConfig, Config};
use bookcheck::core::constants::defaults;
use bookcheck::core::{Entry, Partition};
use bookcheck::reporting::{logging, write_partition};
use bookcheck::ui::output;
use bookcheck::ui::{Cli, ProgressReporter, cli_to_config};
use bookcheck::validation::{CheckEntries, HttpProbe, RetryCoordinator};
use clap::Parser;

use std::time::Instant;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    match run_bookcheck_logic(&cli).await {
        Ok(exit_code) => std::process::exit(exit_code),
        Err(e) => {
            eprintln!("Error: {e}");
            std::process::exit(1);
        }
    }
}

/// Main book source checking logic extracted from main() for testing
pub async fn run_bookcheck_logic(cli: &Cli) -> Result<i32, Box<dyn std::error::Error>> {
    let cli_config = cli_to_config(cli);
    let config = load_and_merge_config(&cli_config)?;

    logging::init_logger(config.verbose.unwrap_or(false), cli_config.quiet);
    logging::log_config_info(&config);

    if !cli_config.quiet {
        output::display_banner();
    }

    let loader = CatalogLoader::new(config.timeout_duration());
    let entries = loader
        .load_catalog(config.catalog_path())
        .await
        .inspect_err(|e| logging::log_error("Could not load catalog", Some(e)))?;
    logging::log_catalog_loaded(config.catalog_path(), entries.len());
    if entries.is_empty() {
        logging::log_warning(&format!(
            "Catalog '{}' has no book sources to check",
            config.catalog_path()
        ));
    }

    if !cli_config.quiet {
        output::display_config_info(&config, entries.len());
    }

    let start = Instant::now();
    let partition = check_entries(&config, &cli_config, entries).await?;
    let elapsed = start.elapsed();

    let files = write_partition(&partition, &config.output_dir())
        .inspect_err(|e| logging::log_error("Could not write results", Some(e)))?;

    logging::log_run_complete(
        partition.good.len(),
        partition.error.len(),
        partition.passes,
        elapsed.as_millis(),
    );
    output::display_summary(&partition, elapsed, &files);

    Ok(0)
}

/// Load configuration from the config file and merge with CLI config
pub fn load_and_merge_config(cli_config: &CliConfig) -> Result<Config, Box<dyn std::error::Error>> {
    let config_file = cli_config
        .config_file
        .as_deref()
        .unwrap_or(defaults::CONFIG_FILE);

    let mut config = Config::load_from_file(config_file).inspect_err(|e| {
        logging::log_error(
            &format!("Could not load config file '{config_file}'"),
            Some(e),
        );
    })?;

    // Merge CLI arguments with configuration (CLI takes precedence)
    config.merge_with_cli(cli_config);
    Ok(config)
}

/// Run every pass over the catalog, with a progress bar when stderr is a terminal
pub async fn check_entries(
    config: &Config,
    cli_config: &CliConfig,
    entries: Vec<Entry>,
) -> Result<Partition, Box<dyn std::error::Error>> {
    let probe = HttpProbe::from_config(config)?;
    let coordinator = RetryCoordinator::from_config(probe, config);

    let show_progress =
        !cli_config.quiet && !cli_config.no_progress && atty::is(atty::Stream::Stderr);
    let mut progress = ProgressReporter::new(show_progress);

    let partition = coordinator.check_all(entries, Some(&mut progress)).await;
    progress.finish_and_clear();

    Ok(partition)
}
