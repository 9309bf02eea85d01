// Command-line interface definitions and parsing for bookcheck

use crate::config::CliConfig;
use crate::core::constants::defaults;
use clap::Parser;

/// Check which book sources in a catalog are still reachable.
///
/// Everything about the run (catalog, workers, output directory) comes from
/// the config file; the flags below only affect how the run is displayed.
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Config file (JSON, or TOML when the name ends in .toml)
    #[arg(long, value_name = "FILE", default_value = defaults::CONFIG_FILE)]
    pub config: String,

    /// Suppress progress output
    #[arg(short = 'q', long)]
    pub quiet: bool,

    /// Enable verbose logging
    #[arg(short = 'v', long)]
    pub verbose: bool,

    /// Disable progress bars
    #[arg(long)]
    pub no_progress: bool,
}

/// Convert the parsed CLI into the options merged into the configuration
pub fn cli_to_config(cli: &Cli) -> CliConfig {
    CliConfig {
        config_file: Some(cli.config.clone()),
        verbose: cli.verbose,
        quiet: cli.quiet,
        no_progress: cli.no_progress,
    }
}
