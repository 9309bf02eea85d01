//! Output formatting and display logic for bookcheck

use std::time::Duration;

use crate::config::Config;
use crate::core::constants::display;
use crate::core::types::Partition;
use crate::reporting::results::ResultFiles;
use crate::ui::color::{Colors, colorize};

/// Startup banner with name and version
pub fn banner() -> String {
    format!(
        "Welcome to {} v{}, the book source checker",
        env!("CARGO_PKG_NAME"),
        env!("CARGO_PKG_VERSION")
    )
}

pub fn display_banner() {
    println!("{}\n", colorize(&banner(), Colors::BOLD));
}

fn labeled(label: &str, value: &str) -> String {
    format!(
        "{}: {}",
        colorize(label, Colors::BRIGHT_CYAN),
        colorize(value, Colors::BRIGHT_WHITE)
    )
}

/// Display configuration information in a user-friendly format
pub fn display_config_info(config: &Config, entry_count: usize) {
    println!("{}", labeled("Catalog", config.catalog_path()));
    println!("{}", labeled("Book sources", &entry_count.to_string()));
    println!("{}", labeled("Workers", &config.workers().to_string()));
    println!(
        "{}",
        labeled(
            "Timeout (seconds)",
            &config.timeout_duration().as_secs().to_string()
        )
    );
    println!(
        "{}",
        labeled("Max attempts", &config.max_attempts().to_string())
    );
    println!();
}

/// Human readable run summary, one line per item
pub fn format_summary(
    partition: &Partition,
    elapsed: Duration,
    finished_at: &str,
    files: &ResultFiles,
) -> Vec<String> {
    vec![
        format!(
            "Check complete in {:.2} seconds ({} pass(es), finished {})",
            elapsed.as_secs_f64(),
            partition.passes,
            finished_at
        ),
        format!("Valid book sources: {}", partition.good.len()),
        format!("Invalid book sources: {}", partition.error.len()),
        format!(
            "Valid and invalid book sources were written to {} and {}",
            files.good.display(),
            files.error.display()
        ),
    ]
}

/// Print the run summary to stdout
pub fn display_summary(partition: &Partition, elapsed: Duration, files: &ResultFiles) {
    let finished_at = chrono::Local::now().format("%Y-%m-%d %H:%M:%S").to_string();
    let lines = format_summary(partition, elapsed, &finished_at, files);

    let status = if partition.error.is_empty() {
        colorize(display::SUCCESS_EMOJI, Colors::GREEN)
    } else {
        colorize(display::WARNING_EMOJI, Colors::YELLOW)
    };

    println!();
    println!("{status} {}", lines[0]);
    println!("{}", colorize(&lines[1], Colors::GREEN));
    println!("{}", colorize(&lines[2], Colors::RED));
    println!("{} {}", display::FILE_EMOJI, lines[3]);
}
