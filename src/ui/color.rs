//! Color and formatting utilities for terminal output

pub struct Colors;

impl Colors {
    pub const RESET: &'static str = "\x1b[0m";
    pub const BOLD: &'static str = "\x1b[1m";

    pub const RED: &'static str = "\x1b[31m";
    pub const GREEN: &'static str = "\x1b[32m";
    pub const YELLOW: &'static str = "\x1b[33m";

    pub const BRIGHT_CYAN: &'static str = "\x1b[96m";
    pub const BRIGHT_WHITE: &'static str = "\x1b[97m";
}

/// Apply color to text if stdout supports it
pub fn colorize(text: &str, color: &str) -> String {
    if supports_formatting() {
        format!("{}{}{}", color, text, Colors::RESET)
    } else {
        text.to_string()
    }
}

/// Check if stdout is a terminal that understands ANSI colors
pub fn supports_formatting() -> bool {
    // Check if colors are explicitly disabled
    if std::env::var("NO_COLOR").is_ok() {
        return false;
    }

    // Disable formatting when running tests
    if cfg!(test) || std::env::var("RUST_TEST_TIME_UNIT").is_ok() {
        return false;
    }

    if !atty::is(atty::Stream::Stdout) {
        return false;
    }

    match std::env::var("TERM") {
        Ok(term) => term != "dumb" && !term.is_empty(),
        Err(_) => false,
    }
}
