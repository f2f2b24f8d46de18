// Startup module - banner and boot lines
//
// The banner goes to stdout before the TUI takes the screen. The same facts
// are repeated into the log strip once tracing is up.

use crate::config::{Config, TokenSource, VERSION};

/// ANSI color codes for terminal output
mod colors {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const CYAN: &str = "\x1b[36m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const MAGENTA: &str = "\x1b[35m";
}

/// Human description of the credential in use
pub fn auth_description(config: &Config) -> &'static str {
    match config.token_source {
        TokenSource::Env => "authenticated (GITHUB_TOKEN)",
        TokenSource::File => "authenticated (config file)",
        TokenSource::None => "anonymous",
    }
}

/// Print the startup banner
pub fn print_startup(config: &Config) {
    use colors::*;

    println!();
    println!("  {BOLD}{CYAN}repo-scout{RESET} {DIM}v{VERSION}{RESET}");
    println!("  {DIM}GitHub repository and contributor browser{RESET}");
    println!();

    if let Some(path) = Config::config_path() {
        if path.exists() {
            println!("  {DIM}Config:{RESET} {GREEN}✓{RESET} {}", path.display());
        } else {
            println!("  {DIM}Config:{RESET} {DIM}(using defaults){RESET}");
        }
    }

    println!("  {MAGENTA}▸{RESET} API {BOLD}{}{RESET}", config.api_url);
    if config.token_source == TokenSource::None {
        println!(
            "  {YELLOW}▸{RESET} {YELLOW}{}{RESET} {DIM}(set GITHUB_TOKEN for higher rate limits){RESET}",
            auth_description(config)
        );
    } else {
        println!("  {GREEN}▸{RESET} {}", auth_description(config));
    }
    println!();
}

/// Print startup messages to the TUI log strip
pub fn log_startup(config: &Config) {
    tracing::info!("repo-scout v{}", VERSION);
    tracing::info!("▸ API {} ({})", config.api_url, auth_description(config));
    tracing::info!(
        "▸ Throttle {} ms, initial query {:?}",
        config.throttle_ms,
        config.initial_query
    );
}
