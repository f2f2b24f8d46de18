// repo-scout - GitHub repository and contributor browser
//
// Search repositories by name, page through results, and drill into the
// contributors of any repository, from a terminal UI or one-shot commands.
//
// Architecture:
// - GitHub client (reqwest): typed search and contributor endpoints
// - Query coordinator: throttled, paginated fetches with a stale-response guard
// - TUI (ratatui): repository search and contributor list behind a mode switch
// - CLI (clap): config management and one-shot search/contributors commands

mod cli;
mod config;
mod github;
mod logging;
mod query;
mod startup;
mod tui;

use anyhow::Result;
use clap::Parser;
use cli::{Cli, Commands};
use config::{Config, LogRotation, LoggingConfig};
use logging::{LogBuffer, TuiLogLayer};
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Where human-readable log lines go
enum LogSink {
    /// Captured into the TUI log strip (stdout belongs to the terminal UI)
    Tui(LogBuffer),
    /// Plain fmt output on stderr, so stdout stays clean for results
    Stderr,
}

/// Initialize tracing
///
/// Precedence: RUST_LOG env var > config file > default "info".
/// File logging writes JSON lines next to the primary sink; the returned
/// guard must live until exit so buffered lines get flushed.
fn init_tracing(logging: &LoggingConfig, sink: LogSink) -> Option<WorkerGuard> {
    let default_filter = format!("repo_scout={}", logging.level);
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into());

    let (tui_layer, stderr_layer) = match sink {
        LogSink::Tui(buffer) => (Some(TuiLogLayer::new(buffer)), None),
        LogSink::Stderr => (
            None,
            Some(tracing_subscriber::fmt::layer().with_writer(std::io::stderr)),
        ),
    };

    let (file_layer, guard) = match file_writer(logging) {
        Some((writer, guard)) => (
            Some(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_writer(writer)
                    .with_ansi(false),
            ),
            Some(guard),
        ),
        None => (None, None),
    };

    tracing_subscriber::registry()
        .with(filter)
        .with(tui_layer)
        .with(stderr_layer)
        .with(file_layer)
        .init();

    guard
}

/// Rolling, non-blocking file writer when file logging is enabled
fn file_writer(
    logging: &LoggingConfig,
) -> Option<(tracing_appender::non_blocking::NonBlocking, WorkerGuard)> {
    if !logging.file_enabled {
        return None;
    }
    if let Err(e) = std::fs::create_dir_all(&logging.file_dir) {
        eprintln!(
            "Warning: Could not create log directory {:?}: {}",
            logging.file_dir, e
        );
        return None;
    }

    let appender = match logging.file_rotation {
        LogRotation::Hourly => {
            tracing_appender::rolling::hourly(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Daily => {
            tracing_appender::rolling::daily(&logging.file_dir, &logging.file_prefix)
        }
        LogRotation::Never => {
            tracing_appender::rolling::never(&logging.file_dir, &logging.file_prefix)
        }
    };
    Some(tracing_appender::non_blocking(appender))
}

/// Config and stderr logging for the one-shot commands
fn one_shot_setup() -> Result<(Config, Option<WorkerGuard>)> {
    let config = Config::load()?;
    let guard = init_tracing(&config.logging, LogSink::Stderr);
    Ok((config, guard))
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config {
            show,
            reset,
            edit,
            path,
        }) => cli::handle_config(show, reset, edit, path),

        Some(Commands::Search { text, page }) => {
            let (config, _file_guard) = one_shot_setup()?;
            cli::run_search(&config, &text, page).await
        }

        Some(Commands::Contributors { repository, page }) => {
            let (config, _file_guard) = one_shot_setup()?;
            cli::run_contributors(&config, &repository, page).await
        }

        None => {
            // Ensure config template exists (helps users discover options)
            Config::ensure_config_exists();
            let config = Config::load()?;

            let log_buffer = LogBuffer::new();
            let _file_guard = init_tracing(&config.logging, LogSink::Tui(log_buffer.clone()));

            startup::print_startup(&config);
            startup::log_startup(&config);

            tracing::info!("Starting TUI");
            let result = tui::run_tui(&config, log_buffer).await;
            if let Err(e) = &result {
                tracing::error!("TUI error: {:?}", e);
            }
            tracing::info!("Shutdown complete");
            result
        }
    }
}
