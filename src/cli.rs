// CLI module - command-line argument parsing and handlers
//
// Subcommands:
// - config --show|--path|--reset|--edit: configuration management
// - search <text>: one repository search page, printed to stdout
// - contributors <owner>/<repo>: one contributor page, printed to stdout
//
// No subcommand starts the TUI.

use crate::config::{Config, VERSION};
use crate::github::{GithubClient, RemoteQueryError};
use crate::query::{
    ContributorCoordinator, ContributorList, QueryCoordinator, QuerySource, RepositoryCoordinator,
    RepositorySearch, SelectedRepository,
};
use crate::startup::auth_description;
use anyhow::{anyhow, bail, Context, Result};
use clap::{Parser, Subcommand};
use std::io::Write;
use std::process::Command;
use std::time::Duration;

/// repo-scout - browse GitHub repositories and their contributors
#[derive(Parser)]
#[command(name = "repo-scout")]
#[command(version = VERSION)]
#[command(about = "Browse GitHub repositories and their contributors", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Manage configuration
    Config {
        /// Show effective configuration
        #[arg(long)]
        show: bool,

        /// Reset config file to defaults
        #[arg(long)]
        reset: bool,

        /// Open config file in $EDITOR
        #[arg(long)]
        edit: bool,

        /// Show config file path
        #[arg(long)]
        path: bool,
    },

    /// Search repositories by name and print one page
    Search {
        /// Name fragment (multiple words are joined with spaces)
        #[arg(required = true)]
        text: Vec<String>,

        /// Page to fetch (100 results per page)
        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },

    /// List contributors of a repository and print one page
    Contributors {
        /// Repository as owner/repo
        repository: String,

        #[arg(long, default_value_t = 1, value_parser = clap::value_parser!(u32).range(1..))]
        page: u32,
    },
}

// ─────────────────────────────────────────────────────────────────────────────
// config
// ─────────────────────────────────────────────────────────────────────────────

pub fn handle_config(show: bool, reset: bool, edit: bool, path: bool) -> Result<()> {
    if path {
        handle_config_path()
    } else if show {
        handle_config_show()
    } else if reset {
        handle_config_reset()
    } else if edit {
        handle_config_edit()
    } else {
        println!("Usage: repo-scout config [--show|--reset|--edit|--path]");
        println!();
        println!("Options:");
        println!("  --show    Display effective configuration");
        println!("  --reset   Reset config file to defaults");
        println!("  --edit    Open config file in $EDITOR");
        println!("  --path    Show config file path");
        Ok(())
    }
}

fn config_path() -> Result<std::path::PathBuf> {
    Config::config_path().ok_or_else(|| anyhow!("Could not determine config path"))
}

fn handle_config_path() -> Result<()> {
    println!("{}", config_path()?.display());
    Ok(())
}

fn handle_config_show() -> Result<()> {
    let config = Config::load()?;

    println!("# Effective configuration (env > file > defaults)");
    println!("# Credential: {}", auth_description(&config));
    println!();
    // Same format as the file; an env token is never printed
    print!("{}", config.to_toml());

    println!();
    let path = config_path()?;
    if path.exists() {
        println!("# Source: {}", path.display());
    } else {
        println!("# Source: defaults (no config file)");
    }
    Ok(())
}

fn handle_config_reset() -> Result<()> {
    let path = config_path()?;

    if path.exists() {
        eprint!(
            "Config file exists at {}. Overwrite? [y/N] ",
            path.display()
        );
        std::io::stderr().flush()?;

        let mut input = String::new();
        std::io::stdin()
            .read_line(&mut input)
            .context("Failed to read confirmation")?;

        if !input.trim().eq_ignore_ascii_case("y") {
            println!("Aborted.");
            return Ok(());
        }
    }

    Config::default()
        .save()
        .with_context(|| format!("Failed to write {}", path.display()))?;

    println!("Config reset to defaults: {}", path.display());
    Ok(())
}

fn handle_config_edit() -> Result<()> {
    let path = config_path()?;

    if !path.exists() {
        Config::ensure_config_exists();
        println!("Created new config file: {}", path.display());
    }

    let editor = std::env::var("EDITOR")
        .or_else(|_| std::env::var("VISUAL"))
        .unwrap_or_else(|_| {
            if cfg!(windows) {
                "notepad".to_string()
            } else {
                "nano".to_string()
            }
        });

    println!("Opening {} with {}", path.display(), editor);

    let status = Command::new(&editor).arg(&path).status().with_context(|| {
        format!("Failed to launch editor '{editor}' (set $EDITOR to your preferred editor)")
    })?;

    if !status.success() {
        bail!("Editor exited with status: {}", status);
    }
    Ok(())
}

// ─────────────────────────────────────────────────────────────────────────────
// One-shot queries
// ─────────────────────────────────────────────────────────────────────────────

/// Drive a coordinator until nothing is scheduled or in flight
async fn settle<S: QuerySource>(coordinator: &mut QueryCoordinator<S>) -> Option<RemoteQueryError> {
    while !coordinator.is_idle() {
        coordinator.advance().await;
    }
    coordinator.last_error().cloned()
}

fn client(config: &Config) -> Result<GithubClient> {
    GithubClient::new(config.api_url.clone(), config.request_timeout())
        .context("Failed to build HTTP client")
}

pub async fn run_search(config: &Config, text: &[String], page: u32) -> Result<()> {
    let text = text.join(" ");
    let source = RepositorySearch::new(client(config)?);

    // No interactive typing to coalesce, so no throttle delay
    let mut coordinator: RepositoryCoordinator =
        QueryCoordinator::with_page(source, config.credential(), text, page, Duration::ZERO);

    if let Some(err) = settle(&mut coordinator).await {
        return Err(err).context("Repository search failed");
    }

    let mut out = std::io::stdout().lock();
    for repo in coordinator.results() {
        writeln!(
            out,
            "{:<48} ★{:<7} {} {}",
            repo.full_name(),
            repo.star_count,
            repo.created_at.format("%Y-%m-%d"),
            repo.description.as_deref().unwrap_or("")
        )?;
    }
    if coordinator.has_next_page() {
        writeln!(out, "# more results: --page {}", page + 1)?;
    }
    Ok(())
}

pub async fn run_contributors(config: &Config, repository: &str, page: u32) -> Result<()> {
    let Some(selected) = SelectedRepository::parse(repository) else {
        bail!("Expected owner/repo, got {:?}", repository);
    };
    let source = ContributorList::new(client(config)?);

    let mut coordinator: ContributorCoordinator = QueryCoordinator::with_page(
        source,
        config.credential(),
        selected.clone(),
        page,
        Duration::ZERO,
    );

    if let Some(err) = settle(&mut coordinator).await {
        return Err(err).with_context(|| format!("Listing contributors of {selected} failed"));
    }

    let mut out = std::io::stdout().lock();
    for contributor in coordinator.results() {
        writeln!(
            out,
            "{:<32} {:<40} {:>6}",
            contributor.label(),
            contributor
                .identity()
                .map(|key| key.to_string())
                .unwrap_or_else(|| "-".to_string()),
            contributor.contributions
        )?;
    }
    if coordinator.has_next_page() {
        writeln!(out, "# more contributors: --page {}", page + 1)?;
    }
    Ok(())
}
