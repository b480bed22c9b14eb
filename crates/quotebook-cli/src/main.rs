//! Quotebook CLI
//!
//! Command-line interface for Quotebook - a local-first quote collection.

use std::fs::OpenOptions;
use std::path::PathBuf;
use std::sync::Mutex;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::info;
use tracing_subscriber::EnvFilter;

use quotebook_core::{Config, QuoteError, Session};

mod commands;
mod output;

use output::{Output, OutputFormat};

#[derive(Parser)]
#[command(name = "quotebook")]
#[command(about = "Quotebook - Local-first quote collection")]
#[command(version)]
#[command(propagate_version = true)]
struct Cli {
    /// Output as JSON
    #[arg(long, global = true)]
    json: bool,

    /// Quiet mode - minimal output
    #[arg(short, long, global = true)]
    quiet: bool,

    /// Use a different configuration file
    #[arg(long, global = true, value_name = "PATH")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Show a random quote
    Show {
        /// Switch to this category first
        #[arg(short, long)]
        category: Option<String>,
    },
    /// Add a quote
    Add {
        /// Quote text
        text: String,
        /// Quote category
        #[arg(short, long)]
        category: String,
    },
    /// List quotes
    #[command(alias = "ls")]
    List {
        /// Only quotes in this category
        #[arg(short, long)]
        category: Option<String>,
    },
    /// List categories and mark the selected one
    Categories,
    /// Select the category quotes are drawn from
    Select {
        /// Category name ("all" for every quote)
        category: String,
    },
    /// Export quotes as JSON ("-" for stdout)
    Export {
        /// Output file
        #[arg(default_value = quotebook_core::codec::DEFAULT_EXPORT_FILE)]
        path: PathBuf,
    },
    /// Import quotes from a JSON file
    Import {
        /// JSON file containing an array of quotes
        path: PathBuf,
    },
    /// Sync with the remote endpoint now
    Sync,
    /// Interactive shell with background sync (default)
    Shell,
    /// Show status (data directory, counts, sync settings)
    Status,
    /// Show or set configuration
    Config {
        #[command(subcommand)]
        command: Option<ConfigCommands>,
    },
}

#[derive(Subcommand, Clone)]
enum ConfigCommands {
    /// Show current configuration
    Show,
    /// Set a configuration value
    Set {
        /// Configuration key (data_dir, sync_url, sync_enabled,
        /// sync_interval_secs, sync_timeout_secs, conflict_policy, log_file)
        key: String,
        /// Configuration value
        value: String,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();
    let format = OutputFormat::from_flags(cli.json, cli.quiet);

    if let Err(e) = run(cli, format).await {
        // User errors were already shown by the session
        if !is_reported(&e) {
            Output::new(format).report_failure(&e);
        }
        std::process::exit(1);
    }
    Ok(())
}

async fn run(cli: Cli, format: OutputFormat) -> Result<()> {
    let config_path = cli.config.as_ref();

    // Config commands don't need the store
    if let Some(Commands::Config { command }) = &cli.command {
        let output = Output::new(format);
        return handle_config_command(command.clone(), config_path, &output);
    }

    let config =
        Config::load_with_cli_override(config_path).context("Failed to load configuration")?;
    init_logging(&config);

    let command = cli.command.unwrap_or(Commands::Shell);

    let output = match command {
        Commands::Shell => Output::new(format).interactive(),
        Commands::Add { .. } => Output::new(format).without_renders(),
        _ => Output::new(format),
    };
    let mut session = Session::open(&config, output)?;

    match command {
        Commands::Show { category } => commands::quote::show(&mut session, category),
        Commands::Add { text, category } => {
            commands::quote::add(&mut session, &config, &text, &category).await
        }
        Commands::List { category } => commands::quote::list(&session, category),
        Commands::Categories => commands::category::list(&session),
        Commands::Select { category } => commands::category::select(&session, &category),
        Commands::Export { path } => commands::transfer::export(&session, &path),
        Commands::Import { path } => commands::transfer::import(&mut session, &path),
        Commands::Sync => commands::sync::sync(&mut session, &config).await,
        Commands::Shell => commands::shell::run(&mut session, &config).await,
        Commands::Status => commands::status::show(&session, &config),
        Commands::Config { .. } => unreachable!(), // Handled above
    }
}

fn handle_config_command(
    command: Option<ConfigCommands>,
    config_path: Option<&PathBuf>,
    output: &Output,
) -> Result<()> {
    match command {
        Some(ConfigCommands::Show) | None => commands::config::show(config_path, output),
        Some(ConfigCommands::Set { key, value }) => {
            commands::config::set(key, value, config_path, output)
        }
    }
}

/// User errors are shown by the session's surface before they propagate
fn is_reported(err: &anyhow::Error) -> bool {
    err.downcast_ref::<QuoteError>()
        .is_some_and(QuoteError::is_user_error)
}

/// Initialize logging when QUOTEBOOK_LOG is set
///
/// Logs go to `log_file` when configured, otherwise to stderr.
fn init_logging(config: &Config) {
    let Ok(log_level) = std::env::var("QUOTEBOOK_LOG") else {
        return;
    };

    let env_filter = EnvFilter::new(format!(
        "quotebook_core={},quotebook={}",
        log_level, log_level
    ));

    let builder = tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false);

    // Ignore the error if a subscriber is already installed
    match &config.log_file {
        Some(log_path) => {
            let file = match OpenOptions::new().create(true).append(true).open(log_path) {
                Ok(f) => f,
                Err(e) => {
                    eprintln!("Warning: Could not open log file {:?}: {}", log_path, e);
                    return;
                }
            };
            let _ = builder
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .try_init();
            info!("logging initialized to {:?}", log_path);
        }
        None => {
            let _ = builder.with_writer(std::io::stderr).try_init();
        }
    }
}
