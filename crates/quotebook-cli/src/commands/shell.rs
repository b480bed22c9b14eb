//! Interactive shell
//!
//! Reads commands from stdin while the sync poller ticks in the background.
//! Both are handled by one `select!` loop, so user edits and sync merges
//! never touch the session at the same time.

use std::io::Write;
use std::path::PathBuf;

use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

use quotebook_core::codec::DEFAULT_EXPORT_FILE;
use quotebook_core::sync::{
    push_and_log, spawn_sync_poller, HttpRemote, PollerHandle, SyncEngine, SyncEvent,
};
use quotebook_core::{Config, Session};

use crate::output::Output;

const HELP: &str = "\
Commands:
  next                     show another random quote
  add <category> | <text>  add a quote
  filter <category>        show quotes from one category (\"all\" for every quote)
  categories               list categories
  last                     show the last quote again
  export [path]            export quotes as JSON (default quotes.json)
  import <path>            import quotes from a JSON file
  sync                     sync with the server now
  help                     show this help
  quit                     leave the shell";

/// A parsed shell line
#[derive(Debug, PartialEq, Eq)]
enum ShellCommand {
    Next,
    Add { category: String, text: String },
    Filter(String),
    Categories,
    Last,
    Export(PathBuf),
    Import(PathBuf),
    Sync,
    Help,
    Quit,
    Empty,
    Unknown(String),
}

fn parse_line(line: &str) -> ShellCommand {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    match word {
        "" => ShellCommand::Empty,
        "next" | "n" => ShellCommand::Next,
        "add" => match rest.split_once('|') {
            Some((category, text)) => ShellCommand::Add {
                category: category.trim().to_string(),
                text: text.trim().to_string(),
            },
            // Let validation report the missing field
            None => ShellCommand::Add {
                category: rest.to_string(),
                text: String::new(),
            },
        },
        "filter" | "f" if !rest.is_empty() => ShellCommand::Filter(rest.to_string()),
        "categories" | "c" => ShellCommand::Categories,
        "last" => ShellCommand::Last,
        "export" if rest.is_empty() => ShellCommand::Export(PathBuf::from(DEFAULT_EXPORT_FILE)),
        "export" => ShellCommand::Export(PathBuf::from(rest)),
        "import" if !rest.is_empty() => ShellCommand::Import(PathBuf::from(rest)),
        "sync" => ShellCommand::Sync,
        "help" | "?" => ShellCommand::Help,
        "quit" | "exit" | "q" => ShellCommand::Quit,
        _ => ShellCommand::Unknown(line.to_string()),
    }
}

/// Run the interactive shell until `quit` or end of input
pub async fn run(session: &mut Session<Output>, config: &Config) -> Result<()> {
    let mut engine = match config.sync_target() {
        Some(url) => Some(SyncEngine::new(HttpRemote::new(url, config.sync_timeout())?)),
        None => None,
    };
    let mut poller = engine
        .as_ref()
        .map(|_| spawn_sync_poller(config.sync_interval()));

    session.populate_categories();
    session.new_quote()?;
    if !session.surface().is_quiet() {
        println!("Type 'help' for commands.");
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut show_prompt = true;

    loop {
        if show_prompt {
            prompt(session.surface())?;
            show_prompt = false;
        }

        tokio::select! {
            event = next_tick(poller.as_mut()) => {
                if let (Some(SyncEvent::Tick), Some(engine)) = (event, engine.as_mut()) {
                    // Failures are logged by the engine; the next tick retries
                    if let Ok(report) = engine.run_cycle(session).await {
                        show_prompt = report.changed();
                    }
                }
            }
            line = lines.next_line() => {
                show_prompt = true;
                let Some(line) = line.context("Failed to read input")? else {
                    // End of input
                    break;
                };
                match parse_line(&line) {
                    ShellCommand::Quit => break,
                    command => execute(command, session, engine.as_mut()).await,
                }
            }
        }
    }

    if let Some(poller) = &poller {
        poller.shutdown().await;
    }
    debug!("shell closed");
    Ok(())
}

/// Wait for the next poller event, or forever when sync is off
async fn next_tick(poller: Option<&mut PollerHandle>) -> Option<SyncEvent> {
    match poller {
        Some(handle) => handle.event_rx.recv().await,
        None => std::future::pending().await,
    }
}

/// Run one shell command
///
/// Errors are shown and the shell keeps going.
async fn execute(
    command: ShellCommand,
    session: &mut Session<Output>,
    engine: Option<&mut SyncEngine<HttpRemote>>,
) {
    let result: Result<()> = match command {
        ShellCommand::Next => session.new_quote().map(drop).map_err(Into::into),
        ShellCommand::Add { category, text } => match session.add_quote(&text, &category) {
            Ok(quote) => {
                if let Some(engine) = engine {
                    // Fire and forget; the shell doesn't wait for the server
                    let remote = engine.remote().clone();
                    tokio::spawn(async move { push_and_log(&remote, &quote).await });
                }
                Ok(())
            }
            Err(e) => Err(e.into()),
        },
        ShellCommand::Filter(category) => {
            session.filter_quotes(&category).map(drop).map_err(Into::into)
        }
        ShellCommand::Categories => {
            session.populate_categories();
            Ok(())
        }
        ShellCommand::Last => {
            session.show_last();
            Ok(())
        }
        ShellCommand::Export(path) => session.export_to_file(&path).map_err(Into::into),
        ShellCommand::Import(path) => session.import_file(&path).map(drop).map_err(Into::into),
        ShellCommand::Sync => match engine {
            Some(engine) => engine.run_cycle(session).await.map(|report| {
                if !report.changed() {
                    session.surface().message("Already up to date.");
                }
            }),
            None => {
                session
                    .surface()
                    .message("Sync is disabled. Enable it with: quotebook config set sync_enabled true");
                Ok(())
            }
        },
        ShellCommand::Help => {
            session.surface().message(HELP);
            Ok(())
        }
        ShellCommand::Unknown(line) => {
            session
                .surface()
                .error(&format!("Unknown command '{}'. Type 'help' for commands.", line));
            Ok(())
        }
        ShellCommand::Empty | ShellCommand::Quit => Ok(()),
    };

    if let Err(e) = result {
        // User errors were already shown by the session
        let reported = e
            .downcast_ref::<quotebook_core::QuoteError>()
            .is_some_and(quotebook_core::QuoteError::is_user_error);
        if !reported {
            session.surface().report_failure(&e);
        }
    }
}

fn prompt(output: &Output) -> Result<()> {
    if output.is_quiet() || output.is_json() {
        return Ok(());
    }
    print!("> ");
    std::io::stdout().flush().context("Failed to write prompt")
}
