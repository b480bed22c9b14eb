//! Output formatting for CLI
//!
//! Provides consistent output formatting across all commands:
//! - Human-readable default output
//! - JSON output (--json flag)
//! - Quiet mode for scripting (--quiet flag)
//!
//! `Output` is also the `Surface` the session renders to.

use quotebook_core::{Quote, QuoteError, StorageError, Surface};

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable output (default)
    Human,
    /// JSON output
    Json,
    /// Quiet mode - minimal output
    Quiet,
}

impl OutputFormat {
    /// Create format from CLI flags
    pub fn from_flags(json: bool, quiet: bool) -> Self {
        if quiet {
            OutputFormat::Quiet
        } else if json {
            OutputFormat::Json
        } else {
            OutputFormat::Human
        }
    }
}

/// Output helper for consistent formatting
pub struct Output {
    /// The output format
    pub format: OutputFormat,
    /// Whether category lists pushed by the session are printed
    ///
    /// Only the interactive shell wants them; one-shot commands print
    /// categories on request.
    pub echo_categories: bool,
    /// Whether quotes rendered by the session are printed
    pub echo_quotes: bool,
}

impl Output {
    pub fn new(format: OutputFormat) -> Self {
        Self {
            format,
            echo_categories: false,
            echo_quotes: true,
        }
    }

    /// Print category lists whenever the session refreshes them
    pub fn interactive(mut self) -> Self {
        self.echo_categories = true;
        self
    }

    /// Skip the quote the session re-renders after a change
    ///
    /// For commands that report their own result, so `--json` output
    /// stays a single document.
    pub fn without_renders(mut self) -> Self {
        self.echo_quotes = false;
        self
    }

    /// Check if output is in quiet mode
    pub fn is_quiet(&self) -> bool {
        matches!(self.format, OutputFormat::Quiet)
    }

    /// Check if output is JSON
    pub fn is_json(&self) -> bool {
        matches!(self.format, OutputFormat::Json)
    }

    /// Print a single quote
    pub fn print_quote(&self, quote: &Quote) {
        match self.format {
            OutputFormat::Human => {
                println!("\u{201c}{}\u{201d}", quote.text);
                println!("    ({})", quote.category);
            }
            OutputFormat::Json => print_json(quote),
            OutputFormat::Quiet => println!("{}", quote.text),
        }
    }

    /// Print a list of quotes
    pub fn print_quotes(&self, quotes: &[&Quote]) {
        match self.format {
            OutputFormat::Human => {
                if quotes.is_empty() {
                    println!("No quotes found.");
                    return;
                }
                for quote in quotes {
                    println!(
                        "{:>13} | {} | {}",
                        quote.id,
                        truncate(&quote.category, 15),
                        truncate(&quote.text, 60)
                    );
                }
                println!("\n{} quote(s)", quotes.len());
            }
            OutputFormat::Json => print_json(&quotes),
            OutputFormat::Quiet => {
                for quote in quotes {
                    println!("{}", quote.id);
                }
            }
        }
    }

    /// Print the category list, marking the selected one
    pub fn print_categories(&self, categories: &[String], selected: &str) {
        match self.format {
            OutputFormat::Human => {
                for category in categories {
                    let marker = if category == selected { "*" } else { " " };
                    println!("{} {}", marker, category);
                }
            }
            OutputFormat::Json => {
                print_json(&serde_json::json!({
                    "categories": categories,
                    "selected": selected
                }));
            }
            OutputFormat::Quiet => {
                for category in categories {
                    println!("{}", category);
                }
            }
        }
    }

    /// Print a success message
    pub fn success(&self, message: &str) {
        match self.format {
            OutputFormat::Human => println!("✓ {}", message),
            OutputFormat::Json => {
                println!(
                    "{}",
                    serde_json::json!({"status": "success", "message": message})
                );
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print an informational message
    pub fn message(&self, msg: &str) {
        match self.format {
            OutputFormat::Human => println!("{}", msg),
            OutputFormat::Json => {
                println!("{}", serde_json::json!({"message": msg}));
            }
            OutputFormat::Quiet => {}
        }
    }

    /// Print a newly added quote
    pub fn added(&self, quote: &Quote) {
        match self.format {
            OutputFormat::Human => println!("✓ Added quote {}", quote.id),
            OutputFormat::Json => print_json(&added_json(quote)),
            OutputFormat::Quiet => println!("{}", quote.id),
        }
    }

    /// Print an error message to stderr
    pub fn error(&self, msg: &str) {
        match self.format {
            OutputFormat::Json => {
                eprintln!("{}", serde_json::json!({"status": "error", "message": msg}));
            }
            _ => eprintln!("✗ {}", msg),
        }
    }

    /// Print a failed command, with a hint when storage was the cause
    pub fn report_failure(&self, err: &anyhow::Error) {
        let storage = storage_cause(err);
        let hint = storage.and_then(StorageError::recovery_suggestion);
        let untouched = storage.is_some_and(StorageError::is_recoverable);

        match self.format {
            OutputFormat::Json => {
                eprintln!(
                    "{}",
                    serde_json::json!({
                        "status": "error",
                        "message": format!("{:#}", err),
                        "hint": hint,
                        "saved_quotes_untouched": storage.map(|_| untouched)
                    })
                );
            }
            _ => {
                eprintln!("✗ {:#}", err);
                if let Some(hint) = hint {
                    eprintln!("  {}", hint);
                }
                if untouched {
                    eprintln!("  Your saved quotes were not changed.");
                }
            }
        }
    }
}

/// The storage error behind a failure, if there is one
///
/// `QuoteError::Storage` is transparent, so it has to be unwrapped by hand
/// rather than found in the source chain.
fn storage_cause(err: &anyhow::Error) -> Option<&StorageError> {
    err.chain().find_map(|cause| {
        if let Some(QuoteError::Storage(storage)) = cause.downcast_ref::<QuoteError>() {
            return Some(storage);
        }
        cause.downcast_ref::<StorageError>()
    })
}

fn added_json(quote: &Quote) -> serde_json::Value {
    serde_json::json!({"status": "success", "quote": quote})
}

impl Surface for Output {
    fn show_quote(&self, quote: &Quote) {
        if self.echo_quotes {
            self.print_quote(quote);
        }
    }

    fn show_empty(&self, category: &str) {
        if !self.echo_quotes {
            return;
        }
        match self.format {
            OutputFormat::Human => {
                println!("No quotes available in category '{}'.", category);
            }
            OutputFormat::Json => {
                print_json(&serde_json::json!({"status": "empty", "category": category}));
            }
            OutputFormat::Quiet => {}
        }
    }

    fn show_categories(&self, categories: &[String], selected: &str) {
        if self.echo_categories {
            self.print_categories(categories, selected);
        }
    }

    fn notify(&self, message: &str) {
        self.success(message);
    }

    fn report_error(&self, message: &str) {
        self.error(message);
    }
}

fn print_json<T: serde::Serialize + ?Sized>(value: &T) {
    match serde_json::to_string_pretty(value) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("✗ Failed to encode output: {}", e),
    }
}

/// Truncate a string to max characters, adding "..." if truncated
fn truncate(s: &str, max_len: usize) -> String {
    if s.chars().count() <= max_len {
        s.to_string()
    } else {
        let kept: String = s.chars().take(max_len.saturating_sub(3)).collect();
        format!("{}...", kept)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io;
    use std::path::PathBuf;

    #[test]
    fn test_format_from_flags() {
        assert_eq!(OutputFormat::from_flags(false, false), OutputFormat::Human);
        assert_eq!(OutputFormat::from_flags(true, false), OutputFormat::Json);
        assert_eq!(OutputFormat::from_flags(false, true), OutputFormat::Quiet);
        // Quiet takes precedence
        assert_eq!(OutputFormat::from_flags(true, true), OutputFormat::Quiet);
    }

    #[test]
    fn test_interactive_echoes_categories() {
        let output = Output::new(OutputFormat::Human);
        assert!(!output.echo_categories);
        assert!(output.interactive().echo_categories);
    }

    #[test]
    fn test_without_renders_mutes_session_quotes() {
        let output = Output::new(OutputFormat::Json);
        assert!(output.echo_quotes);
        assert!(!output.without_renders().echo_quotes);
    }

    #[test]
    fn test_added_json_is_one_document() {
        let quote = Quote::new(42, "Stay hungry", "Life");
        assert_eq!(
            added_json(&quote),
            serde_json::json!({
                "status": "success",
                "quote": {"id": 42, "text": "Stay hungry", "category": "Life"}
            })
        );
    }

    #[test]
    fn test_storage_cause_through_context() {
        let err = anyhow::Error::from(QuoteError::Storage(StorageError::DiskFull {
            path: PathBuf::from("/data/quotes.tmp"),
            source: io::Error::new(io::ErrorKind::Other, "No space left on device"),
        }))
        .context("Failed to add quote");

        let storage = storage_cause(&err).unwrap();
        assert!(matches!(storage, StorageError::DiskFull { .. }));
        assert!(storage.recovery_suggestion().is_some());
    }

    #[test]
    fn test_storage_cause_direct() {
        let err = anyhow::Error::from(StorageError::InvalidFormat {
            key: "quotes".to_string(),
            details: "trailing comma".to_string(),
        });
        assert!(storage_cause(&err).is_some());
    }

    #[test]
    fn test_storage_cause_absent() {
        assert!(storage_cause(&anyhow::anyhow!("network down")).is_none());
        assert!(storage_cause(&QuoteError::EmptyText.into()).is_none());
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("short", 10), "short");
        assert_eq!(truncate("this is a long string", 10), "this is...");
    }

    #[test]
    fn test_truncate_multibyte() {
        assert_eq!(truncate("you’re busy making plans", 8), "you’r...");
    }
}
