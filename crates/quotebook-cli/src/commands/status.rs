//! Status command handler

use anyhow::Result;

use quotebook_core::{categories, Config, Session};

use crate::output::{Output, OutputFormat};

/// Show status information
pub fn show(session: &Session<Output>, config: &Config) -> Result<()> {
    let store = session.store();
    let category_count = categories::categories(store).len() - 1;
    let selected = session.selected_category();

    match session.surface().format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "counts": {
                        "quotes": store.len(),
                        "categories": category_count
                    },
                    "selected_category": selected,
                    "defaults": store.is_seeded(),
                    "sync": {
                        "enabled": config.sync_enabled,
                        "url": config.sync_url,
                        "interval_secs": config.sync_interval().as_secs(),
                        "conflict_policy": config.conflict_policy.to_string()
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", store.len());
        }
        OutputFormat::Human => {
            println!("Quotebook Status");
            println!("================");
            println!();
            println!("Storage:");
            println!("  Location: {}", config.data_dir.display());
            if store.is_seeded() {
                println!("  (nothing saved yet, showing built-in quotes)");
            }
            println!();
            println!("Contents:");
            println!("  Quotes:     {}", store.len());
            println!("  Categories: {}", category_count);
            println!("  Selected:   {}", selected);
            println!();
            println!("Sync:");
            println!(
                "  Status:   {}",
                if config.sync_enabled {
                    "enabled"
                } else {
                    "disabled"
                }
            );
            if let Some(ref url) = config.sync_url {
                println!("  Server:   {}", url);
            }
            println!("  Interval: {}s", config.sync_interval().as_secs());
            println!("  Policy:   {}", config.conflict_policy);
        }
    }

    Ok(())
}
