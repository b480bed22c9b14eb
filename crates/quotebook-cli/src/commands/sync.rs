//! Sync command handler

use anyhow::{bail, Result};

use quotebook_core::sync::{HttpRemote, MergeReport, SyncEngine};
use quotebook_core::{Config, Session};

use crate::output::{Output, OutputFormat};

/// Run one sync cycle against the configured endpoint
pub async fn sync(session: &mut Session<Output>, config: &Config) -> Result<()> {
    let Some(url) = config.sync_target() else {
        if config.sync_enabled {
            bail!(
                "No sync URL configured.\n\
                 Set one with: quotebook config set sync_url <url>"
            );
        }
        bail!(
            "Sync is disabled.\n\
             Enable it with: quotebook config set sync_enabled true"
        );
    };

    let mut engine = SyncEngine::new(HttpRemote::new(url, config.sync_timeout())?);
    let report = engine.run_cycle(session).await?;
    print_report(session.surface(), url, &report);
    Ok(())
}

fn print_report(output: &Output, url: &str, report: &MergeReport) {
    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "status": "success",
                    "server": url,
                    "added": report.added,
                    "updated": report.updated,
                    "kept": report.kept,
                    "skipped": report.skipped
                })
            );
        }
        OutputFormat::Quiet => {}
        OutputFormat::Human => {
            if report.changed() {
                println!(
                    "Synced with {}: {} added, {} updated",
                    url, report.added, report.updated
                );
            } else {
                println!("Already up to date with {}", url);
            }
            if report.kept > 0 {
                println!("  {} local edit(s) kept", report.kept);
            }
            if report.skipped > 0 {
                println!("  {} remote record(s) without text skipped", report.skipped);
            }
        }
    }
}
