//! Quote command handlers

use anyhow::Result;

use quotebook_core::sync::{push_and_log, HttpRemote};
use quotebook_core::{Config, Session};

use crate::output::Output;

/// Show a random quote, switching category first if one is given
pub fn show(session: &mut Session<Output>, category: Option<String>) -> Result<()> {
    match category {
        Some(category) => session.filter_quotes(&category)?,
        None => session.new_quote()?,
    };
    Ok(())
}

/// Add a quote and announce it to the remote when sync is enabled
pub async fn add(
    session: &mut Session<Output>,
    config: &Config,
    text: &str,
    category: &str,
) -> Result<()> {
    let quote = session.add_quote(text, category)?;
    session.surface().added(&quote);

    if let Some(url) = config.sync_target() {
        let remote = HttpRemote::new(url, config.sync_timeout())?;
        push_and_log(&remote, &quote).await;
    }

    Ok(())
}

/// List quotes, optionally limited to one category
pub fn list(session: &Session<Output>, category: Option<String>) -> Result<()> {
    let quotes = match category {
        Some(category) => session.store().filter(&category),
        None => session.store().all().iter().collect(),
    };
    session.surface().print_quotes(&quotes);
    Ok(())
}
