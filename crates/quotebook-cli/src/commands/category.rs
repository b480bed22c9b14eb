//! Category command handlers

use anyhow::{Context, Result};

use quotebook_core::{categories, Session};

use crate::output::Output;

/// List categories, marking the selected one
pub fn list(session: &Session<Output>) -> Result<()> {
    let categories = categories::categories(session.store());
    session
        .surface()
        .print_categories(&categories, &session.selected_category());
    Ok(())
}

/// Persist the selected category without showing a quote
pub fn select(session: &Session<Output>, category: &str) -> Result<()> {
    categories::select(session.store().slots(), category)
        .context("Failed to save selected category")?;
    session
        .surface()
        .success(&format!("Selected category '{}'", category.trim()));
    Ok(())
}
