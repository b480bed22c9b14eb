//! Import/export command handlers

use std::path::Path;

use anyhow::Result;

use quotebook_core::Session;

use crate::output::{Output, OutputFormat};

/// Export quotes to a file, or to stdout when the path is "-"
pub fn export(session: &Session<Output>, path: &Path) -> Result<()> {
    if path == Path::new("-") {
        println!("{}", session.export_json()?);
    } else {
        session.export_to_file(path)?;
    }
    Ok(())
}

/// Import quotes from a JSON file
pub fn import(session: &mut Session<Output>, path: &Path) -> Result<()> {
    let count = session.import_file(path)?;
    // The session already reported success; only people need the count
    if session.surface().format == OutputFormat::Human {
        println!("{} quote(s) added", count);
    }
    Ok(())
}
