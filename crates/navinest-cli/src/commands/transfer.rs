//! Import, export, and reset command handlers

use std::fs;
use std::path::PathBuf;

use anyhow::{Context, Result};

use navinest_core::{export, import, DashboardStore, ImportMode};

use crate::output::Output;
use crate::prompt::confirm;

/// Import a dashboard document from a JSON file
pub fn import_file(
    store: &mut DashboardStore,
    file: PathBuf,
    merge: bool,
    output: &Output,
) -> Result<()> {
    let json = fs::read_to_string(&file)
        .with_context(|| format!("Failed to read import file: {:?}", file))?;

    let mode = if merge {
        ImportMode::Merge
    } else {
        ImportMode::Overwrite
    };

    // Overwriting throws away the current dashboard
    if mode == ImportMode::Overwrite && output.should_prompt() {
        println!("This will replace your entire dashboard with the imported one.");
        if !confirm("Continue?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    let report = import(store, &json, mode).context("Import rejected")?;

    let verb = match report.mode {
        ImportMode::Overwrite => "Imported (overwrite)",
        ImportMode::Merge => "Imported (merge)",
    };
    output.success(&format!(
        "{}: {} categor(ies), {} link(s)",
        verb, report.categories, report.links
    ));
    Ok(())
}

/// Export the dashboard as clean JSON, identifiers stripped
pub fn export_doc(store: &DashboardStore, file: Option<PathBuf>, output: &Output) -> Result<()> {
    let json = export(store.dashboard());

    match file {
        Some(path) => {
            fs::write(&path, &json)
                .with_context(|| format!("Failed to write export file: {:?}", path))?;
            output.success(&format!("Exported dashboard to {:?}", path));
        }
        None => {
            // Raw document to stdout, whatever the output format
            println!("{}", json);
        }
    }
    Ok(())
}

/// Reset the dashboard to the bundled default
pub fn reset(store: &mut DashboardStore, output: &Output) -> Result<()> {
    if output.should_prompt() {
        println!("This will revert all your changes to the default dashboard.");
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.reset()?;
    output.success("Dashboard reset to defaults");
    Ok(())
}
