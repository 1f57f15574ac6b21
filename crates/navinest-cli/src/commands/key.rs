//! API key command handlers
//!
//! The chat API key lives in its own storage entry, never inside the
//! dashboard document, so exports can be shared safely.

use anyhow::Result;

use navinest_core::DashboardStore;

use crate::output::Output;

/// Store the chat API key
pub fn set(store: &DashboardStore, key: String, output: &Output) -> Result<()> {
    store.save_api_key(&key)?;
    output.success("API key stored");
    Ok(())
}

/// Show whether a key is stored (never prints the key itself)
pub fn show(store: &DashboardStore, output: &Output) -> Result<()> {
    match store.load_api_key()? {
        Some(key) => {
            let tail = key.chars().rev().take(4).collect::<Vec<_>>();
            let tail: String = tail.into_iter().rev().collect();
            output.message(&format!("API key stored (ends in ...{})", tail));
        }
        None => output.message("No API key stored. Set one with: navinest key set <key>"),
    }
    Ok(())
}

/// Remove the stored key
pub fn clear(store: &DashboardStore, output: &Output) -> Result<()> {
    store.delete_api_key()?;
    output.success("API key cleared");
    Ok(())
}
