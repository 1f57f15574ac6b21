//! Status command handler

use anyhow::Result;

use navinest_core::DashboardStore;

use crate::output::{Output, OutputFormat};

/// Describe the API key entry: stored, absent, or present but unreadable
fn api_key_state(store: &DashboardStore) -> &'static str {
    match store.load_api_key() {
        Ok(Some(_)) => "stored",
        Ok(None) => "not set",
        Err(err) => {
            tracing::warn!("Failed to read API key entry: {err:#}");
            "unreadable"
        }
    }
}

/// Show status information
pub fn show(store: &DashboardStore, output: &Output) -> Result<()> {
    let doc = store.dashboard();
    let config = store.config();

    let stale_favorites = doc
        .favorites
        .iter()
        .filter(|id| doc.link(id).is_none())
        .count();

    match output.format {
        OutputFormat::Json => {
            println!(
                "{}",
                serde_json::json!({
                    "data_dir": config.data_dir,
                    "dashboard_exists": config.dashboard_path().exists(),
                    "api_key": api_key_state(store),
                    "counts": {
                        "categories": doc.categories.len(),
                        "links": doc.link_count(),
                        "favorites": doc.favorites.len(),
                        "stale_favorites": stale_favorites
                    }
                })
            );
        }
        OutputFormat::Quiet => {
            println!("{}", config.data_dir.display());
        }
        OutputFormat::Human => {
            println!("NaviNest Status");
            println!("===============");
            println!();
            println!("Storage:");
            println!("  Location:  {}", config.data_dir.display());
            println!(
                "  Document:  {}",
                if config.dashboard_path().exists() {
                    "saved"
                } else {
                    "not yet saved"
                }
            );
            println!("  API key:   {}", api_key_state(store));
            println!();
            println!("Contents:");
            println!("  Categories: {}", doc.categories.len());
            println!("  Links:      {}", doc.link_count());
            println!("  Favorites:  {}", doc.favorites.len());
            if stale_favorites > 0 {
                println!("    ({} stale, hidden from views)", stale_favorites);
            }
        }
    }

    Ok(())
}
