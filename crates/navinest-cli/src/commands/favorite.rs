//! Favorite command handlers

use anyhow::Result;

use navinest_core::DashboardStore;

use crate::commands::resolve_link;
use crate::output::{short_id, Output};

/// Toggle a link in the favorites list
pub fn toggle(store: &mut DashboardStore, reference: String, output: &Output) -> Result<()> {
    let (_, link_id) = resolve_link(store.dashboard(), &reference)?;

    if store.toggle_favorite(&link_id) {
        output.success(&format!("Added favorite: {}", short_id(&link_id)));
    } else {
        output.success(&format!("Removed favorite: {}", short_id(&link_id)));
    }
    Ok(())
}

/// List favorites, skipping stale entries
pub fn list(store: &DashboardStore, output: &Output) -> Result<()> {
    output.print_links(&store.favorite_links());
    Ok(())
}
