//! Category command handlers

use anyhow::{anyhow, Result};

use navinest_core::DashboardStore;

use crate::commands::resolve_category;
use crate::output::{short_id, Output};
use crate::prompt::{confirm, prompt_with_default};

/// Create a new category
pub fn add(store: &mut DashboardStore, name: String, icon: String, output: &Output) -> Result<()> {
    let category = store.add_category(&name, &icon);

    output.success(&format!("Created category: {}", category.id));
    if output.is_quiet() {
        println!("{}", category.id);
    }
    Ok(())
}

/// Edit a category's name and icon
pub fn edit(store: &mut DashboardStore, reference: String, output: &Output) -> Result<()> {
    let id = resolve_category(store.dashboard(), &reference)?;
    let current = store
        .dashboard()
        .category(&id)
        .ok_or_else(|| anyhow!("Category not found: {}", reference))?
        .clone();

    println!("Editing category: {}", short_id(&id));
    println!("Press Enter to keep current value, or type new value.\n");

    let name = prompt_with_default("Name", &current.name)?.unwrap_or(current.name);
    let icon = prompt_with_default("Icon", &current.icon)?.unwrap_or(current.icon);

    store.update_category(&id, &name, &icon);
    output.success("Category updated");
    Ok(())
}

/// Delete a category and all its links
pub fn delete(store: &mut DashboardStore, reference: String, output: &Output) -> Result<()> {
    let id = resolve_category(store.dashboard(), &reference)?;
    let category = store
        .dashboard()
        .category(&id)
        .ok_or_else(|| anyhow!("Category not found: {}", reference))?;

    if output.should_prompt() {
        println!(
            "Delete category: {} - {} ({} links)",
            short_id(&id),
            category.name,
            category.items.len()
        );
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete_category(&id);
    output.success(&format!("Deleted category: {}", short_id(&id)));
    Ok(())
}

/// List all categories with their links
pub fn list(store: &DashboardStore, output: &Output) -> Result<()> {
    output.print_categories(&store.dashboard().categories);
    Ok(())
}

/// Move a category to a new position (0-based), shifting the others
pub fn move_to(
    store: &mut DashboardStore,
    reference: String,
    position: usize,
    output: &Output,
) -> Result<()> {
    let id = resolve_category(store.dashboard(), &reference)?;

    let mut categories = store.dashboard().categories.clone();
    let from = categories
        .iter()
        .position(|c| c.id == id)
        .ok_or_else(|| anyhow!("Category not found: {}", reference))?;
    let category = categories.remove(from);
    let to = position.min(categories.len());
    categories.insert(to, category);

    store.reorder_categories(categories);
    output.success(&format!("Moved category to position {}", to));
    Ok(())
}
