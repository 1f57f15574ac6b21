//! Link command handlers

use anyhow::{anyhow, Context, Result};

use navinest_core::{DashboardStore, LinkPatch, NewLink};

use crate::commands::{resolve_category, resolve_link};
use crate::output::{short_id, Output};
use crate::prompt::{confirm, prompt_with_default};

/// Create a new link inside a category
pub fn add(
    store: &mut DashboardStore,
    category: String,
    name: String,
    url: String,
    icon: Option<String>,
    description: Option<String>,
    output: &Output,
) -> Result<()> {
    let category_id = resolve_category(store.dashboard(), &category)?;

    let link = store
        .add_link(
            &category_id,
            NewLink {
                name,
                url,
                icon: icon.unwrap_or_else(|| "Link".to_string()),
                description: description.unwrap_or_default(),
            },
        )
        .context("Category disappeared while adding link")?;

    output.success(&format!("Created link: {}", link.id));
    output.print_link(&link);
    Ok(())
}

/// List links, all of them or one category's
pub fn list(store: &DashboardStore, category: Option<String>, output: &Output) -> Result<()> {
    let doc = store.dashboard();
    let links: Vec<_> = match category {
        Some(ref reference) => {
            let id = resolve_category(doc, reference)?;
            doc.category(&id)
                .ok_or_else(|| anyhow!("Category not found: {}", reference))?
                .items
                .iter()
                .collect()
        }
        None => doc.all_links().collect(),
    };

    output.print_links(&links);
    Ok(())
}

/// Show a single link
pub fn show(store: &DashboardStore, reference: String, output: &Output) -> Result<()> {
    let (_, link_id) = resolve_link(store.dashboard(), &reference)?;
    let link = store
        .dashboard()
        .link(&link_id)
        .ok_or_else(|| anyhow!("Link not found: {}", reference))?;
    output.print_link(link);
    Ok(())
}

/// Edit a link interactively
pub fn edit(store: &mut DashboardStore, reference: String, output: &Output) -> Result<()> {
    let (category_id, link_id) = resolve_link(store.dashboard(), &reference)?;
    let current = store
        .dashboard()
        .link(&link_id)
        .ok_or_else(|| anyhow!("Link not found: {}", reference))?
        .clone();

    println!("Editing link: {}", short_id(&link_id));
    println!("Press Enter to keep current value, or type new value.\n");

    let patch = LinkPatch {
        name: prompt_with_default("Name", &current.name)?,
        url: prompt_with_default("URL", &current.url)?,
        icon: prompt_with_default("Icon", &current.icon)?,
        description: prompt_with_default("Description", &current.description)?,
    };

    if patch.is_empty() {
        output.message("Nothing changed.");
        return Ok(());
    }

    store.update_link(&category_id, &link_id, &patch);
    output.success("Link updated");
    if let Some(updated) = store.dashboard().link(&link_id) {
        output.print_link(updated);
    }
    Ok(())
}

/// Delete a link
pub fn delete(store: &mut DashboardStore, reference: String, output: &Output) -> Result<()> {
    let (category_id, link_id) = resolve_link(store.dashboard(), &reference)?;
    let link = store
        .dashboard()
        .link(&link_id)
        .ok_or_else(|| anyhow!("Link not found: {}", reference))?;

    if output.should_prompt() {
        println!("Delete link: {} - {}", short_id(&link_id), link.name);
        if !confirm("Are you sure?")? {
            println!("Cancelled.");
            return Ok(());
        }
    }

    store.delete_link(&category_id, &link_id);
    output.success(&format!("Deleted link: {}", short_id(&link_id)));
    Ok(())
}

/// Open a link's URL in the default browser
pub fn open_url(store: &DashboardStore, reference: String, output: &Output) -> Result<()> {
    let (_, link_id) = resolve_link(store.dashboard(), &reference)?;
    let link = store
        .dashboard()
        .link(&link_id)
        .ok_or_else(|| anyhow!("Link not found: {}", reference))?;

    open::that(&link.url).with_context(|| format!("Failed to open {}", link.url))?;
    output.message(&format!("Opened {}", link.url));
    Ok(())
}

/// Move a link to a new position within its category
pub fn move_to(
    store: &mut DashboardStore,
    reference: String,
    position: usize,
    output: &Output,
) -> Result<()> {
    let (category_id, link_id) = resolve_link(store.dashboard(), &reference)?;

    let mut items = store
        .dashboard()
        .category(&category_id)
        .ok_or_else(|| anyhow!("Category not found for link: {}", reference))?
        .items
        .clone();
    let from = items
        .iter()
        .position(|l| l.id == link_id)
        .ok_or_else(|| anyhow!("Link not found: {}", reference))?;
    let link = items.remove(from);
    let to = position.min(items.len());
    items.insert(to, link);

    store.reorder_links(&category_id, items);
    output.success(&format!("Moved link to position {}", to));
    Ok(())
}
