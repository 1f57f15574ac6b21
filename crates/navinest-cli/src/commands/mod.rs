//! Command handlers
//!
//! Each submodule handles one subcommand family. Identifier arguments
//! accept a full id, a unique prefix, or (for categories) an exact name.

pub mod category;
pub mod chat;
pub mod config;
pub mod favorite;
pub mod key;
pub mod link;
pub mod status;
pub mod transfer;

use anyhow::{bail, Result};

use navinest_core::Dashboard;

use crate::output::short_id;

/// Resolve a category reference to its id
pub fn resolve_category(doc: &Dashboard, reference: &str) -> Result<String> {
    // Exact id wins
    if let Some(category) = doc.category(reference) {
        return Ok(category.id.clone());
    }

    // Then an exact name
    let by_name: Vec<_> = doc
        .categories
        .iter()
        .filter(|c| c.name == reference)
        .collect();
    if by_name.len() == 1 {
        return Ok(by_name[0].id.clone());
    }
    if by_name.len() > 1 {
        bail!("Multiple categories named '{}'. Use the id instead.", reference);
    }

    // Then a unique id prefix
    let by_prefix: Vec<_> = doc
        .categories
        .iter()
        .filter(|c| c.id.starts_with(reference))
        .collect();

    match by_prefix.len() {
        0 => bail!("No category found matching: {}", reference),
        1 => Ok(by_prefix[0].id.clone()),
        _ => {
            eprintln!("Multiple categories match '{}':", reference);
            for category in &by_prefix {
                eprintln!("  {} - {}", category.id, category.name);
            }
            bail!("Ambiguous id. Please provide more characters.");
        }
    }
}

/// Resolve a link reference to (category id, link id)
pub fn resolve_link(doc: &Dashboard, reference: &str) -> Result<(String, String)> {
    let matches: Vec<(String, String, String)> = doc
        .categories
        .iter()
        .flat_map(|c| {
            c.items
                .iter()
                .filter(|l| l.id == reference || l.id.starts_with(reference))
                .map(|l| (c.id.clone(), l.id.clone(), l.name.clone()))
        })
        .collect();

    // An exact match beats prefix matches
    if let Some((category_id, link_id, _)) = matches.iter().find(|(_, id, _)| id == reference) {
        return Ok((category_id.clone(), link_id.clone()));
    }

    match matches.len() {
        0 => bail!("No link found matching: {}", reference),
        1 => Ok((matches[0].0.clone(), matches[0].1.clone())),
        _ => {
            eprintln!("Multiple links match '{}':", reference);
            for (_, link_id, name) in &matches {
                eprintln!("  {} - {}", short_id(link_id), name);
            }
            bail!("Ambiguous id. Please provide more characters.");
        }
    }
}
