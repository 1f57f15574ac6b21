//! Import, merge, and export of dashboard documents
//!
//! A candidate document is user-supplied JSON in the [`Dashboard`] shape
//! with identifiers optional. Validation is schema-checked
//! deserialization: anything that is not JSON, or lacks a `categories`
//! array, is a typed error and the live document is never touched.
//!
//! Two import modes:
//! - **Overwrite**: the normalized candidate replaces the live document.
//! - **Merge**: additive. Every candidate category and link gets a new
//!   identifier (even when it already has one) so nothing can collide with
//!   the live document; candidate categories are appended, and candidate
//!   favorites are translated through the old-id -> new-id mapping.
//!
//! Export is the inverse surface: the document re-serialized with all
//! identifiers stripped, since they are meaningless outside this instance.

use std::collections::HashMap;

use thiserror::Error;

use crate::models::Dashboard;
use crate::normalize::{fresh_id, normalized};
use crate::store::DashboardStore;

/// How to reconcile a candidate document with the live one
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImportMode {
    /// Replace the live document entirely
    Overwrite,
    /// Append the candidate's categories and favorites, remapping ids
    Merge,
}

/// Import validation failure - the live document is unchanged
#[derive(Error, Debug)]
pub enum ImportError {
    /// Candidate is not valid JSON or does not match the document shape
    /// (most commonly: missing or non-array `categories`)
    #[error("Invalid dashboard document: {0}")]
    Invalid(#[from] serde_json::Error),
}

/// What an import did, for reporting to the user
#[derive(Debug, Clone, Copy)]
pub struct ImportReport {
    pub mode: ImportMode,
    /// Categories taken from the candidate
    pub categories: usize,
    /// Links taken from the candidate
    pub links: usize,
}

/// Validate a candidate document without applying it
pub fn parse_candidate(json: &str) -> Result<Dashboard, ImportError> {
    Ok(serde_json::from_str(json)?)
}

/// Validate and apply a candidate document
///
/// On any validation failure the store is left untouched.
pub fn import(
    store: &mut DashboardStore,
    json: &str,
    mode: ImportMode,
) -> Result<ImportReport, ImportError> {
    let candidate = parse_candidate(json)?;
    let report = ImportReport {
        mode,
        categories: candidate.categories.len(),
        links: candidate.categories.iter().map(|c| c.items.len()).sum(),
    };

    match mode {
        ImportMode::Overwrite => store.replace(normalized(candidate)),
        ImportMode::Merge => {
            let merged = merge(store.dashboard().clone(), candidate);
            store.replace(merged);
        }
    }

    Ok(report)
}

/// Merge a candidate into the live document
///
/// The live document's categories, links, site metadata, and existing
/// favorites are never modified or removed.
fn merge(mut live: Dashboard, mut candidate: Dashboard) -> Dashboard {
    // Candidate link ids may collide with live ones, so every category and
    // link gets a fresh id unconditionally. The pre-merge link ids are
    // remembered so favorites can follow their links.
    let mut id_map: HashMap<String, String> = HashMap::new();

    for category in &mut candidate.categories {
        category.id = fresh_id();
        for item in &mut category.items {
            let new_id = fresh_id();
            if !item.id.is_empty() {
                id_map.insert(std::mem::take(&mut item.id), new_id.clone());
            }
            item.id = new_id;
        }
    }

    live.categories.append(&mut candidate.categories);

    // Translate candidate favorites; entries without a mapping are dropped.
    // Appended as-is, no deduplication against existing favorites.
    live.favorites.extend(
        candidate
            .favorites
            .iter()
            .filter_map(|old| id_map.get(old).cloned()),
    );

    live
}

/// Serialize a document for export, with every identifier stripped
///
/// The result is a clean, re-importable artifact; identifiers are
/// regenerated on the next normalization.
pub fn export(doc: &Dashboard) -> String {
    let mut stripped = doc.clone();
    for category in &mut stripped.categories {
        category.id.clear();
        for item in &mut category.items {
            item.id.clear();
        }
    }
    // Empty ids are skipped during serialization, and the document shape
    // always serializes cleanly.
    serde_json::to_string_pretty(&stripped).unwrap_or_default()
}
