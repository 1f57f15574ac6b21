//! Data models for NaviNest
//!
//! Defines the core data structures: LinkItem, Category, and Dashboard.
//! The Dashboard is the root document - everything the user configures
//! is serialized as one JSON blob.
//!
//! Identifiers are plain strings rather than typed UUIDs because imported
//! documents may carry arbitrary ids (or none at all - an empty id means
//! "not yet assigned" and is filled in by [`crate::normalize`]).

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// A single bookmark entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LinkItem {
    /// Unique identifier (unique across the whole document)
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Display name
    pub name: String,
    /// The URL this bookmark points at
    pub url: String,
    /// Icon name (resolved by the consumer)
    #[serde(default)]
    pub icon: String,
    /// Short description shown on the card
    #[serde(default)]
    pub description: String,
}

/// Fields of a new link, before an identifier is assigned
#[derive(Debug, Clone, Default)]
pub struct NewLink {
    pub name: String,
    pub url: String,
    pub icon: String,
    pub description: String,
}

/// A partial update to a link; `None` fields keep their current value
#[derive(Debug, Clone, Default)]
pub struct LinkPatch {
    pub name: Option<String>,
    pub url: Option<String>,
    pub icon: Option<String>,
    pub description: Option<String>,
}

impl LinkPatch {
    /// True if no field would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.url.is_none() && self.icon.is_none() && self.description.is_none()
    }
}

impl LinkItem {
    /// Apply a partial update in place
    pub fn apply(&mut self, patch: &LinkPatch) {
        if let Some(ref name) = patch.name {
            self.name = name.clone();
        }
        if let Some(ref url) = patch.url {
            self.url = url.clone();
        }
        if let Some(ref icon) = patch.icon {
            self.icon = icon.clone();
        }
        if let Some(ref description) = patch.description {
            self.description = description.clone();
        }
    }
}

/// An ordered group of links
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Category {
    /// Unique identifier within the document
    #[serde(default, skip_serializing_if = "String::is_empty")]
    pub id: String,
    /// Display name
    pub name: String,
    /// Icon name
    #[serde(default)]
    pub icon: String,
    /// Links in display order
    #[serde(default)]
    pub items: Vec<LinkItem>,
}

/// The root document: the full dashboard configuration
///
/// `categories` is deliberately not defaulted - a candidate document
/// without a `categories` array is rejected at deserialization time,
/// which is the import validation rule.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(rename_all = "camelCase")]
pub struct Dashboard {
    /// Opaque site metadata (title, description, ...)
    #[serde(default)]
    pub site_meta: Map<String, Value>,
    /// Opaque chat/AI settings (endpoint, model, ...)
    #[serde(default)]
    pub ai_config: Map<String, Value>,
    /// Link ids marked as favorites, in display order.
    /// Entries may reference links that no longer exist; the read path
    /// filters those out but they are never pruned from storage.
    #[serde(default)]
    pub favorites: Vec<String>,
    /// Categories in display order
    pub categories: Vec<Category>,
}

impl Dashboard {
    /// Find a category by id
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    /// Find a category by id, mutably
    pub fn category_mut(&mut self, id: &str) -> Option<&mut Category> {
        self.categories.iter_mut().find(|c| c.id == id)
    }

    /// Find a link anywhere in the document
    pub fn link(&self, link_id: &str) -> Option<&LinkItem> {
        self.categories
            .iter()
            .flat_map(|c| c.items.iter())
            .find(|l| l.id == link_id)
    }

    /// Iterate over all links in document order
    pub fn all_links(&self) -> impl Iterator<Item = &LinkItem> {
        self.categories.iter().flat_map(|c| c.items.iter())
    }

    /// Total number of links in the document
    pub fn link_count(&self) -> usize {
        self.categories.iter().map(|c| c.items.len()).sum()
    }
}
