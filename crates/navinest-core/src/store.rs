//! Dashboard store
//!
//! The `DashboardStore` owns the dashboard document and is the only way to
//! change it. Consumers get read-only views; every mutation goes through an
//! operation here, produces the new document state, and re-persists the
//! whole document.
//!
//! ## Lifecycle
//!
//! The document is resolved once in [`DashboardStore::open`]: the persisted
//! copy if one exists, otherwise the bundled default. Identifiers are
//! normalized and default categories missing by *name* are appended before
//! the store is handed out.
//!
//! ## Persistence
//!
//! Writes are best-effort: a failed save is logged as a warning and the
//! in-memory document keeps the change. The next successful mutation
//! rewrites the full document, so memory and disk re-converge.
//!
//! ## Usage
//!
//! ```ignore
//! let mut store = DashboardStore::open(config)?;
//!
//! let category = store.add_category("Dev", "Code");
//! store.add_link(&category.id, NewLink { name: "Repo".into(), ..Default::default() });
//! ```

use anyhow::{Context, Result};
use tracing::warn;

use crate::config::Config;
use crate::models::{Category, Dashboard, LinkItem, LinkPatch, NewLink};
use crate::normalize::{fresh_id, normalize, normalized};
use crate::storage::JsonPersistence;

/// The bundled default document, used on first run and for reset
pub fn bundled_default() -> Result<Dashboard> {
    serde_json::from_str(include_str!("../data/default.json"))
        .context("Bundled default dashboard is not valid")
}

/// Owns the dashboard document and its persistence
pub struct DashboardStore {
    /// The live document
    doc: Dashboard,
    /// Persistence handler
    persistence: JsonPersistence,
}

impl DashboardStore {
    /// Open the store, resolving the document from disk or the bundled default
    ///
    /// On first run:
    /// - Parses the bundled default and assigns identifiers
    ///
    /// On subsequent runs:
    /// - Loads the persisted document
    /// - Assigns identifiers to any entries that lack one
    /// - Appends bundled categories whose names are absent (additive
    ///   auto-migration; matched by name, not identifier)
    ///
    /// The resolved document is persisted before the store is returned.
    pub fn open(config: Config) -> Result<Self> {
        let persistence = JsonPersistence::new(config);
        let default_doc = bundled_default()?;

        let mut doc = match persistence
            .load()
            .context("Failed to load persisted dashboard")?
        {
            Some(saved) => {
                let mut doc = saved;
                // Additive migration: pick up categories added to the
                // bundled default since this document was first saved.
                for category in &default_doc.categories {
                    if !doc.categories.iter().any(|c| c.name == category.name) {
                        doc.categories.push(category.clone());
                    }
                }
                doc
            }
            None => default_doc,
        };

        normalize(&mut doc);

        let mut store = Self { doc, persistence };
        store.persist();
        Ok(store)
    }

    /// Read-only view of the document
    pub fn dashboard(&self) -> &Dashboard {
        &self.doc
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        self.persistence.config()
    }

    // ==================== Category Operations ====================

    /// Append a new category with a fresh identifier and no links
    pub fn add_category(&mut self, name: &str, icon: &str) -> Category {
        let category = Category {
            id: fresh_id(),
            name: name.to_string(),
            icon: icon.to_string(),
            items: Vec::new(),
        };
        self.doc.categories.push(category.clone());
        self.persist();
        category
    }

    /// Replace name and icon of the category matching `id`
    ///
    /// Returns false (and leaves the document untouched) if not found.
    pub fn update_category(&mut self, id: &str, name: &str, icon: &str) -> bool {
        match self.doc.category_mut(id) {
            Some(category) => {
                category.name = name.to_string();
                category.icon = icon.to_string();
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Remove the category matching `id`, including all its links
    ///
    /// Favorites pointing at the removed links are left in place; the read
    /// path filters them out.
    pub fn delete_category(&mut self, id: &str) -> bool {
        let before = self.doc.categories.len();
        self.doc.categories.retain(|c| c.id != id);
        if self.doc.categories.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Replace the category sequence verbatim
    ///
    /// The caller is trusted to pass a permutation of the existing
    /// categories; no validation is performed.
    pub fn reorder_categories(&mut self, categories: Vec<Category>) {
        self.doc.categories = categories;
        self.persist();
    }

    // ==================== Link Operations ====================

    /// Append a new link with a fresh identifier to a category
    ///
    /// Returns `None` (document untouched) if the category is not found.
    pub fn add_link(&mut self, category_id: &str, link: NewLink) -> Option<LinkItem> {
        let category = self.doc.category_mut(category_id)?;
        let item = LinkItem {
            id: fresh_id(),
            name: link.name,
            url: link.url,
            icon: link.icon,
            description: link.description,
        };
        category.items.push(item.clone());
        self.persist();
        Some(item)
    }

    /// Merge patch fields into the matching link
    ///
    /// Returns false if the category or link is not found.
    pub fn update_link(&mut self, category_id: &str, link_id: &str, patch: &LinkPatch) -> bool {
        let Some(category) = self.doc.category_mut(category_id) else {
            return false;
        };
        match category.items.iter_mut().find(|l| l.id == link_id) {
            Some(item) => {
                item.apply(patch);
                self.persist();
                true
            }
            None => false,
        }
    }

    /// Remove the link matching `link_id` from a category
    pub fn delete_link(&mut self, category_id: &str, link_id: &str) -> bool {
        let Some(category) = self.doc.category_mut(category_id) else {
            return false;
        };
        let before = category.items.len();
        category.items.retain(|l| l.id != link_id);
        if category.items.len() == before {
            return false;
        }
        self.persist();
        true
    }

    /// Replace one category's link sequence verbatim
    ///
    /// Same caller contract as [`reorder_categories`](Self::reorder_categories).
    pub fn reorder_links(&mut self, category_id: &str, links: Vec<LinkItem>) -> bool {
        match self.doc.category_mut(category_id) {
            Some(category) => {
                category.items = links;
                self.persist();
                true
            }
            None => false,
        }
    }

    // ==================== Favorites ====================

    /// Toggle a link id in the favorites list
    ///
    /// Set-toggle semantics: adds the id if absent, removes every
    /// occurrence if present. Returns true if the id is now a favorite.
    pub fn toggle_favorite(&mut self, link_id: &str) -> bool {
        let now_favorite = if self.doc.favorites.iter().any(|f| f == link_id) {
            self.doc.favorites.retain(|f| f != link_id);
            false
        } else {
            self.doc.favorites.push(link_id.to_string());
            true
        };
        self.persist();
        now_favorite
    }

    /// Resolve favorites to links, in favorites order
    ///
    /// Stale entries (ids with no matching link) are skipped, not removed.
    pub fn favorite_links(&self) -> Vec<&LinkItem> {
        self.doc
            .favorites
            .iter()
            .filter_map(|id| self.doc.link(id))
            .collect()
    }

    // ==================== Document Replacement ====================

    /// Unconditionally replace the whole document (import path)
    pub fn replace(&mut self, doc: Dashboard) {
        self.doc = doc;
        self.persist();
    }

    /// Replace the document with the normalized bundled default and clear
    /// persisted storage
    ///
    /// Destructive - callers confirm with the user *before* invoking this;
    /// the store never blocks on interaction.
    pub fn reset(&mut self) -> Result<()> {
        self.doc = normalized(bundled_default()?);
        if let Err(e) = self.persistence.delete() {
            warn!("Failed to clear persisted dashboard: {}", e);
        }
        Ok(())
    }

    // ==================== API Key ====================

    /// Store the chat API key (separate entry, never part of the document)
    pub fn save_api_key(&self, key: &str) -> Result<()> {
        self.persistence
            .save_api_key(key)
            .context("Failed to store API key")
    }

    /// Load the chat API key
    pub fn load_api_key(&self) -> Result<Option<String>> {
        self.persistence
            .load_api_key()
            .context("Failed to read API key")
    }

    /// Remove the stored chat API key
    pub fn delete_api_key(&self) -> Result<()> {
        self.persistence
            .delete_api_key()
            .context("Failed to remove API key")
    }

    // ==================== Persistence ====================

    /// Persist the full document, best-effort
    ///
    /// A failed write leaves the in-memory document in place; the next
    /// successful mutation rewrites everything.
    fn persist(&mut self) {
        if let Err(e) = self.persistence.save(&self.doc) {
            warn!("Failed to persist dashboard: {}", e);
            if let Some(suggestion) = e.recovery_suggestion() {
                warn!("{}", suggestion);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_config(temp_dir: &TempDir) -> Config {
        Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        }
    }

    fn empty_store(temp_dir: &TempDir) -> DashboardStore {
        let mut store = DashboardStore::open(test_config(temp_dir)).unwrap();
        store.replace(Dashboard::default());
        store
    }

    fn assert_ids_unique(doc: &Dashboard) {
        let mut ids: Vec<&str> = doc.categories.iter().map(|c| c.id.as_str()).collect();
        ids.extend(doc.all_links().map(|l| l.id.as_str()));
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before, "duplicate identifiers in document");
    }

    #[test]
    fn test_open_uses_bundled_default() {
        let temp_dir = TempDir::new().unwrap();
        let store = DashboardStore::open(test_config(&temp_dir)).unwrap();

        // The default ships categories, all with assigned ids
        assert!(!store.dashboard().categories.is_empty());
        for category in &store.dashboard().categories {
            assert!(!category.id.is_empty());
            for item in &category.items {
                assert!(!item.id.is_empty());
            }
        }

        // And the resolved document was persisted
        assert!(store.config().dashboard_path().exists());
    }

    #[test]
    fn test_open_loads_persisted_document() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let category_id;
        {
            let mut store = DashboardStore::open(config.clone()).unwrap();
            category_id = store.add_category("Mine", "Star").id;
        }

        let store = DashboardStore::open(config).unwrap();
        assert!(store.dashboard().category(&category_id).is_some());
    }

    #[test]
    fn test_open_migrates_missing_default_categories_by_name() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        {
            let mut store = DashboardStore::open(config.clone()).unwrap();
            store.replace(Dashboard::default());
            store.add_category("Mine", "Star");
        }

        let store = DashboardStore::open(config).unwrap();
        let names: Vec<&str> = store
            .dashboard()
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();

        // User category survives, bundled categories are re-appended by name
        assert_eq!(names[0], "Mine");
        for category in &bundled_default().unwrap().categories {
            assert!(names.contains(&category.name.as_str()));
        }
        assert_ids_unique(store.dashboard());
    }

    #[test]
    fn test_add_category_appends_with_fresh_id() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        let a = store.add_category("A", "folder");
        let b = store.add_category("B", "folder");

        assert!(!a.id.is_empty());
        assert_ne!(a.id, b.id);
        let names: Vec<&str> = store
            .dashboard()
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["A", "B"]);
    }

    #[test]
    fn test_update_category() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        let category = store.add_category("Dev", "folder");
        assert!(store.update_category(&category.id, "Development", "Code"));

        let updated = store.dashboard().category(&category.id).unwrap();
        assert_eq!(updated.name, "Development");
        assert_eq!(updated.icon, "Code");

        assert!(!store.update_category("missing", "X", "Y"));
    }

    #[test]
    fn test_add_link_and_delete_category_scenario() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        let category = store.add_category("Dev", "folder");
        let link = store
            .add_link(
                &category.id,
                NewLink {
                    name: "Repo".to_string(),
                    url: "https://x".to_string(),
                    icon: "link".to_string(),
                    description: "d".to_string(),
                },
            )
            .unwrap();

        assert!(!link.id.is_empty());
        assert_ne!(link.id, category.id);
        assert_eq!(store.dashboard().categories.len(), 1);
        assert_eq!(store.dashboard().link_count(), 1);

        assert!(store.delete_category(&category.id));
        assert!(store.dashboard().categories.is_empty());
        assert!(store.dashboard().favorites.is_empty());
    }

    #[test]
    fn test_add_link_to_missing_category_is_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        let before = store.dashboard().clone();
        assert!(store
            .add_link("missing-cat", NewLink::default())
            .is_none());
        assert_eq!(*store.dashboard(), before);
    }

    #[test]
    fn test_update_link_merges_fields() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        let category = store.add_category("Dev", "folder");
        let link = store
            .add_link(
                &category.id,
                NewLink {
                    name: "Repo".to_string(),
                    url: "https://x".to_string(),
                    icon: "link".to_string(),
                    description: "d".to_string(),
                },
            )
            .unwrap();

        assert!(store.update_link(
            &category.id,
            &link.id,
            &LinkPatch {
                name: Some("Repository".to_string()),
                ..Default::default()
            },
        ));

        let updated = store.dashboard().link(&link.id).unwrap();
        assert_eq!(updated.name, "Repository");
        assert_eq!(updated.url, "https://x");
    }

    #[test]
    fn test_update_link_missing_is_byte_for_byte_noop() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);
        store.add_category("Dev", "folder");

        let before = serde_json::to_vec(store.dashboard()).unwrap();
        assert!(!store.update_link(
            "missing-cat",
            "missing-link",
            &LinkPatch {
                name: Some("X".to_string()),
                ..Default::default()
            },
        ));
        let after = serde_json::to_vec(store.dashboard()).unwrap();
        assert_eq!(before, after);
    }

    #[test]
    fn test_delete_link() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        let category = store.add_category("Dev", "folder");
        let link = store
            .add_link(&category.id, NewLink::default())
            .unwrap();

        assert!(store.delete_link(&category.id, &link.id));
        assert_eq!(store.dashboard().link_count(), 0);

        assert!(!store.delete_link(&category.id, &link.id));
    }

    #[test]
    fn test_reorder_categories_verbatim() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        store.add_category("A", "");
        store.add_category("B", "");
        store.add_category("C", "");

        let mut reordered = store.dashboard().categories.clone();
        reordered.reverse();
        store.reorder_categories(reordered);

        let names: Vec<&str> = store
            .dashboard()
            .categories
            .iter()
            .map(|c| c.name.as_str())
            .collect();
        assert_eq!(names, vec!["C", "B", "A"]);
    }

    #[test]
    fn test_reorder_links_scoped_to_category() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        let category = store.add_category("Dev", "");
        for name in ["one", "two", "three"] {
            store
                .add_link(
                    &category.id,
                    NewLink {
                        name: name.to_string(),
                        ..Default::default()
                    },
                )
                .unwrap();
        }

        let mut items = store.dashboard().category(&category.id).unwrap().items.clone();
        items.rotate_left(1);
        assert!(store.reorder_links(&category.id, items));

        let names: Vec<&str> = store
            .dashboard()
            .category(&category.id)
            .unwrap()
            .items
            .iter()
            .map(|l| l.name.as_str())
            .collect();
        assert_eq!(names, vec!["two", "three", "one"]);

        assert!(!store.reorder_links("missing", Vec::new()));
    }

    #[test]
    fn test_toggle_favorite_symmetry() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        let original = store.dashboard().favorites.clone();

        assert!(store.toggle_favorite("some-link"));
        assert_eq!(store.dashboard().favorites, vec!["some-link"]);

        assert!(!store.toggle_favorite("some-link"));
        assert_eq!(store.dashboard().favorites, original);
    }

    #[test]
    fn test_favorites_survive_category_delete_but_hide_from_reads() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        let category = store.add_category("Dev", "");
        let link = store
            .add_link(&category.id, NewLink::default())
            .unwrap();
        store.toggle_favorite(&link.id);

        store.delete_category(&category.id);

        // Stale entry is still stored
        assert_eq!(store.dashboard().favorites, vec![link.id.clone()]);
        // But the read path filters it
        assert!(store.favorite_links().is_empty());
    }

    #[test]
    fn test_ids_stay_unique_across_operations() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = empty_store(&temp_dir);

        let a = store.add_category("A", "");
        let b = store.add_category("B", "");
        for _ in 0..5 {
            store.add_link(&a.id, NewLink::default()).unwrap();
            store.add_link(&b.id, NewLink::default()).unwrap();
        }
        store.delete_category(&a.id);
        store.add_category("C", "");

        assert_ids_unique(store.dashboard());
    }

    #[test]
    fn test_reset_restores_default_and_clears_storage() {
        let temp_dir = TempDir::new().unwrap();
        let mut store = DashboardStore::open(test_config(&temp_dir)).unwrap();

        store.add_category("Mine", "Star");
        assert!(store.config().dashboard_path().exists());

        store.reset().unwrap();

        assert!(!store.config().dashboard_path().exists());
        let default_names: Vec<String> = bundled_default()
            .unwrap()
            .categories
            .iter()
            .map(|c| c.name.clone())
            .collect();
        let names: Vec<String> = store
            .dashboard()
            .categories
            .iter()
            .map(|c| c.name.clone())
            .collect();
        assert_eq!(names, default_names);
        assert_ids_unique(store.dashboard());
    }

    #[test]
    fn test_mutations_persist_whole_document() {
        let temp_dir = TempDir::new().unwrap();
        let config = test_config(&temp_dir);

        let category_id;
        {
            let mut store = DashboardStore::open(config.clone()).unwrap();
            store.replace(Dashboard::default());
            category_id = store.add_category("Dev", "Code").id;
            store.toggle_favorite("some-link");
        }

        let store = DashboardStore::open(config).unwrap();
        assert!(store.dashboard().category(&category_id).is_some());
        assert!(store
            .dashboard()
            .favorites
            .contains(&"some-link".to_string()));
    }
}
