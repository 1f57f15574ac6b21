//! Identifier normalization
//!
//! Externally supplied documents (the bundled default, imported JSON) may
//! lack identifiers. Normalization assigns a fresh 128-bit random id to
//! every category and link whose id is empty, and leaves existing ids
//! untouched, so applying it twice is a no-op.

use uuid::Uuid;

use crate::models::Dashboard;

/// Generate a fresh globally-unique identifier
pub fn fresh_id() -> String {
    Uuid::new_v4().to_string()
}

/// Assign missing identifiers in place
///
/// Returns true if any id was assigned.
pub fn normalize(doc: &mut Dashboard) -> bool {
    let mut changed = false;
    for category in &mut doc.categories {
        if category.id.is_empty() {
            category.id = fresh_id();
            changed = true;
        }
        for item in &mut category.items {
            if item.id.is_empty() {
                item.id = fresh_id();
                changed = true;
            }
        }
    }
    changed
}

/// Normalize a document by value
pub fn normalized(mut doc: Dashboard) -> Dashboard {
    normalize(&mut doc);
    doc
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Dashboard;

    fn raw_doc() -> Dashboard {
        serde_json::from_str(
            r#"{"categories": [
                {"name": "Dev", "icon": "Code", "items": [
                    {"name": "Repo", "url": "https://x", "icon": "Link", "description": "d"},
                    {"id": "keep-me", "name": "Docs", "url": "https://y", "icon": "Book", "description": ""}
                ]}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_assigns_missing_ids() {
        let doc = normalized(raw_doc());

        assert!(!doc.categories[0].id.is_empty());
        assert!(!doc.categories[0].items[0].id.is_empty());
        assert_ne!(doc.categories[0].id, doc.categories[0].items[0].id);
    }

    #[test]
    fn test_preserves_existing_ids() {
        let doc = normalized(raw_doc());
        assert_eq!(doc.categories[0].items[1].id, "keep-me");
    }

    #[test]
    fn test_idempotent() {
        let once = normalized(raw_doc());
        let mut twice = once.clone();
        let changed = normalize(&mut twice);

        assert!(!changed);
        assert_eq!(once, twice);
    }

    #[test]
    fn test_generated_ids_are_unique() {
        let mut doc: Dashboard = serde_json::from_str(
            r#"{"categories": [
                {"name": "A", "items": [{"name": "1", "url": "u"}, {"name": "2", "url": "u"}]},
                {"name": "B", "items": [{"name": "3", "url": "u"}]}
            ]}"#,
        )
        .unwrap();
        normalize(&mut doc);

        let mut ids: Vec<&str> = doc.categories.iter().map(|c| c.id.as_str()).collect();
        ids.extend(doc.all_links().map(|l| l.id.as_str()));
        let before = ids.len();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), before);
    }
}
