//! NaviNest Core Library
//!
//! This crate provides the core functionality for NaviNest, a local-first
//! personal bookmark dashboard: categories of links with favorites, stored
//! as a single JSON document.
//!
//! # Architecture
//!
//! The dashboard document is exclusively owned by the [`DashboardStore`];
//! every mutation is a synchronous transformation of the document followed
//! by a best-effort re-persist of the whole thing.
//!
//! # Quick Start
//!
//! ```text
//! let mut store = DashboardStore::open(Config::load()?)?;
//!
//! // Add a category and a link
//! let category = store.add_category("Dev", "Code");
//! store.add_link(&category.id, NewLink { name: "Repo".into(), ..Default::default() });
//!
//! // Mark it as a favorite
//! let links = store.dashboard().category(&category.id).unwrap();
//! store.toggle_favorite(&links.items[0].id.clone());
//! ```
//!
//! # Modules
//!
//! - `store`: the dashboard store (main entry point)
//! - `models`: data structures for the document, categories, and links
//! - `normalize`: identifier assignment for externally supplied documents
//! - `import`: import/merge/export of documents
//! - `storage`: JSON persistence
//! - `config`: application configuration

pub mod config;
pub mod import;
pub mod models;
pub mod normalize;
pub mod storage;
pub mod store;

pub use config::Config;
pub use import::{export, import, parse_candidate, ImportError, ImportMode, ImportReport};
pub use models::{Category, Dashboard, LinkItem, LinkPatch, NewLink};
pub use normalize::{fresh_id, normalize, normalized};
pub use storage::{JsonPersistence, StorageError, StorageResult};
pub use store::{bundled_default, DashboardStore};
