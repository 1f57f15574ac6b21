//! Storage layer
//!
//! Persists the dashboard document as a single pretty-printed JSON file,
//! plus a separate entry for the chat API key. Every save rewrites the
//! whole document; writes are atomic (temp file + rename).

pub mod error;
pub mod persistence;

pub use error::{StorageError, StorageResult};
pub use persistence::JsonPersistence;
