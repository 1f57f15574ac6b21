//! Dashboard document persistence
//!
//! Handles saving and loading the dashboard JSON to/from the filesystem.
//! Uses atomic writes (write to temp file, then rename) to prevent
//! corruption.
//!
//! Storage location: `~/.local/share/navinest/` (configurable via `Config`)
//!
//! Files:
//! - `dashboard.json` - the full dashboard document
//! - `api_key` - the chat API key, stored and read independently of the
//!   document so an export never includes it

use std::fs::{self, File};
use std::io::Write;
use std::path::Path;

use crate::config::Config;
use crate::models::Dashboard;
use crate::storage::error::{StorageError, StorageResult};

/// Persistence layer for the dashboard document
pub struct JsonPersistence {
    config: Config,
}

impl JsonPersistence {
    /// Create a new persistence handler with the given configuration
    pub fn new(config: Config) -> Self {
        Self { config }
    }

    /// Get the configuration
    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Check if a persisted document exists on disk
    pub fn exists(&self) -> bool {
        self.config.dashboard_path().exists()
    }

    /// Save the document to disk using atomic write
    ///
    /// This writes to a temporary file first, then renames it to the target
    /// path, so the file is never left in a partially-written state.
    pub fn save(&self, doc: &Dashboard) -> StorageResult<()> {
        let json = serde_json::to_vec_pretty(doc).map_err(StorageError::Serialize)?;
        atomic_write(&self.config.dashboard_path(), &json)
    }

    /// Load the document from disk
    ///
    /// Returns `None` if no document has been persisted yet.
    /// Returns an error if the file exists but can't be read or parsed.
    pub fn load(&self) -> StorageResult<Option<Dashboard>> {
        let path = self.config.dashboard_path();

        if !path.exists() {
            return Ok(None);
        }

        let bytes = fs::read(&path).map_err(|e| StorageError::ReadError {
            path: path.clone(),
            source: e,
        })?;

        let doc = serde_json::from_slice(&bytes)
            .map_err(|e| StorageError::InvalidDocument { path, source: e })?;

        Ok(Some(doc))
    }

    /// Remove the persisted document
    ///
    /// A missing file is not an error - the end state is the same.
    pub fn delete(&self) -> StorageResult<()> {
        let path = self.config.dashboard_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from_io(e, path)),
        }
    }

    /// Store the chat API key
    ///
    /// Kept in its own file so it never travels with the document.
    pub fn save_api_key(&self, key: &str) -> StorageResult<()> {
        let path = self.config.api_key_path();
        atomic_write(&path, key.trim().as_bytes())?;

        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            fs::set_permissions(&path, fs::Permissions::from_mode(0o600))
                .map_err(|e| StorageError::from_io(e, path))?;
        }

        Ok(())
    }

    /// Load the chat API key
    ///
    /// Returns `None` if no key has been stored.
    pub fn load_api_key(&self) -> StorageResult<Option<String>> {
        let path = self.config.api_key_path();

        if !path.exists() {
            return Ok(None);
        }

        let key = fs::read_to_string(&path).map_err(|e| StorageError::ReadError {
            path,
            source: e,
        })?;

        Ok(Some(key.trim().to_string()))
    }

    /// Remove the stored chat API key
    pub fn delete_api_key(&self) -> StorageResult<()> {
        let path = self.config.api_key_path();
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(StorageError::from_io(e, path)),
        }
    }
}

/// Write bytes to a file atomically
///
/// Writes to a temporary file in the same directory, syncs, then renames.
fn atomic_write(target: &Path, bytes: &[u8]) -> StorageResult<()> {
    let parent = target.parent().unwrap_or_else(|| Path::new("."));
    if !parent.exists() {
        fs::create_dir_all(parent).map_err(|e| StorageError::CreateDirectory {
            path: parent.to_path_buf(),
            source: e,
        })?;
    }

    let temp_path = target.with_extension("tmp");

    {
        let mut file = File::create(&temp_path)
            .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
        file.write_all(bytes)
            .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
        file.sync_all()
            .map_err(|e| StorageError::from_io(e, temp_path.clone()))?;
    }

    fs::rename(&temp_path, target).map_err(|e| StorageError::AtomicWriteFailed {
        from: temp_path,
        to: target.to_path_buf(),
        source: e,
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn test_persistence(temp_dir: &TempDir) -> JsonPersistence {
        JsonPersistence::new(Config {
            data_dir: temp_dir.path().to_path_buf(),
            ..Config::default()
        })
    }

    fn sample_doc() -> Dashboard {
        serde_json::from_str(
            r#"{"favorites": ["l1"], "categories": [
                {"id": "c1", "name": "Dev", "icon": "Code", "items": [
                    {"id": "l1", "name": "Repo", "url": "https://x", "icon": "Link", "description": "d"}
                ]}
            ]}"#,
        )
        .unwrap()
    }

    #[test]
    fn test_load_missing_returns_none() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        assert!(!persistence.exists());
        assert!(persistence.load().unwrap().is_none());
    }

    #[test]
    fn test_save_and_load_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        let doc = sample_doc();
        persistence.save(&doc).unwrap();

        assert!(persistence.exists());
        let loaded = persistence.load().unwrap().unwrap();
        assert_eq!(loaded, doc);
    }

    #[test]
    fn test_save_preserves_order() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        let doc: Dashboard = serde_json::from_str(
            r#"{"categories": [
                {"id": "c2", "name": "B", "items": []},
                {"id": "c1", "name": "A", "items": []},
                {"id": "c3", "name": "C", "items": []}
            ]}"#,
        )
        .unwrap();
        persistence.save(&doc).unwrap();

        let loaded = persistence.load().unwrap().unwrap();
        let names: Vec<&str> = loaded.categories.iter().map(|c| c.name.as_str()).collect();
        assert_eq!(names, vec!["B", "A", "C"]);
    }

    #[test]
    fn test_delete_is_idempotent() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        persistence.save(&sample_doc()).unwrap();
        persistence.delete().unwrap();
        assert!(!persistence.exists());

        // Deleting again is fine
        persistence.delete().unwrap();
    }

    #[test]
    fn test_corrupt_document_is_an_error() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        fs::write(persistence.config().dashboard_path(), b"not json at all").unwrap();

        let err = persistence.load().unwrap_err();
        assert!(matches!(err, StorageError::InvalidDocument { .. }));
    }

    #[test]
    fn test_api_key_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        assert!(persistence.load_api_key().unwrap().is_none());

        persistence.save_api_key("sk-test-123\n").unwrap();
        assert_eq!(
            persistence.load_api_key().unwrap().as_deref(),
            Some("sk-test-123")
        );

        // The key lives outside the document
        assert!(!persistence.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_api_key_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let temp_dir = TempDir::new().unwrap();
        let persistence = test_persistence(&temp_dir);

        persistence.save_api_key("sk-test").unwrap();
        let mode = fs::metadata(persistence.config().api_key_path())
            .unwrap()
            .permissions()
            .mode();
        assert_eq!(mode & 0o777, 0o600);
    }
}
