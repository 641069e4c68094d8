//! File-backed key-value store
//!
//! Each key is stored as `<key>.txt` inside the store directory. Writes go to a
//! temp file first and are renamed into place, so a single value is never seen
//! half-written. Every write gets its own temp file, so concurrent writers of
//! one key never share one; the last rename wins.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use async_trait::async_trait;
use directories::ProjectDirs;
use tokio::fs;

use super::{KeyValueStore, StoreError};

/// Per-process sequence for temp file names
static TEMP_SEQ: AtomicU64 = AtomicU64::new(0);

/// Stores values as files in a directory
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Creates a store in the XDG-compliant data directory
    ///
    /// Uses `~/.local/share/adkit/` on Linux, or the platform equivalent.
    /// Returns `None` if no home directory can be determined.
    pub fn new() -> Option<Self> {
        let project_dirs = ProjectDirs::from("", "", "adkit")?;
        Some(Self {
            dir: project_dirs.data_dir().to_path_buf(),
        })
    }

    /// Creates a store in a specific directory
    pub fn with_dir(dir: PathBuf) -> Self {
        Self { dir }
    }

    /// Directory holding the value files
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn path_for(&self, key: &str) -> PathBuf {
        let name: String = key
            .chars()
            .map(|c| if c.is_ascii_alphanumeric() || c == '.' || c == '_' || c == '-' { c } else { '_' })
            .collect();
        self.dir.join(format!("{}.txt", name))
    }

    /// Unique temp path next to `path`, e.g. `k.txt.4242.7.tmp`
    fn temp_path_for(path: &Path) -> PathBuf {
        let seq = TEMP_SEQ.fetch_add(1, Ordering::Relaxed);
        let mut name = path.file_name().unwrap_or_default().to_os_string();
        name.push(format!(".{}.{}.tmp", std::process::id(), seq));
        path.with_file_name(name)
    }
}

#[async_trait]
impl KeyValueStore for FileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        match fs::read_to_string(self.path_for(key)).await {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), StoreError> {
        fs::create_dir_all(&self.dir).await?;

        let path = self.path_for(key);
        let temp_path = Self::temp_path_for(&path);
        fs::write(&temp_path, value).await?;
        if let Err(e) = fs::rename(&temp_path, &path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        match fs::remove_file(self.path_for(key)).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn create_test_store() -> (FileStore, TempDir) {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let store = FileStore::with_dir(temp_dir.path().to_path_buf());
        (store, temp_dir)
    }

    fn temp_files(temp_dir: &TempDir) -> usize {
        std::fs::read_dir(temp_dir.path())
            .expect("Should list directory")
            .filter_map(|entry| entry.ok())
            .filter(|entry| entry.file_name().to_string_lossy().ends_with(".tmp"))
            .count()
    }

    #[tokio::test]
    async fn test_get_missing_key_returns_none() {
        let (store, _temp_dir) = create_test_store();
        assert!(store.get("nope").await.unwrap().is_none());
    }

    #[tokio::test]
    async fn test_set_then_get() {
        let (store, temp_dir) = create_test_store();

        store.set("adkit.ads_cache", "[1,2,3]").await.expect("Write should succeed");

        assert_eq!(store.get("adkit.ads_cache").await.unwrap().as_deref(), Some("[1,2,3]"));
        assert!(temp_dir.path().join("adkit.ads_cache.txt").exists());
        assert_eq!(temp_files(&temp_dir), 0, "No temp file should remain");
    }

    #[tokio::test]
    async fn test_set_creates_directory_if_missing() {
        let temp_dir = TempDir::new().expect("Failed to create temp directory");
        let nested = temp_dir.path().join("nested").join("store");
        let store = FileStore::with_dir(nested.clone());

        store.set("k", "v").await.expect("Write should succeed");

        assert!(nested.join("k.txt").exists());
    }

    #[tokio::test]
    async fn test_overwrite_and_remove() {
        let (store, _temp_dir) = create_test_store();

        store.set("k", "first").await.unwrap();
        store.set("k", "second").await.unwrap();
        assert_eq!(store.get("k").await.unwrap().as_deref(), Some("second"));

        store.remove("k").await.unwrap();
        assert!(store.get("k").await.unwrap().is_none());

        // Removing again is not an error
        store.remove("k").await.expect("Remove of missing key should succeed");
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 8)]
    async fn test_concurrent_sets_on_one_key_all_succeed() {
        let (store, temp_dir) = create_test_store();
        let store = std::sync::Arc::new(store);
        let large = "x".repeat(200_000);
        let small = "y".repeat(10);

        for _ in 0..50 {
            let a = {
                let store = store.clone();
                let value = large.clone();
                tokio::spawn(async move { store.set("k", &value).await })
            };
            let b = {
                let store = store.clone();
                let value = small.clone();
                tokio::spawn(async move { store.set("k", &value).await })
            };

            a.await.expect("Task should not panic").expect("Concurrent write should succeed");
            b.await.expect("Task should not panic").expect("Concurrent write should succeed");

            let stored = store.get("k").await.unwrap().expect("Value should exist");
            assert!(stored == large || stored == small, "Value should be one whole write");
        }

        assert_eq!(temp_files(&temp_dir), 0, "No temp file should remain");
    }

    #[test]
    fn test_temp_paths_are_unique() {
        let path = PathBuf::from("/tmp/adkit/k.txt");
        let a = FileStore::temp_path_for(&path);
        let b = FileStore::temp_path_for(&path);

        assert_ne!(a, b);
        assert_eq!(a.parent(), path.parent());
        assert!(a.to_string_lossy().ends_with(".tmp"));
    }

    #[test]
    fn test_key_is_sanitized() {
        let store = FileStore::with_dir(PathBuf::from("/tmp/adkit"));
        assert_eq!(store.path_for("@adkit/ads"), PathBuf::from("/tmp/adkit/_adkit_ads.txt"));
    }
}
