//! One JSON file per cache key.

use std::io::ErrorKind;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use pyloc_core::{CacheStoreError, Interpreter, InterpreterCacheStore, ScopeKey};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};
use tracing::debug;

const SNAPSHOT_EXTENSION: &str = "json";

/// On-disk form of one cache entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CachedSnapshot {
    pub key: ScopeKey,
    pub cached_at: DateTime<Utc>,
    pub interpreters: Vec<Interpreter>,
}

/// [`InterpreterCacheStore`] writing snapshots under a root directory.
#[derive(Debug, Clone)]
pub struct JsonFileCacheStore {
    root: PathBuf,
}

impl JsonFileCacheStore {
    /// Create a store rooted at `root`. The directory is created on first save.
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    /// File that holds the snapshot for `key`.
    pub fn snapshot_path(&self, key: &ScopeKey) -> PathBuf {
        self.root
            .join(format!("{}.{SNAPSHOT_EXTENSION}", file_stem(key)))
    }

    /// Read the full snapshot for `key`, including its timestamp.
    pub async fn load_snapshot(
        &self,
        key: &ScopeKey,
    ) -> Result<Option<CachedSnapshot>, CacheStoreError> {
        let path = self.snapshot_path(key);
        let json = match tokio::fs::read_to_string(&path).await {
            Ok(json) => json,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
            Err(e) => return Err(io_error(&path, &e)),
        };

        let snapshot: CachedSnapshot = serde_json::from_str(&json)
            .map_err(|e| CacheStoreError::Serialization(format!("{}: {e}", path.display())))?;
        Ok(Some(snapshot))
    }
}

/// Hex SHA-256 of the key. Fixed length whatever the scope; the readable
/// key is stored inside the snapshot.
fn file_stem(key: &ScopeKey) -> String {
    hex::encode(Sha256::digest(key.to_string().as_bytes()))
}

fn io_error(path: &Path, err: &std::io::Error) -> CacheStoreError {
    CacheStoreError::Io(format!("{}: {err}", path.display()))
}

#[async_trait]
impl InterpreterCacheStore for JsonFileCacheStore {
    async fn load(&self, key: &ScopeKey) -> Result<Option<Vec<Interpreter>>, CacheStoreError> {
        Ok(self
            .load_snapshot(key)
            .await?
            .map(|snapshot| snapshot.interpreters))
    }

    async fn save(&self, key: &ScopeKey, interpreters: &[Interpreter]) -> Result<(), CacheStoreError> {
        tokio::fs::create_dir_all(&self.root)
            .await
            .map_err(|e| io_error(&self.root, &e))?;

        let snapshot = CachedSnapshot {
            key: key.clone(),
            cached_at: Utc::now(),
            interpreters: interpreters.to_vec(),
        };
        let json = serde_json::to_string_pretty(&snapshot)
            .map_err(|e| CacheStoreError::Serialization(e.to_string()))?;

        // Write then rename so readers never see a partial file.
        let path = self.snapshot_path(key);
        let tmp = path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json)
            .await
            .map_err(|e| io_error(&tmp, &e))?;
        tokio::fs::rename(&tmp, &path)
            .await
            .map_err(|e| io_error(&path, &e))?;

        debug!(key = %key, path = %path.display(), count = interpreters.len(), "Saved snapshot");
        Ok(())
    }

    async fn clear(&self) -> Result<usize, CacheStoreError> {
        let mut entries = match tokio::fs::read_dir(&self.root).await {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(0),
            Err(e) => return Err(io_error(&self.root, &e)),
        };

        let mut removed = 0;
        while let Some(entry) = entries
            .next_entry()
            .await
            .map_err(|e| io_error(&self.root, &e))?
        {
            let path = entry.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(SNAPSHOT_EXTENSION) {
                continue;
            }
            tokio::fs::remove_file(&path)
                .await
                .map_err(|e| io_error(&path, &e))?;
            removed += 1;
        }

        debug!(root = %self.root.display(), removed, "Cleared snapshots");
        Ok(removed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pyloc_core::{InterpreterKind, Scope};

    fn sample() -> Vec<Interpreter> {
        vec![
            Interpreter::new("/usr/bin/python3", "Python 3.10.4"),
            Interpreter::new("/opt/conda/bin/python", "Python 3.11.5").with_kind(InterpreterKind::Conda),
        ]
    }

    #[tokio::test]
    async fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCacheStore::new(dir.path().join("cache"));
        let key = ScopeKey::for_scope("known-paths", Some(&Scope::new("/home/dev/project")));

        store.save(&key, &sample()).await.unwrap();

        assert_eq!(store.load(&key).await.unwrap(), Some(sample()));
        let snapshot = store.load_snapshot(&key).await.unwrap().unwrap();
        assert_eq!(snapshot.key, key);
        assert!(snapshot.cached_at <= Utc::now());
    }

    #[tokio::test]
    async fn test_missing_snapshot_is_none() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCacheStore::new(dir.path());
        assert_eq!(store.load(&ScopeKey::global("known-paths")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_corrupt_snapshot_is_a_serialization_error() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCacheStore::new(dir.path());
        let key = ScopeKey::global("known-paths");
        std::fs::write(store.snapshot_path(&key), "{ not json").unwrap();

        assert!(matches!(
            store.load(&key).await,
            Err(CacheStoreError::Serialization(_))
        ));
    }

    #[test]
    fn test_keys_map_to_distinct_safe_file_names() {
        let store = JsonFileCacheStore::new("/cache");
        let a = store.snapshot_path(&ScopeKey::for_scope("known-paths", Some(&Scope::new("/a_b"))));
        let b = store.snapshot_path(&ScopeKey::for_scope("known-paths", Some(&Scope::new("/a/b"))));
        let global = store.snapshot_path(&ScopeKey::global("known-paths"));

        assert_ne!(a, b);
        assert_eq!(global.parent(), Some(Path::new("/cache")));
        assert_eq!(global, store.snapshot_path(&ScopeKey::global("known-paths")));
        for path in [&a, &b, &global] {
            let name = path.file_name().unwrap().to_str().unwrap();
            assert_eq!(name.len(), 64 + ".json".len());
            assert!(name.trim_end_matches(".json").bytes().all(|b| b.is_ascii_hexdigit()));
        }
    }

    #[tokio::test]
    async fn test_deep_scope_round_trips() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCacheStore::new(dir.path());
        let deep = format!("/home/dev/{}", "nested-workspace-dir/".repeat(15));
        assert!(deep.len() > 255);
        let key = ScopeKey::for_scope("known-paths", Some(&Scope::new(deep)));

        store.save(&key, &sample()).await.unwrap();

        assert_eq!(store.load(&key).await.unwrap(), Some(sample()));
        assert_eq!(store.load_snapshot(&key).await.unwrap().unwrap().key, key);
        assert_eq!(store.clear().await.unwrap(), 1);
    }

    #[tokio::test]
    async fn test_clear_removes_only_snapshots() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCacheStore::new(dir.path());
        store.save(&ScopeKey::global("known-paths"), &sample()).await.unwrap();
        store
            .save(&ScopeKey::for_scope("known-paths", Some(&Scope::new("/ws"))), &[])
            .await
            .unwrap();
        std::fs::write(dir.path().join("README"), "keep").unwrap();

        assert_eq!(store.clear().await.unwrap(), 2);
        assert!(dir.path().join("README").exists());
        assert_eq!(store.load(&ScopeKey::global("known-paths")).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_clear_missing_root() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileCacheStore::new(dir.path().join("never-created"));
        assert_eq!(store.clear().await.unwrap(), 0);
    }
}
