//! Key-value persistence behind the credential and profile screens.
//!
//! Stores are injected as `Arc<dyn KeyValueStore>`. Writes are last-write-wins;
//! a [`KeyValueStore::put_many`] batch is applied as a single update.

use std::collections::{BTreeMap, HashMap};
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::RwLock;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store io error: {0}")]
    Io(#[from] std::io::Error),
    #[error("store encoding error: {0}")]
    Encoding(#[from] serde_json::Error),
}

#[async_trait]
pub trait KeyValueStore: Send + Sync + 'static {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    async fn put_many(&self, entries: Vec<(String, String)>) -> Result<(), StoreError>;

    async fn remove(&self, key: &str) -> Result<(), StoreError>;

    async fn snapshot(&self) -> Result<HashMap<String, String>, StoreError>;

    async fn clear(&self) -> Result<(), StoreError>;

    async fn put(&self, key: &str, value: &str) -> Result<(), StoreError> {
        self.put_many(vec![(key.to_string(), value.to_string())])
            .await
    }
}

#[derive(Debug, Default)]
pub struct InMemoryStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl KeyValueStore for InMemoryStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put_many(&self, entries: Vec<(String, String)>) -> Result<(), StoreError> {
        self.entries.write().await.extend(entries);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        self.entries.write().await.remove(key);
        Ok(())
    }

    async fn snapshot(&self) -> Result<HashMap<String, String>, StoreError> {
        Ok(self.entries.read().await.clone())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        self.entries.write().await.clear();
        Ok(())
    }
}

/// Store persisted as a flat JSON object. The whole file is rewritten on every
/// update through a temporary sibling and a rename. Memory only changes once
/// the write succeeded.
#[derive(Debug)]
pub struct JsonFileStore {
    path: PathBuf,
    entries: RwLock<BTreeMap<String, String>>,
}

impl JsonFileStore {
    /// Open the store at `path`. A missing file yields an empty store.
    pub async fn open(path: impl Into<PathBuf>) -> Result<Self, StoreError> {
        let path = path.into();
        let entries = match tokio::fs::read_to_string(&path).await {
            Ok(contents) if contents.trim().is_empty() => BTreeMap::new(),
            Ok(contents) => serde_json::from_str(&contents)?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!(path = %path.display(), "preference file not found, starting empty");
                BTreeMap::new()
            }
            Err(e) => return Err(e.into()),
        };
        Ok(Self {
            path,
            entries: RwLock::new(entries),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    async fn persist(&self, entries: &BTreeMap<String, String>) -> Result<(), StoreError> {
        let json = serde_json::to_string_pretty(entries)?;
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            tokio::fs::create_dir_all(parent).await?;
        }
        let tmp = self.path.with_extension("json.tmp");
        tokio::fs::write(&tmp, json).await?;
        tokio::fs::rename(&tmp, &self.path).await?;
        tracing::trace!(path = %self.path.display(), keys = entries.len(), "preferences persisted");
        Ok(())
    }
}

#[async_trait]
impl KeyValueStore for JsonFileStore {
    async fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.read().await.get(key).cloned())
    }

    async fn put_many(&self, entries: Vec<(String, String)>) -> Result<(), StoreError> {
        let mut guard = self.entries.write().await;
        let mut next = guard.clone();
        next.extend(entries);
        self.persist(&next).await?;
        *guard = next;
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), StoreError> {
        let mut guard = self.entries.write().await;
        if !guard.contains_key(key) {
            return Ok(());
        }
        let mut next = guard.clone();
        next.remove(key);
        self.persist(&next).await?;
        *guard = next;
        Ok(())
    }

    async fn snapshot(&self) -> Result<HashMap<String, String>, StoreError> {
        Ok(self
            .entries
            .read()
            .await
            .iter()
            .map(|(k, v)| (k.clone(), v.clone()))
            .collect())
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut guard = self.entries.write().await;
        let next = BTreeMap::new();
        self.persist(&next).await?;
        *guard = next;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn in_memory_last_write_wins() {
        let store = InMemoryStore::new();
        store.put("name", "Ana").await.unwrap();
        store.put("name", "Bea").await.unwrap();
        assert_eq!(store.get("name").await.unwrap().as_deref(), Some("Bea"));
    }

    #[tokio::test]
    async fn in_memory_batch_and_clear() {
        let store = InMemoryStore::new();
        store
            .put_many(vec![
                ("email".into(), "a@b.com".into()),
                ("password".into(), "abc123".into()),
            ])
            .await
            .unwrap();
        assert_eq!(store.snapshot().await.unwrap().len(), 2);
        store.remove("password").await.unwrap();
        assert!(store.get("password").await.unwrap().is_none());
        store.clear().await.unwrap();
        assert!(store.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn json_store_missing_file_is_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileStore::open(dir.path().join("prefs.json")).await.unwrap();
        assert!(store.snapshot().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn json_store_rejects_corrupt_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "{not json").unwrap();
        let res = JsonFileStore::open(&path).await;
        assert!(matches!(res, Err(StoreError::Encoding(_))));
    }
}
