//! Pluggable storage for the persisted currency preference.
//!
//! The preference is a single string under a fixed key. Writes are
//! last-write-wins; there is no locking beyond what each backend needs to
//! stay memory-safe.

use std::collections::HashMap;
use std::path::PathBuf;

use async_trait::async_trait;
use tokio::sync::RwLock;

/// Key holding the last resolved country code.
pub const COUNTRY_CODE_KEY: &str = "carelink.country_code";

/// Errors from preference store operations.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type for preference store operations.
pub type StoreResult<T> = Result<T, StoreError>;

/// Get/set interface over client-side preference storage.
#[async_trait]
pub trait PreferenceStore: Send + Sync {
    /// Read the value stored under `key`, if any.
    async fn get(&self, key: &str) -> StoreResult<Option<String>>;

    /// Replace the value stored under `key`.
    async fn set(&self, key: &str, value: &str) -> StoreResult<()>;
}

/// Ephemeral store. State is lost on restart.
#[derive(Debug, Default)]
pub struct InMemoryPreferenceStore {
    values: RwLock<HashMap<String, String>>,
}

impl InMemoryPreferenceStore {
    pub fn new() -> Self {
        Self::default()
    }
}

#[async_trait]
impl PreferenceStore for InMemoryPreferenceStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.values.read().await.get(key).cloned())
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        self.values
            .write()
            .await
            .insert(key.to_string(), value.to_string());
        Ok(())
    }
}

/// JSON file store: one flat object of string keys to string values.
///
/// Writes go to a sibling temp file that is renamed over the target, so
/// readers see either the old map or the new one.
#[derive(Debug)]
pub struct FilePreferenceStore {
    path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: tokio::sync::Mutex<()>,
}

impl FilePreferenceStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            write_lock: tokio::sync::Mutex::new(()),
        }
    }

    async fn load(&self) -> StoreResult<HashMap<String, String>> {
        match tokio::fs::read_to_string(&self.path).await {
            Ok(contents) if contents.trim().is_empty() => Ok(HashMap::new()),
            Ok(contents) => Ok(serde_json::from_str(&contents)?),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(HashMap::new()),
            Err(e) => Err(e.into()),
        }
    }

    fn temp_path(&self) -> PathBuf {
        let mut name = self
            .path
            .file_name()
            .map(|n| n.to_os_string())
            .unwrap_or_default();
        name.push(".tmp");
        self.path.with_file_name(name)
    }
}

#[async_trait]
impl PreferenceStore for FilePreferenceStore {
    async fn get(&self, key: &str) -> StoreResult<Option<String>> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        let _guard = self.write_lock.lock().await;

        // A corrupt file would otherwise block every later write.
        let mut values = match self.load().await {
            Ok(values) => values,
            Err(StoreError::Serialization(e)) => {
                tracing::warn!(
                    "Replacing unreadable preference file {}: {}",
                    self.path.display(),
                    e
                );
                HashMap::new()
            }
            Err(e) => return Err(e),
        };
        values.insert(key.to_string(), value.to_string());

        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                tokio::fs::create_dir_all(parent).await?;
            }
        }
        let json = serde_json::to_string_pretty(&values)?;
        let temp = self.temp_path();
        tokio::fs::write(&temp, json).await?;
        tokio::fs::rename(&temp, &self.path).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[tokio::test]
    async fn memory_store_last_write_wins() {
        let store = InMemoryPreferenceStore::new();
        assert_eq!(store.get(COUNTRY_CODE_KEY).await.unwrap(), None);

        store.set(COUNTRY_CODE_KEY, "ET").await.unwrap();
        store.set(COUNTRY_CODE_KEY, "KE").await.unwrap();
        assert_eq!(
            store.get(COUNTRY_CODE_KEY).await.unwrap().as_deref(),
            Some("KE")
        );
    }

    #[tokio::test]
    async fn file_store_missing_file_reads_empty() {
        let dir = tempdir().unwrap();
        let store = FilePreferenceStore::new(dir.path().join("prefs.json"));
        assert_eq!(store.get(COUNTRY_CODE_KEY).await.unwrap(), None);
    }

    #[tokio::test]
    async fn file_store_persists_across_instances() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("nested").join("prefs.json");

        FilePreferenceStore::new(&path)
            .set(COUNTRY_CODE_KEY, "GB")
            .await
            .unwrap();

        let reopened = FilePreferenceStore::new(&path);
        assert_eq!(
            reopened.get(COUNTRY_CODE_KEY).await.unwrap().as_deref(),
            Some("GB")
        );
    }

    #[tokio::test]
    async fn file_store_rejects_corrupt_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, "not json").unwrap();

        let store = FilePreferenceStore::new(&path);
        assert!(matches!(
            store.get(COUNTRY_CODE_KEY).await,
            Err(StoreError::Serialization(_))
        ));
    }

    #[tokio::test]
    async fn file_store_set_recovers_from_torn_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("prefs.json");
        std::fs::write(&path, r#"{"carelink.country_code": "E"#).unwrap();

        let store = FilePreferenceStore::new(&path);
        store.set(COUNTRY_CODE_KEY, "GB").await.unwrap();

        assert_eq!(
            store.get(COUNTRY_CODE_KEY).await.unwrap().as_deref(),
            Some("GB")
        );
        assert!(!store.temp_path().exists());
    }
}
