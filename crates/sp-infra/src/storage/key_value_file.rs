//! File-based key-value store
//!
//! Persists a flat string map as a JSON file in the application data
//! directory. Backs the install dismissal record.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use tokio::fs;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tracing::debug;

use sp_core::ports::{KeyValueStoreError, KeyValueStorePort};

pub const DEFAULT_KEY_VALUE_FILE: &str = "securepass.json";

type Entries = BTreeMap<String, String>;

pub struct FileKeyValueStore {
    file_path: PathBuf,
    // Serializes read-modify-write cycles within this process.
    write_lock: Mutex<()>,
}

impl FileKeyValueStore {
    /// Create store with custom file path
    pub fn new(file_path: PathBuf) -> Self {
        Self {
            file_path,
            write_lock: Mutex::new(()),
        }
    }

    /// Create store with defaults
    pub fn with_defaults(base_dir: PathBuf) -> Self {
        Self::new(base_dir.join(DEFAULT_KEY_VALUE_FILE))
    }

    pub fn path(&self) -> &Path {
        &self.file_path
    }

    async fn load(&self) -> Result<Entries, KeyValueStoreError> {
        if !self.file_path.exists() {
            return Ok(Entries::new());
        }

        let content = fs::read_to_string(&self.file_path)
            .await
            .map_err(|e| KeyValueStoreError::Read(format!("{}: {}", self.file_path.display(), e)))?;

        if content.trim().is_empty() {
            return Ok(Entries::new());
        }

        serde_json::from_str(&content).map_err(|e| KeyValueStoreError::Corrupt(e.to_string()))
    }

    async fn save(&self, entries: &Entries) -> Result<(), KeyValueStoreError> {
        if let Some(parent) = self.file_path.parent() {
            fs::create_dir_all(parent)
                .await
                .map_err(|e| KeyValueStoreError::Write(format!("Failed to create dir: {}", e)))?;
        }

        let json = serde_json::to_string_pretty(entries)
            .map_err(|e| KeyValueStoreError::Write(format!("Failed to serialize: {}", e)))?;

        let mut file = fs::File::create(&self.file_path)
            .await
            .map_err(|e| KeyValueStoreError::Write(format!("Failed to create file: {}", e)))?;

        file.write_all(json.as_bytes())
            .await
            .map_err(|e| KeyValueStoreError::Write(format!("Failed to write file: {}", e)))?;

        file.sync_all()
            .await
            .map_err(|e| KeyValueStoreError::Write(format!("Failed to sync file: {}", e)))?;

        Ok(())
    }
}

#[async_trait]
impl KeyValueStorePort for FileKeyValueStore {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError> {
        Ok(self.load().await?.remove(key))
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        entries.insert(key.to_string(), value.to_string());
        self.save(&entries).await?;
        debug!(key, path = %self.file_path.display(), "key-value entry stored");
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError> {
        let _guard = self.write_lock.lock().await;
        let mut entries = self.load().await?;
        if entries.remove(key).is_some() {
            self.save(&entries).await?;
            debug!(key, "key-value entry removed");
        }
        Ok(())
    }
}
