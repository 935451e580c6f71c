//! Durable key-value storage port
//!
//! Backs the install dismissal record, which must survive restarts.

use async_trait::async_trait;

use crate::ports::errors::KeyValueStoreError;

#[async_trait]
pub trait KeyValueStorePort: Send + Sync {
    async fn get(&self, key: &str) -> Result<Option<String>, KeyValueStoreError>;

    async fn set(&self, key: &str, value: &str) -> Result<(), KeyValueStoreError>;

    async fn remove(&self, key: &str) -> Result<(), KeyValueStoreError>;

    /// Read a flag stored as `"true"`.
    async fn get_flag(&self, key: &str) -> Result<bool, KeyValueStoreError> {
        Ok(self.get(key).await?.as_deref() == Some("true"))
    }
}
