use async_trait::async_trait;

use super::error::StorageError;
use super::key::{ObjectKey, StoredObject};

/// Remote (or local) storage for uploaded document bytes.
#[async_trait]
pub trait ObjectStore: Send + Sync {
    /// Upload bytes under `key` and return where they can be fetched from.
    async fn put(&self, key: &ObjectKey, data: &[u8]) -> Result<StoredObject, StorageError>;

    /// Delete the object stored under `key`.
    ///
    /// Returns `true` if the object was deleted, `false` if it did not exist.
    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError>;

    /// Folder (key prefix) uploads are placed in.
    fn folder(&self) -> &str;

    /// Short backend name used in logs.
    fn backend_name(&self) -> &'static str;

    /// Store an uploaded file under the key derived from its name.
    async fn store(&self, data: &[u8], desired_name: &str) -> Result<StoredObject, StorageError> {
        let key = ObjectKey::for_upload(self.folder(), desired_name)?;
        self.put(&key, data).await
    }
}

/// Reject payloads over `limit` before they reach a backend.
pub(crate) fn check_size(data: &[u8], limit: u64) -> Result<(), StorageError> {
    let actual = data.len() as u64;
    if actual > limit {
        return Err(StorageError::SizeLimitExceeded { actual, limit });
    }
    Ok(())
}
