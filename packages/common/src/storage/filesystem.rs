use std::path::PathBuf;

use async_trait::async_trait;
use tokio::fs;

use super::error::StorageError;
use super::key::{ObjectKey, StoredObject};
use super::traits::{ObjectStore, check_size};

/// Filesystem-backed object store.
///
/// Objects live at `{base_path}/{key}`; the returned reference is that path.
pub struct FilesystemObjectStore {
    base_path: PathBuf,
    folder: String,
    max_size: u64,
}

impl FilesystemObjectStore {
    /// Create a new filesystem object store.
    pub async fn new(
        base_path: PathBuf,
        folder: impl Into<String>,
        max_size: u64,
    ) -> Result<Self, StorageError> {
        fs::create_dir_all(&base_path).await?;
        fs::create_dir_all(base_path.join(".tmp")).await?;
        Ok(Self {
            base_path,
            folder: folder.into(),
            max_size,
        })
    }

    /// Compute the filesystem path for a given key.
    fn object_path(&self, key: &ObjectKey) -> PathBuf {
        key.segments()
            .fold(self.base_path.clone(), |path, segment| path.join(segment))
    }

    /// Path for a temporary file during writes.
    fn temp_path(&self) -> PathBuf {
        self.base_path
            .join(".tmp")
            .join(uuid::Uuid::new_v4().to_string())
    }
}

#[async_trait]
impl ObjectStore for FilesystemObjectStore {
    async fn put(&self, key: &ObjectKey, data: &[u8]) -> Result<StoredObject, StorageError> {
        check_size(data, self.max_size)?;

        let object_path = self.object_path(key);
        let temp_path = self.temp_path();
        if let Err(e) = fs::write(&temp_path, data).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        if let Some(parent) = object_path.parent() {
            fs::create_dir_all(parent).await?;
        }

        // Same key overwrites the previous upload.
        if let Err(e) = fs::rename(&temp_path, &object_path).await {
            let _ = fs::remove_file(&temp_path).await;
            return Err(e.into());
        }

        tracing::debug!(key = %key, path = %object_path.display(), "Stored object on disk");

        Ok(StoredObject {
            reference: object_path.to_string_lossy().into_owned(),
            key: key.clone(),
        })
    }

    async fn delete(&self, key: &ObjectKey) -> Result<bool, StorageError> {
        let object_path = self.object_path(key);
        match fs::remove_file(&object_path).await {
            Ok(()) => Ok(true),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(false),
            Err(e) => Err(e.into()),
        }
    }

    fn folder(&self) -> &str {
        &self.folder
    }

    fn backend_name(&self) -> &'static str {
        "filesystem"
    }
}
