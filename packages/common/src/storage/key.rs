use std::fmt;

use super::error::StorageError;

/// A validated object storage key, e.g. `pdfs/pdf_invoice.pdf`.
///
/// Keys are relative, `/`-separated, and never contain `..` segments,
/// backslashes or control characters.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct ObjectKey(String);

impl ObjectKey {
    /// Parse and validate a raw key.
    pub fn parse(raw: &str) -> Result<Self, StorageError> {
        if raw.is_empty() {
            return Err(StorageError::InvalidKey("key cannot be empty".into()));
        }
        if raw.starts_with('/') || raw.ends_with('/') {
            return Err(StorageError::InvalidKey(format!(
                "key must be relative and name a file: {raw}"
            )));
        }
        if raw.contains('\\') {
            return Err(StorageError::InvalidKey(format!(
                "backslashes are not allowed: {raw}"
            )));
        }
        if raw.chars().any(|c| c.is_control()) {
            return Err(StorageError::InvalidKey(
                "control characters are not allowed".into(),
            ));
        }
        if raw
            .split('/')
            .any(|segment| segment.is_empty() || segment == "." || segment == "..")
        {
            return Err(StorageError::InvalidKey(format!(
                "empty or relative path segment in: {raw}"
            )));
        }
        Ok(Self(raw.to_string()))
    }

    /// Derive the key an uploaded file is stored under: `{folder}/pdf_{filename}`.
    ///
    /// The key depends only on the filename, so uploading the same name twice
    /// replaces the stored bytes and both records point at one object.
    pub fn for_upload(folder: &str, filename: &str) -> Result<Self, StorageError> {
        let folder = folder.trim_matches('/');
        if folder.is_empty() {
            Self::parse(&format!("pdf_{filename}"))
        } else {
            Self::parse(&format!("{folder}/pdf_{filename}"))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Path segments of the key, in order.
    pub fn segments(&self) -> impl Iterator<Item = &str> {
        self.0.split('/')
    }
}

impl fmt::Debug for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "ObjectKey({})", self.0)
    }
}

impl fmt::Display for ObjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where an object ended up after a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoredObject {
    /// Addressable location of the content (URL or filesystem path).
    pub reference: String,
    /// Key the backend knows the object by; needed to delete it later.
    pub key: ObjectKey,
}
