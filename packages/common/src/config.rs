use std::path::PathBuf;

use serde::Deserialize;

/// Which object storage backend holds uploaded PDF bytes.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StorageBackend {
    #[default]
    Cloudinary,
    Filesystem,
}

/// App-level object storage configuration.
#[derive(Debug, Deserialize, Clone)]
pub struct StorageAppConfig {
    /// Active backend. Default: cloudinary.
    #[serde(default)]
    pub backend: StorageBackend,
    /// Folder (key prefix) uploads are placed in. Default: "pdfs".
    #[serde(default = "default_folder")]
    pub folder: String,
    /// Largest object accepted, in bytes. Default: 64 MiB.
    #[serde(default = "default_max_object_size")]
    pub max_object_size: u64,
    #[serde(default)]
    pub filesystem: FilesystemStorageConfig,
    #[serde(default)]
    pub cloudinary: CloudinaryConfig,
}

#[derive(Debug, Deserialize, Clone)]
pub struct FilesystemStorageConfig {
    /// Root directory for stored objects. Default: "./local_pdfs".
    #[serde(default = "default_base_path")]
    pub base_path: PathBuf,
}

/// Digest used to sign Cloudinary API requests; must match the account setting.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum SignatureAlgorithm {
    #[default]
    Sha1,
    Sha256,
}

/// Cloudinary account credentials.
///
/// All three credentials are required when the cloudinary backend is active.
#[derive(Debug, Deserialize, Clone)]
pub struct CloudinaryConfig {
    #[serde(default)]
    pub cloud_name: Option<String>,
    #[serde(default)]
    pub api_key: Option<String>,
    #[serde(default)]
    pub api_secret: Option<String>,
    /// Upload API origin. Default: "https://api.cloudinary.com".
    #[serde(default = "default_cloudinary_api_base")]
    pub api_base: String,
    /// Default: sha1, which is what new Cloudinary accounts verify.
    #[serde(default)]
    pub signature_algorithm: SignatureAlgorithm,
}

fn default_folder() -> String {
    "pdfs".into()
}
fn default_max_object_size() -> u64 {
    64 * 1024 * 1024
}
fn default_base_path() -> PathBuf {
    PathBuf::from("./local_pdfs")
}
fn default_cloudinary_api_base() -> String {
    "https://api.cloudinary.com".into()
}

impl Default for StorageAppConfig {
    fn default() -> Self {
        Self {
            backend: StorageBackend::default(),
            folder: default_folder(),
            max_object_size: default_max_object_size(),
            filesystem: FilesystemStorageConfig::default(),
            cloudinary: CloudinaryConfig::default(),
        }
    }
}

impl Default for FilesystemStorageConfig {
    fn default() -> Self {
        Self {
            base_path: default_base_path(),
        }
    }
}

impl Default for CloudinaryConfig {
    fn default() -> Self {
        Self {
            cloud_name: None,
            api_key: None,
            api_secret: None,
            api_base: default_cloudinary_api_base(),
            signature_algorithm: SignatureAlgorithm::default(),
        }
    }
}
