pub mod config;
pub mod storage;

pub use config::{SignatureAlgorithm, StorageAppConfig, StorageBackend};
