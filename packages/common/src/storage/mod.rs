mod error;
mod key;
mod traits;

#[cfg(feature = "object-storage")]
pub mod cloudinary;
pub mod filesystem;

pub use error::StorageError;
pub use key::{ObjectKey, StoredObject};
pub use traits::ObjectStore;
