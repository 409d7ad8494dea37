//! Key/value persistence
//!
//! The game keeps two tiny records (best score and settings). On the web they
//! live in LocalStorage; tests and the native binary use an in-memory map.

use std::collections::HashMap;

use thiserror::Error;

/// Storage failures surfaced to callers, which log them and fall back to defaults
#[derive(Debug, Error, PartialEq, Eq)]
pub enum StoreError {
    /// No storage backend (private mode, storage disabled, no window)
    #[error("storage is unavailable")]
    Unavailable,
    /// The backend refused to write (quota exceeded, security error)
    #[error("write rejected for key `{key}`")]
    WriteRejected { key: String },
    /// The backend failed to read
    #[error("read failed for key `{key}`")]
    ReadFailed { key: String },
}

/// String key/value store
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
}

impl<S: KeyValueStore + ?Sized> KeyValueStore for Box<S> {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        (**self).get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        (**self).set(key, value)
    }
}

/// Store backed by a `HashMap`
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }
}

#[cfg(target_arch = "wasm32")]
pub use local::LocalStore;

#[cfg(target_arch = "wasm32")]
mod local {
    use super::{KeyValueStore, StoreError};

    /// Browser LocalStorage
    pub struct LocalStore {
        storage: web_sys::Storage,
    }

    impl LocalStore {
        /// Open the window's LocalStorage
        pub fn open() -> Result<Self, StoreError> {
            web_sys::window()
                .and_then(|w| w.local_storage().ok())
                .flatten()
                .map(|storage| Self { storage })
                .ok_or(StoreError::Unavailable)
        }
    }

    impl KeyValueStore for LocalStore {
        fn get(&self, key: &str) -> Result<Option<String>, StoreError> {
            self.storage
                .get_item(key)
                .map_err(|_| StoreError::ReadFailed {
                    key: key.to_string(),
                })
        }

        fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
            self.storage
                .set_item(key, value)
                .map_err(|_| StoreError::WriteRejected {
                    key: key.to_string(),
                })
        }
    }
}
