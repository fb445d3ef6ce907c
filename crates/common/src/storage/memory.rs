//! In-memory storage backend

use std::collections::HashMap;

use parking_lot::Mutex;

use super::{KeyValueStore, StorageError};

/// Process-local store; contents vanish when the value is dropped
///
/// Used as the session-scoped verifier slot in production and as a stand-in
/// for every slot in tests.
#[derive(Debug, Default)]
pub struct MemoryStorage {
    data: Mutex<HashMap<String, String>>,
}

impl MemoryStorage {
    /// Create an empty store
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether `key` currently holds a value
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.data.lock().contains_key(key)
    }

    /// Number of stored entries
    #[must_use]
    pub fn len(&self) -> usize {
        self.data.lock().len()
    }

    /// Whether the store is empty
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.data.lock().is_empty()
    }
}

impl KeyValueStore for MemoryStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.data.lock().get(key).cloned())
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        self.data.lock().insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        self.data.lock().remove(key);
        Ok(())
    }
}
