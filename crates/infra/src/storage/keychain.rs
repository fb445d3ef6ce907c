//! Keychain-backed durable storage
//!
//! Each storage key becomes one credential under a shared service name
//! (`<service>` / `kc_access_token`, ...). Without the `native-keychain`
//! feature keyring falls back to its in-process mock store.
//!
//! ## Usage
//!
//! ```no_run
//! use gymreview_common::storage::KeyValueStore;
//! use gymreview_infra::storage::KeychainStorage;
//!
//! let storage = KeychainStorage::new("GymReview.session");
//! storage.set_item("kc_access_token", "eyJ...")?;
//! assert!(storage.get_item("kc_access_token")?.is_some());
//! # Ok::<(), gymreview_common::storage::StorageError>(())
//! ```

use std::collections::HashMap;
use std::sync::Arc;

use gymreview_common::storage::{KeyValueStore, StorageError};
use keyring::Entry;
use parking_lot::Mutex;
use tracing::debug;

/// Default keychain service for session tokens
pub const DEFAULT_SERVICE_NAME: &str = "GymReview.session";

/// Platform keychain as a [`KeyValueStore`]
///
/// Entries are created once per key and reused, so every access to a key
/// goes through the same credential handle.
pub struct KeychainStorage {
    service_name: String,
    entries: Mutex<HashMap<String, Arc<Entry>>>,
}

impl KeychainStorage {
    pub fn new(service_name: impl Into<String>) -> Self {
        Self { service_name: service_name.into(), entries: Mutex::new(HashMap::new()) }
    }

    #[must_use]
    pub fn service_name(&self) -> &str {
        &self.service_name
    }

    /// Whether values outlive the process
    ///
    /// Only with the `native-keychain` feature; otherwise keyring's mock
    /// store keeps them in memory.
    #[must_use]
    pub const fn is_persistent() -> bool {
        cfg!(feature = "native-keychain")
    }

    fn entry(&self, key: &str) -> Result<Arc<Entry>, StorageError> {
        let mut entries = self.entries.lock();
        if let Some(entry) = entries.get(key) {
            return Ok(Arc::clone(entry));
        }

        let entry = Entry::new(&self.service_name, key).map_err(|e| {
            StorageError::Unavailable(format!("Failed to open keychain entry {key}: {e}"))
        })?;
        let entry = Arc::new(entry);
        entries.insert(key.to_string(), Arc::clone(&entry));
        Ok(entry)
    }
}

impl Default for KeychainStorage {
    fn default() -> Self {
        Self::new(DEFAULT_SERVICE_NAME)
    }
}

impl std::fmt::Debug for KeychainStorage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("KeychainStorage").field("service_name", &self.service_name).finish()
    }
}

impl KeyValueStore for KeychainStorage {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        debug!(service = %self.service_name, key = %key, "Reading keychain entry");

        match self.entry(key)?.get_password() {
            Ok(value) => Ok(Some(value)),
            Err(keyring::Error::NoEntry) => Ok(None),
            Err(e) => Err(map_keyring_error(key, "read", &e)),
        }
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        debug!(service = %self.service_name, key = %key, "Writing keychain entry");

        self.entry(key)?.set_password(value).map_err(|e| map_keyring_error(key, "write", &e))
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        debug!(service = %self.service_name, key = %key, "Deleting keychain entry");

        match self.entry(key)?.delete_credential() {
            Ok(()) | Err(keyring::Error::NoEntry) => Ok(()),
            Err(e) => Err(map_keyring_error(key, "delete", &e)),
        }
    }
}

fn map_keyring_error(key: &str, action: &str, err: &keyring::Error) -> StorageError {
    match err {
        keyring::Error::NoStorageAccess(_) | keyring::Error::PlatformFailure(_) => {
            StorageError::Unavailable(format!("Failed to {action} {key}: {err}"))
        }
        _ => StorageError::AccessFailed(format!("Failed to {action} {key}: {err}")),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Validates `KeychainStorage` behavior for the set/get/remove scenario.
    ///
    /// Assertions:
    /// - Confirms a stored value reads back.
    /// - Confirms removal is idempotent and leaves the key absent.
    #[test]
    fn test_round_trip() {
        let storage = KeychainStorage::new("GymReview.test.round_trip");

        assert_eq!(storage.get_item("kc_access_token").unwrap(), None);

        storage.set_item("kc_access_token", "token-1").unwrap();
        storage.set_item("kc_access_token", "token-2").unwrap();
        assert_eq!(storage.get_item("kc_access_token").unwrap().as_deref(), Some("token-2"));

        storage.remove_item("kc_access_token").unwrap();
        storage.remove_item("kc_access_token").unwrap();
        assert_eq!(storage.get_item("kc_access_token").unwrap(), None);
    }

    #[test]
    fn test_keys_are_independent() {
        let storage = KeychainStorage::default();
        storage.set_item("kc_id_token", "id").unwrap();
        storage.set_item("kc_token_expiry", "42").unwrap();

        storage.remove_item("kc_id_token").unwrap();

        assert_eq!(storage.get_item("kc_token_expiry").unwrap().as_deref(), Some("42"));
        assert_eq!(storage.service_name(), DEFAULT_SERVICE_NAME);
    }

    #[test]
    fn test_persistence_follows_feature() {
        assert_eq!(KeychainStorage::is_persistent(), cfg!(feature = "native-keychain"));
    }
}
