//! Key-value storage seam
//!
//! The session core persists two kinds of state:
//!
//! - **Durable** slots (access token, ID token, expiry) that survive restarts
//! - **Session-scoped** slots (the PKCE verifier) that live only as long as the
//!   current browsing session
//!
//! Both are expressed through [`KeyValueStore`], modelled on the Web Storage
//! API (`getItem` / `setItem` / `removeItem`). Production wiring binds the
//! durable slot to a persistent backend and the session slot to
//! [`MemoryStorage`]; tests substitute [`MemoryStorage`] for both.

mod memory;

use std::sync::Arc;

pub use memory::MemoryStorage;
use thiserror::Error;

/// Errors raised by storage backends
#[derive(Debug, Error)]
pub enum StorageError {
    /// Backend could not be reached (locked keychain, missing service, ...)
    #[error("Storage unavailable: {0}")]
    Unavailable(String),

    /// Backend rejected the read or write
    #[error("Storage access failed: {0}")]
    AccessFailed(String),
}

/// Synchronous string key-value store
///
/// Implementations must be safe to share between tasks; all methods take
/// `&self`. Removing a missing key is not an error.
pub trait KeyValueStore: Send + Sync {
    /// Read a value, `Ok(None)` when the key is absent
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Insert or overwrite a value
    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete a value (idempotent)
    fn remove_item(&self, key: &str) -> Result<(), StorageError>;
}

impl<T: KeyValueStore + ?Sized> KeyValueStore for Arc<T> {
    fn get_item(&self, key: &str) -> Result<Option<String>, StorageError> {
        (**self).get_item(key)
    }

    fn set_item(&self, key: &str, value: &str) -> Result<(), StorageError> {
        (**self).set_item(key, value)
    }

    fn remove_item(&self, key: &str) -> Result<(), StorageError> {
        (**self).remove_item(key)
    }
}
