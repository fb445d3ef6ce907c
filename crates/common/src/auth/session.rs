//! Client-side session (access token, ID token, expiry)
//!
//! Tokens live in durable storage so a login survives restarts. Expiry is
//! checked lazily on every [`SessionStore::is_logged_in`] call; an expired
//! session is wiped as a side effect.

use std::fmt;
use std::sync::Arc;

use gymreview_domain::constants::{
    STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_ID_TOKEN, STORAGE_KEY_TOKEN_EXPIRY,
};
use tracing::{debug, info, warn};

use super::error::AuthError;
use crate::storage::{KeyValueStore, StorageError};
use crate::time::{Clock, SystemClock};

/// Durable token slots plus the clock used to judge expiry
///
/// A store built with [`SessionStore::detached`] has no backing storage:
/// writes are dropped, reads return `None` and nobody is ever logged in.
#[derive(Clone)]
pub struct SessionStore {
    storage: Option<Arc<dyn KeyValueStore>>,
    clock: Arc<dyn Clock>,
}

impl SessionStore {
    pub fn new(storage: Arc<dyn KeyValueStore>, clock: Arc<dyn Clock>) -> Self {
        Self { storage: Some(storage), clock }
    }

    /// Store without backing storage (non-browser context)
    #[must_use]
    pub fn detached() -> Self {
        Self { storage: None, clock: Arc::new(SystemClock) }
    }

    #[must_use]
    pub const fn is_detached(&self) -> bool {
        self.storage.is_none()
    }

    /// Persist a freshly issued token
    ///
    /// An empty `id_token` is ignored. Without `expires_in_secs` any
    /// previously stored expiry is left in place. The access token is written
    /// last; if any write fails the whole session is cleared, so a partial
    /// save never leaves a token without its expiry.
    ///
    /// # Errors
    /// `Storage` if a write fails
    pub fn save(
        &self,
        access_token: &str,
        expires_in_secs: Option<i64>,
        id_token: Option<&str>,
    ) -> Result<(), AuthError> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };

        let written = self.write_session(storage.as_ref(), access_token, expires_in_secs, id_token);
        if let Err(e) = written {
            warn!(error = %e, "Session save failed, clearing partial session");
            if let Err(clear_err) = self.clear() {
                warn!(error = %clear_err, "Failed to clear partial session");
            }
            return Err(e.into());
        }

        info!(
            expires_in = ?expires_in_secs,
            has_id_token = id_token.is_some_and(|t| !t.is_empty()),
            "Session saved"
        );
        Ok(())
    }

    /// Raw access token read, no expiry check
    #[must_use]
    pub fn access_token(&self) -> Option<String> {
        self.read(STORAGE_KEY_ACCESS_TOKEN)
    }

    #[must_use]
    pub fn id_token(&self) -> Option<String> {
        self.read(STORAGE_KEY_ID_TOKEN)
    }

    /// Stored expiry in epoch milliseconds
    #[must_use]
    pub fn expires_at(&self) -> Option<i64> {
        self.read(STORAGE_KEY_TOKEN_EXPIRY).and_then(|raw| raw.trim().parse().ok())
    }

    /// Whether a non-expired access token is present
    ///
    /// Finding an expired (or unreadable) expiry clears the whole session.
    pub fn is_logged_in(&self) -> bool {
        if self.access_token().filter(|t| !t.is_empty()).is_none() {
            return false;
        }

        let Some(raw_expiry) = self.read(STORAGE_KEY_TOKEN_EXPIRY) else {
            return true;
        };

        let now = self.clock.now_millis();
        let expired = raw_expiry.trim().parse::<i64>().map_or(true, |expires_at| now >= expires_at);

        if expired {
            info!("Access token expired, clearing session");
            if let Err(e) = self.clear() {
                warn!(error = %e, "Failed to clear expired session");
            }
            return false;
        }

        true
    }

    /// `Authorization` header value while logged in
    #[must_use]
    pub fn bearer_header(&self) -> Option<String> {
        if !self.is_logged_in() {
            return None;
        }
        self.access_token().map(|token| format!("Bearer {token}"))
    }

    /// Remove access token, expiry and ID token
    ///
    /// All three removals are attempted; the first failure is returned.
    ///
    /// # Errors
    /// `Storage` if any removal fails
    pub fn clear(&self) -> Result<(), AuthError> {
        let Some(storage) = &self.storage else {
            return Ok(());
        };

        let results = [STORAGE_KEY_ACCESS_TOKEN, STORAGE_KEY_TOKEN_EXPIRY, STORAGE_KEY_ID_TOKEN]
            .map(|key| storage.remove_item(key));

        debug!("Session cleared");
        results.into_iter().collect::<Result<Vec<()>, _>>().map(drop).map_err(AuthError::from)
    }

    fn write_session(
        &self,
        storage: &dyn KeyValueStore,
        access_token: &str,
        expires_in_secs: Option<i64>,
        id_token: Option<&str>,
    ) -> Result<(), StorageError> {
        if let Some(secs) = expires_in_secs {
            let expires_at = self.clock.now_millis().saturating_add(secs.saturating_mul(1000));
            storage.set_item(STORAGE_KEY_TOKEN_EXPIRY, &expires_at.to_string())?;
        }

        if let Some(id_token) = id_token.filter(|t| !t.is_empty()) {
            storage.set_item(STORAGE_KEY_ID_TOKEN, id_token)?;
        }

        storage.set_item(STORAGE_KEY_ACCESS_TOKEN, access_token)
    }

    fn read(&self, key: &str) -> Option<String> {
        let storage = self.storage.as_ref()?;
        match storage.get_item(key) {
            Ok(value) => value,
            Err(e) => {
                warn!(key, error = %e, "Session storage read failed");
                None
            }
        }
    }
}

impl fmt::Debug for SessionStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionStore").field("attached", &self.storage.is_some()).finish()
    }
}
