//! Logout sequence
//!
//! Local state is wiped first, then the browser is handed to the identity
//! provider's end-session endpoint, which redirects back to the app root.

use std::sync::Arc;

use tracing::{info, warn};
use url::Url;

use super::error::AuthError;
use super::session::SessionStore;
use super::traits::Navigator;
use crate::config::RuntimeConfig;

pub struct LogoutCoordinator {
    config: RuntimeConfig,
    session: SessionStore,
    navigator: Arc<dyn Navigator>,
}

impl LogoutCoordinator {
    pub fn new(config: RuntimeConfig, session: SessionStore, navigator: Arc<dyn Navigator>) -> Self {
        Self { config, session, navigator }
    }

    /// End-session URL, with `id_token_hint` only when a hint is available
    ///
    /// # Errors
    /// `InvalidUrl` when the configured identity provider URL is malformed
    pub fn logout_url(&self, id_token: Option<&str>) -> Result<String, AuthError> {
        let mut url = Url::parse(&self.config.logout_endpoint())?;
        {
            let mut query = url.query_pairs_mut();
            if let Some(hint) = id_token.filter(|t| !t.is_empty()) {
                query.append_pair("id_token_hint", hint);
            }
            query.append_pair("post_logout_redirect_uri", &self.config.post_logout_redirect_uri());
        }
        Ok(url.into())
    }

    /// Clear the session and navigate to the end-session endpoint
    ///
    /// A no-op for a detached session. A failed local clear is logged but
    /// does not stop the navigation.
    ///
    /// # Errors
    /// `InvalidUrl` when the end-session URL cannot be built
    pub async fn logout(&self) -> Result<(), AuthError> {
        if self.session.is_detached() {
            return Ok(());
        }

        let id_token = self.session.id_token();

        if let Err(e) = self.session.clear() {
            warn!(error = %e, "Failed to clear local session during logout");
        }

        let url = self.logout_url(id_token.as_deref())?;
        info!(has_id_token_hint = id_token.is_some(), "Logging out");
        self.navigator.assign(&url);
        Ok(())
    }
}
