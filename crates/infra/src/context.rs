//! Application wiring
//!
//! [`AppContext`] is built once at startup and hands out the auth flow and
//! the backend client, all sharing one [`RuntimeConfig`] and one session.

use std::sync::Arc;

use anyhow::Context as _;
use gymreview_common::auth::{
    AuthError, CallbackHandler, KeycloakClient, LogoutCoordinator, Navigator, PkceStore,
    SessionStore,
};
use gymreview_common::config::{Environment, RuntimeConfig};
use gymreview_common::storage::{KeyValueStore, MemoryStorage};
use gymreview_common::time::{Clock, SystemClock};
use tracing::{info, warn};

use crate::api::GymApiClient;
use crate::config::{self, LoadOptions};
use crate::storage::KeychainStorage;

/// Shared services for one running client
pub struct AppContext {
    config: RuntimeConfig,
    session: SessionStore,
    keycloak: Arc<KeycloakClient>,
    logout: LogoutCoordinator,
    api: GymApiClient,
    navigator: Arc<dyn Navigator>,
}

impl AppContext {
    /// Load configuration and bind the production backends
    ///
    /// Tokens go to [`KeychainStorage`], the PKCE verifier to process
    /// memory (it only has to outlive one login round trip). Sessions survive
    /// a restart only when built with the `native-keychain` feature; the
    /// default build uses keyring's in-process mock store.
    ///
    /// # Errors
    /// Fails if the configuration cannot be loaded
    pub fn from_env(options: &LoadOptions, navigator: Arc<dyn Navigator>) -> anyhow::Result<Self> {
        let env = config::load(options).context("Failed to load configuration")?;
        if !KeychainStorage::is_persistent() {
            warn!("Keychain backend is in-memory; sessions will not survive a restart");
        }
        Ok(Self::with_storage(
            env,
            Arc::new(KeychainStorage::default()),
            Arc::new(MemoryStorage::new()),
            Arc::new(SystemClock),
            navigator,
        ))
    }

    /// Wire everything over the given backends
    pub fn with_storage(
        env: Environment,
        durable: Arc<dyn KeyValueStore>,
        session_scoped: Arc<dyn KeyValueStore>,
        clock: Arc<dyn Clock>,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        Self::assemble(
            RuntimeConfig::new(env),
            SessionStore::new(durable, clock),
            PkceStore::new(session_scoped),
            navigator,
        )
    }

    /// Context with no backing storage (nothing persists, nobody logs in)
    pub fn detached(env: Environment, navigator: Arc<dyn Navigator>) -> Self {
        Self::assemble(
            RuntimeConfig::new(env),
            SessionStore::detached(),
            PkceStore::detached(),
            navigator,
        )
    }

    fn assemble(
        config: RuntimeConfig,
        session: SessionStore,
        pkce: PkceStore,
        navigator: Arc<dyn Navigator>,
    ) -> Self {
        let keycloak = Arc::new(KeycloakClient::new(config.clone(), pkce));
        let logout = LogoutCoordinator::new(config.clone(), session.clone(), navigator.clone());
        let api = GymApiClient::new(config.clone(), Arc::new(session.clone()));

        info!(
            detached = session.is_detached(),
            keycloak_url = %config.keycloak_base_url(),
            realm = %config.realm(),
            api_url = %config.api_base_url(),
            "Application context ready"
        );

        Self { config, session, keycloak, logout, api, navigator }
    }

    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    #[must_use]
    pub const fn session(&self) -> &SessionStore {
        &self.session
    }

    #[must_use]
    pub const fn keycloak(&self) -> &Arc<KeycloakClient> {
        &self.keycloak
    }

    #[must_use]
    pub const fn api(&self) -> &GymApiClient {
        &self.api
    }

    /// Start a login: build the authorization URL and navigate there
    ///
    /// # Errors
    /// See [`KeycloakClient::build_auth_url`]
    pub async fn login(&self) -> Result<(), AuthError> {
        let url = self.keycloak.build_auth_url().await?;
        self.navigator.assign(&url);
        Ok(())
    }

    /// Handler for one load of the callback page
    #[must_use]
    pub fn callback_handler(&self) -> CallbackHandler {
        CallbackHandler::new(self.keycloak.clone(), self.session.clone(), self.navigator.clone())
    }

    /// End the session locally and at the identity provider
    ///
    /// # Errors
    /// See [`LogoutCoordinator::logout`]
    pub async fn logout(&self) -> Result<(), AuthError> {
        self.logout.logout().await
    }

    #[must_use]
    pub fn is_logged_in(&self) -> bool {
        self.session.is_logged_in()
    }
}
