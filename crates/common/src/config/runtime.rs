//! Shared, mutable configuration handle

use std::sync::Arc;

use gymreview_domain::constants::CALLBACK_PATH;
use parking_lot::RwLock;
use tracing::debug;

use super::{resolve_config, ConfigKey, Environment};

/// Cloneable handle resolving configuration at call time
///
/// Clones share the same environment, so an override set through one handle
/// is seen by every component holding another.
#[derive(Debug, Clone, Default)]
pub struct RuntimeConfig {
    env: Arc<RwLock<Environment>>,
}

impl RuntimeConfig {
    pub fn new(env: Environment) -> Self {
        Self { env: Arc::new(RwLock::new(env)) }
    }

    /// Inject a runtime override (takes effect on the next lookup)
    pub fn set_override(&self, key: ConfigKey, value: impl Into<String>) {
        let value = value.into();
        debug!(key = key.env_name(), "Runtime config override set");
        self.env.write().runtime_overrides.insert(key.env_name().to_string(), value);
    }

    /// Replace the whole environment
    pub fn replace(&self, env: Environment) {
        *self.env.write() = env;
    }

    /// Snapshot of the current environment
    #[must_use]
    pub fn environment(&self) -> Environment {
        self.env.read().clone()
    }

    /// Whether the client runs inside a page context
    #[must_use]
    pub fn is_browser(&self) -> bool {
        self.env.read().browser
    }

    #[must_use]
    pub fn resolve(&self, key: ConfigKey) -> String {
        resolve_config(&self.env.read(), key)
    }

    #[must_use]
    pub fn api_base_url(&self) -> String {
        self.resolve(ConfigKey::ApiUrl)
    }

    #[must_use]
    pub fn keycloak_base_url(&self) -> String {
        self.resolve(ConfigKey::KeycloakUrl)
    }

    #[must_use]
    pub fn realm(&self) -> String {
        self.resolve(ConfigKey::KeycloakRealm)
    }

    #[must_use]
    pub fn client_id(&self) -> String {
        self.resolve(ConfigKey::KeycloakClientId)
    }

    #[must_use]
    pub fn base_url(&self) -> String {
        self.resolve(ConfigKey::BaseUrl)
    }

    /// `<base_url>/keycloak-callback`, identical for authorize and token calls
    #[must_use]
    pub fn redirect_uri(&self) -> String {
        format!("{}{CALLBACK_PATH}", self.base_url())
    }

    /// `<base_url>/`
    #[must_use]
    pub fn post_logout_redirect_uri(&self) -> String {
        format!("{}/", self.base_url())
    }

    #[must_use]
    pub fn auth_endpoint(&self) -> String {
        self.oidc_endpoint("auth")
    }

    #[must_use]
    pub fn token_endpoint(&self) -> String {
        self.oidc_endpoint("token")
    }

    #[must_use]
    pub fn logout_endpoint(&self) -> String {
        self.oidc_endpoint("logout")
    }

    fn oidc_endpoint(&self, name: &str) -> String {
        let env = self.env.read();
        format!(
            "{}/realms/{}/protocol/openid-connect/{name}",
            resolve_config(&env, ConfigKey::KeycloakUrl),
            resolve_config(&env, ConfigKey::KeycloakRealm),
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derived_endpoints() {
        let config = RuntimeConfig::new(
            Environment::default()
                .with_build_value(ConfigKey::KeycloakUrl, "https://idp.example.com")
                .with_build_value(ConfigKey::KeycloakRealm, "gyms")
                .with_build_value(ConfigKey::BaseUrl, "https://app.example.com"),
        );

        assert_eq!(
            config.auth_endpoint(),
            "https://idp.example.com/realms/gyms/protocol/openid-connect/auth"
        );
        assert_eq!(
            config.token_endpoint(),
            "https://idp.example.com/realms/gyms/protocol/openid-connect/token"
        );
        assert_eq!(
            config.logout_endpoint(),
            "https://idp.example.com/realms/gyms/protocol/openid-connect/logout"
        );
        assert_eq!(config.redirect_uri(), "https://app.example.com/keycloak-callback");
        assert_eq!(config.post_logout_redirect_uri(), "https://app.example.com/");
    }

    #[test]
    fn overrides_are_seen_by_clones() {
        let config = RuntimeConfig::new(Environment::browser("http://localhost:3000"));
        let other = config.clone();

        config.set_override(ConfigKey::KeycloakRealm, "staging");

        assert_eq!(other.realm(), "staging");
    }

    #[test]
    fn defaults_without_environment() {
        let config = RuntimeConfig::default();
        assert!(!config.is_browser());
        assert_eq!(config.client_id(), "gym-review-app");
        assert_eq!(config.redirect_uri(), "http://localhost:3000/keycloak-callback");
    }
}
