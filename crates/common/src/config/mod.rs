//! Runtime configuration resolution
//!
//! Values are looked up at call time, never cached, so a deployment can inject
//! overrides after the binary was built. Each value walks an ordered list of
//! [`ConfigProvider`]s; the first one that yields a non-empty string wins and
//! the built-in default closes the chain.
//!
//! ```text
//! runtime override ──► deployed origin ──► build env ──► default
//!  (browser only)       (base URL only)
//! ```

mod providers;
mod runtime;

use std::collections::HashMap;

use gymreview_domain::constants::{
    DEFAULT_API_URL, DEFAULT_BASE_URL, DEFAULT_KEYCLOAK_CLIENT_ID, DEFAULT_KEYCLOAK_REALM,
    DEFAULT_KEYCLOAK_URL, ENV_API_URL, ENV_BASE_URL, ENV_KEYCLOAK_CLIENT_ID, ENV_KEYCLOAK_REALM,
    ENV_KEYCLOAK_URL,
};
pub use providers::{
    build_env, deployed_origin, resolve_config, resolve_with, runtime_override, ConfigProvider,
    DEFAULT_PROVIDERS,
};
pub use runtime::RuntimeConfig;

/// Configuration values the client needs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    /// Backend REST API base URL
    ApiUrl,
    /// Identity provider base URL
    KeycloakUrl,
    /// Identity provider realm
    KeycloakRealm,
    /// Public OAuth client id
    KeycloakClientId,
    /// Frontend origin used to build redirect URIs
    BaseUrl,
}

impl ConfigKey {
    /// Every key, in declaration order
    pub const ALL: [Self; 5] =
        [Self::ApiUrl, Self::KeycloakUrl, Self::KeycloakRealm, Self::KeycloakClientId, Self::BaseUrl];

    /// Environment variable name carrying this key
    #[must_use]
    pub const fn env_name(self) -> &'static str {
        match self {
            Self::ApiUrl => ENV_API_URL,
            Self::KeycloakUrl => ENV_KEYCLOAK_URL,
            Self::KeycloakRealm => ENV_KEYCLOAK_REALM,
            Self::KeycloakClientId => ENV_KEYCLOAK_CLIENT_ID,
            Self::BaseUrl => ENV_BASE_URL,
        }
    }

    /// Built-in fallback (local development stack)
    #[must_use]
    pub const fn default_value(self) -> &'static str {
        match self {
            Self::ApiUrl => DEFAULT_API_URL,
            Self::KeycloakUrl => DEFAULT_KEYCLOAK_URL,
            Self::KeycloakRealm => DEFAULT_KEYCLOAK_REALM,
            Self::KeycloakClientId => DEFAULT_KEYCLOAK_CLIENT_ID,
            Self::BaseUrl => DEFAULT_BASE_URL,
        }
    }

    /// Look a key up by its environment variable name
    #[must_use]
    pub fn from_env_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|key| key.env_name() == name)
    }
}

/// Everything the providers may consult
///
/// `browser` marks a context with a live page (runtime overrides and the
/// location origin are only meaningful there). `build_env` holds values baked
/// in at build time or read from the process environment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Environment {
    /// Running inside a page context
    pub browser: bool,
    /// Values injected at runtime after the build (keyed by env name)
    pub runtime_overrides: HashMap<String, String>,
    /// Build-time / process environment values (keyed by env name)
    pub build_env: HashMap<String, String>,
    /// Origin of the current page, when known
    pub location_origin: Option<String>,
}

impl Environment {
    /// Non-browser environment with only build values
    #[must_use]
    pub fn detached(build_env: HashMap<String, String>) -> Self {
        Self { build_env, ..Self::default() }
    }

    /// Browser environment served from `origin`
    #[must_use]
    pub fn browser(origin: impl Into<String>) -> Self {
        Self { browser: true, location_origin: Some(origin.into()), ..Self::default() }
    }

    /// Builder-style build env entry
    #[must_use]
    pub fn with_build_value(mut self, key: ConfigKey, value: impl Into<String>) -> Self {
        self.build_env.insert(key.env_name().to_string(), value.into());
        self
    }

    /// Builder-style runtime override entry
    #[must_use]
    pub fn with_override(mut self, key: ConfigKey, value: impl Into<String>) -> Self {
        self.runtime_overrides.insert(key.env_name().to_string(), value.into());
        self
    }

    pub(crate) fn build_value(&self, key: ConfigKey) -> Option<&str> {
        non_empty(self.build_env.get(key.env_name()))
    }

    pub(crate) fn override_value(&self, key: ConfigKey) -> Option<&str> {
        non_empty(self.runtime_overrides.get(key.env_name()))
    }
}

fn non_empty(value: Option<&String>) -> Option<&str> {
    value.map(String::as_str).filter(|v| !v.is_empty())
}
