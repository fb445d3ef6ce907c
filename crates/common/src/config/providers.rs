//! Ordered configuration providers

use super::{ConfigKey, Environment};

/// A single lookup rule; `None` defers to the next provider
pub type ConfigProvider = fn(&Environment, ConfigKey) -> Option<String>;

/// Default provider chain, highest precedence first
pub const DEFAULT_PROVIDERS: &[ConfigProvider] = &[runtime_override, deployed_origin, build_env];

/// Values injected into a live page after the build
pub fn runtime_override(env: &Environment, key: ConfigKey) -> Option<String> {
    if !env.browser {
        return None;
    }
    env.override_value(key).map(str::to_string)
}

/// Base URL rule for deployed pages
///
/// With a known page origin, a build value pointing at `localhost` is stale
/// (built for local development), so the origin wins. A non-local build value
/// is kept.
pub fn deployed_origin(env: &Environment, key: ConfigKey) -> Option<String> {
    if key != ConfigKey::BaseUrl || !env.browser {
        return None;
    }
    let origin = env.location_origin.as_deref().filter(|o| !o.is_empty())?;

    match env.build_value(key) {
        Some(value) if !value.contains("localhost") => Some(value.to_string()),
        _ => Some(origin.to_string()),
    }
}

/// Build-time / process environment values
pub fn build_env(env: &Environment, key: ConfigKey) -> Option<String> {
    env.build_value(key).map(str::to_string)
}

/// Resolve `key` with [`DEFAULT_PROVIDERS`]
#[must_use]
pub fn resolve_config(env: &Environment, key: ConfigKey) -> String {
    resolve_with(DEFAULT_PROVIDERS, env, key)
}

/// Resolve `key` by walking `providers` in order, falling back to the default
#[must_use]
pub fn resolve_with(providers: &[ConfigProvider], env: &Environment, key: ConfigKey) -> String {
    providers
        .iter()
        .find_map(|provider| provider(env, key))
        .unwrap_or_else(|| key.default_value().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_when_nothing_is_set() {
        let env = Environment::default();
        assert_eq!(resolve_config(&env, ConfigKey::ApiUrl), "http://localhost:8080/api");
        assert_eq!(resolve_config(&env, ConfigKey::KeycloakUrl), "http://localhost:9090");
        assert_eq!(resolve_config(&env, ConfigKey::KeycloakRealm), "gym-review");
        assert_eq!(resolve_config(&env, ConfigKey::KeycloakClientId), "gym-review-app");
        assert_eq!(resolve_config(&env, ConfigKey::BaseUrl), "http://localhost:3000");
    }

    #[test]
    fn override_beats_build_env_in_browser() {
        let env = Environment::browser("https://gyms.example.com")
            .with_build_value(ConfigKey::KeycloakUrl, "https://build.example.com")
            .with_override(ConfigKey::KeycloakUrl, "https://runtime.example.com");
        assert_eq!(resolve_config(&env, ConfigKey::KeycloakUrl), "https://runtime.example.com");
    }

    #[test]
    fn override_ignored_outside_browser() {
        let env = Environment::default()
            .with_build_value(ConfigKey::KeycloakRealm, "prod")
            .with_override(ConfigKey::KeycloakRealm, "runtime");
        assert_eq!(resolve_config(&env, ConfigKey::KeycloakRealm), "prod");
    }

    #[test]
    fn base_url_prefers_origin_over_localhost_build_value() {
        let env = Environment::browser("https://gyms.example.com")
            .with_build_value(ConfigKey::BaseUrl, "http://localhost:3000");
        assert_eq!(resolve_config(&env, ConfigKey::BaseUrl), "https://gyms.example.com");
    }

    #[test]
    fn base_url_keeps_non_local_build_value() {
        let env = Environment::browser("https://preview.example.com")
            .with_build_value(ConfigKey::BaseUrl, "https://gyms.example.com");
        assert_eq!(resolve_config(&env, ConfigKey::BaseUrl), "https://gyms.example.com");
    }

    #[test]
    fn base_url_uses_origin_when_build_value_missing() {
        let env = Environment::browser("https://gyms.example.com");
        assert_eq!(resolve_config(&env, ConfigKey::BaseUrl), "https://gyms.example.com");
    }

    #[test]
    fn base_url_override_beats_origin() {
        let env = Environment::browser("https://gyms.example.com")
            .with_override(ConfigKey::BaseUrl, "https://cdn.example.com");
        assert_eq!(resolve_config(&env, ConfigKey::BaseUrl), "https://cdn.example.com");
    }

    #[test]
    fn origin_rule_only_applies_to_base_url() {
        let env = Environment::browser("https://gyms.example.com");
        assert_eq!(resolve_config(&env, ConfigKey::ApiUrl), "http://localhost:8080/api");
    }

    #[test]
    fn empty_build_value_falls_back_to_default() {
        let env = Environment::default().with_build_value(ConfigKey::KeycloakClientId, "");
        assert_eq!(resolve_config(&env, ConfigKey::KeycloakClientId), "gym-review-app");
    }

    #[test]
    fn custom_provider_chain() {
        fn always(_: &Environment, _: ConfigKey) -> Option<String> {
            Some("fixed".to_string())
        }
        let env = Environment::default().with_build_value(ConfigKey::ApiUrl, "https://api");
        assert_eq!(resolve_with(&[always, build_env], &env, ConfigKey::ApiUrl), "fixed");
        assert_eq!(resolve_with(&[], &env, ConfigKey::ApiUrl), "http://localhost:8080/api");
    }
}
