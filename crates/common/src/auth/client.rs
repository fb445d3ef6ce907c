//! Keycloak OAuth 2.0 client with PKCE
//!
//! Handles the two halves of the browser flow:
//! - building the authorization redirect (and storing the verifier)
//! - exchanging the returned code for tokens

use std::time::Duration;

use async_trait::async_trait;
use gymreview_domain::constants::{OIDC_SCOPE, PKCE_METHOD_S256};
use reqwest::Client;
use tracing::{debug, info, instrument, warn};
use url::Url;

use super::error::AuthError;
use super::pkce::PkceStore;
use super::traits::TokenExchange;
use super::types::TokenResponse;
use crate::config::RuntimeConfig;

const HTTP_TIMEOUT: Duration = Duration::from_secs(30);

/// Public (secret-less) Keycloak client
///
/// Every endpoint, client id and redirect URI is resolved from
/// [`RuntimeConfig`] on each call.
#[derive(Debug, Clone)]
pub struct KeycloakClient {
    config: RuntimeConfig,
    pkce: PkceStore,
    http: Client,
}

impl KeycloakClient {
    pub fn new(config: RuntimeConfig, pkce: PkceStore) -> Self {
        let http = Client::builder().timeout(HTTP_TIMEOUT).build().unwrap_or_else(|e| {
            warn!(error = %e, "Failed to build HTTP client, falling back to defaults without timeout");
            Client::new()
        });
        Self::with_http_client(config, pkce, http)
    }

    #[must_use]
    pub const fn with_http_client(config: RuntimeConfig, pkce: PkceStore, http: Client) -> Self {
        Self { config, pkce, http }
    }

    #[must_use]
    pub const fn config(&self) -> &RuntimeConfig {
        &self.config
    }

    #[must_use]
    pub const fn pkce(&self) -> &PkceStore {
        &self.pkce
    }

    /// Authorization endpoint URL for a fresh login attempt
    ///
    /// Generates a new verifier (replacing any outstanding one) and stores
    /// it before returning, so the caller may navigate away immediately.
    ///
    /// # Errors
    /// `CryptoUnavailable`, `Storage` or `InvalidUrl`
    pub async fn build_auth_url(&self) -> Result<String, AuthError> {
        let pair = self.pkce.generate()?;

        let client_id = self.config.client_id();
        let redirect_uri = self.config.redirect_uri();
        let auth_endpoint = self.config.auth_endpoint();

        let url = Url::parse_with_params(
            &auth_endpoint,
            &[
                ("response_type", "code"),
                ("client_id", client_id.as_str()),
                ("redirect_uri", redirect_uri.as_str()),
                ("scope", OIDC_SCOPE),
                ("code_challenge", pair.challenge.as_str()),
                ("code_challenge_method", PKCE_METHOD_S256),
            ],
        )?;

        debug!(
            auth_endpoint = %auth_endpoint,
            client_id = %client_id,
            redirect_uri = %redirect_uri,
            "Built authorization URL"
        );

        Ok(url.into())
    }

    /// Trade an authorization code for tokens
    ///
    /// The stored verifier is removed only after a well-formed response, so a
    /// failed attempt can be retried with the same verifier.
    ///
    /// # Errors
    /// - `MissingVerifier` when no verifier is stored (no request is sent)
    /// - `TokenExchangeFailed` on a non-2xx answer
    /// - `Network` on transport failure
    /// - `InvalidTokenResponse` when a 2xx body does not parse
    #[instrument(skip(self, code), fields(code_len = code.len()))]
    pub async fn exchange_code_for_token(&self, code: &str) -> Result<TokenResponse, AuthError> {
        let verifier = self.pkce.load()?.ok_or(AuthError::MissingVerifier)?;

        let redirect_uri = self.config.redirect_uri();
        let client_id = self.config.client_id();
        let form = [
            ("grant_type", "authorization_code"),
            ("code", code),
            ("redirect_uri", redirect_uri.as_str()),
            ("client_id", client_id.as_str()),
            ("code_verifier", verifier.as_str()),
        ];

        let response = self.http.post(self.config.token_endpoint()).form(&form).send().await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            warn!(status = status.as_u16(), "Token exchange rejected");
            return Err(AuthError::TokenExchangeFailed { status: status.as_u16(), body });
        }

        let body = response.text().await?;
        let tokens: TokenResponse = serde_json::from_str(&body)
            .map_err(|e| AuthError::InvalidTokenResponse(e.to_string()))?;

        self.pkce.clear()?;

        info!(
            expires_in = ?tokens.expires_in,
            has_id_token = tokens.id_token.is_some(),
            "Token exchange succeeded"
        );

        Ok(tokens)
    }
}

#[async_trait]
impl TokenExchange for KeycloakClient {
    async fn exchange_code_for_token(&self, code: &str) -> Result<TokenResponse, AuthError> {
        Self::exchange_code_for_token(self, code).await
    }
}
