//! Authentication error type

use thiserror::Error;

use crate::storage::StorageError;

/// Errors raised by the login flow and session store
#[derive(Debug, Error)]
pub enum AuthError {
    /// The host has no usable secure random source
    #[error("Secure random source unavailable: {0}")]
    CryptoUnavailable(String),

    /// The identity provider redirected back with an `error` parameter
    #[error("{}", identity_provider_message(.error, .description.as_deref()))]
    IdentityProvider { error: String, description: Option<String> },

    /// Callback URL carried neither a code nor an error
    #[error("No authorization code found in URL.")]
    MissingAuthorizationCode,

    /// No PKCE verifier in session storage (expired session, other tab, ...)
    #[error("Code verifier not found. Please try logging in again.")]
    MissingVerifier,

    /// Token endpoint answered with a non-success status
    #[error("Token exchange failed: {status} {body}")]
    TokenExchangeFailed { status: u16, body: String },

    /// Transport-level failure talking to the identity provider
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// Token endpoint answered 2xx with a body that is not a token response
    #[error("Invalid token response: {0}")]
    InvalidTokenResponse(String),

    /// Backing storage failed
    #[error(transparent)]
    Storage(#[from] StorageError),

    /// A configured endpoint is not a valid URL
    #[error("Invalid URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl AuthError {
    /// Text shown to the user on the callback page
    #[must_use]
    pub fn user_message(&self) -> String {
        self.to_string()
    }

    /// Whether retrying the whole login could succeed
    #[must_use]
    pub const fn is_retryable(&self) -> bool {
        matches!(
            self,
            Self::MissingVerifier | Self::TokenExchangeFailed { .. } | Self::Network(_)
        )
    }
}

fn identity_provider_message(error: &str, description: Option<&str>) -> String {
    match description.filter(|d| !d.is_empty()) {
        Some(description) => format!("Keycloak error: {error} - {description}"),
        None => format!("Keycloak error: {error}"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn identity_provider_message_with_description() {
        let err = AuthError::IdentityProvider {
            error: "access_denied".to_string(),
            description: Some("User cancelled".to_string()),
        };
        assert_eq!(err.user_message(), "Keycloak error: access_denied - User cancelled");
    }

    #[test]
    fn identity_provider_message_without_description() {
        let err = AuthError::IdentityProvider { error: "access_denied".to_string(), description: None };
        assert_eq!(err.user_message(), "Keycloak error: access_denied");
    }

    #[test]
    fn token_exchange_failed_message() {
        let err = AuthError::TokenExchangeFailed {
            status: 400,
            body: r#"{"error":"invalid_grant"}"#.to_string(),
        };
        assert_eq!(err.user_message(), r#"Token exchange failed: 400 {"error":"invalid_grant"}"#);
        assert!(err.is_retryable());
    }

    #[test]
    fn missing_code_message() {
        assert_eq!(
            AuthError::MissingAuthorizationCode.user_message(),
            "No authorization code found in URL."
        );
        assert!(!AuthError::MissingAuthorizationCode.is_retryable());
    }
}
