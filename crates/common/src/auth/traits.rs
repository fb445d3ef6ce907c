//! Seams for the callback handler and logout
//!
//! These traits enable dependency injection and testing by abstracting the
//! token endpoint and page navigation.

use async_trait::async_trait;

use super::error::AuthError;
use super::types::TokenResponse;

/// Exchanges an authorization code for tokens
#[async_trait]
pub trait TokenExchange: Send + Sync {
    /// Trade `code` (plus the stored PKCE verifier) for a token response
    ///
    /// # Errors
    /// `MissingVerifier`, `TokenExchangeFailed`, `Network` or
    /// `InvalidTokenResponse`
    async fn exchange_code_for_token(&self, code: &str) -> Result<TokenResponse, AuthError>;
}

/// Page navigation
pub trait Navigator: Send + Sync {
    /// Full-page navigation to an external URL (control leaves the app)
    fn assign(&self, url: &str);

    /// In-app route change
    fn push_route(&self, path: &str);
}
