//! Bearer credentials for backend requests

use gymreview_common::auth::SessionStore;

/// Source of the `Authorization` header value
///
/// This trait allows dependency injection and testing with fixed tokens.
pub trait AccessTokenProvider: Send + Sync {
    /// `Bearer <token>` while a valid session exists
    fn bearer_header(&self) -> Option<String>;
}

impl AccessTokenProvider for SessionStore {
    fn bearer_header(&self) -> Option<String> {
        Self::bearer_header(self)
    }
}

/// Fixed token, for tools and tests
#[derive(Debug, Clone)]
pub struct StaticToken(pub String);

impl AccessTokenProvider for StaticToken {
    fn bearer_header(&self) -> Option<String> {
        Some(format!("Bearer {}", self.0))
    }
}
