//! Token endpoint wire types

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Successful token endpoint response
///
/// Only `access_token` is required. Anything the provider sends beyond the
/// standard fields (`session_state`, `not-before-policy`, ...) lands in
/// `extra`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TokenResponse {
    pub access_token: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id_token: Option<String>,

    /// Lifetime in seconds
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_in: Option<i64>,

    /// Parsed but unused (sessions are not refreshed)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub refresh_token: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub token_type: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scope: Option<String>,

    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl TokenResponse {
    /// Response carrying only an access token
    #[must_use]
    pub fn bearer(access_token: impl Into<String>) -> Self {
        Self {
            access_token: access_token.into(),
            id_token: None,
            expires_in: None,
            refresh_token: None,
            token_type: Some("Bearer".to_string()),
            scope: None,
            extra: Map::new(),
        }
    }

    #[must_use]
    pub fn with_expires_in(mut self, seconds: i64) -> Self {
        self.expires_in = Some(seconds);
        self
    }

    #[must_use]
    pub fn with_id_token(mut self, id_token: impl Into<String>) -> Self {
        self.id_token = Some(id_token.into());
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_keycloak_response() {
        let json = r#"{
            "access_token": "at",
            "expires_in": 300,
            "refresh_expires_in": 1800,
            "refresh_token": "rt",
            "token_type": "Bearer",
            "id_token": "it",
            "not-before-policy": 0,
            "session_state": "abc",
            "scope": "openid profile email"
        }"#;

        let parsed: TokenResponse = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.access_token, "at");
        assert_eq!(parsed.expires_in, Some(300));
        assert_eq!(parsed.id_token.as_deref(), Some("it"));
        assert_eq!(parsed.extra.get("session_state"), Some(&Value::from("abc")));
        assert_eq!(parsed.extra.get("refresh_expires_in"), Some(&Value::from(1800)));
    }

    #[test]
    fn access_token_is_required() {
        let result: Result<TokenResponse, _> = serde_json::from_str(r#"{"token_type":"Bearer"}"#);
        assert!(result.is_err());
    }
}
