//! Application constants
//!
//! Storage keys, fixed routes and configuration defaults used across the
//! client crates.

// Durable (browser-restart surviving) storage keys
pub const STORAGE_KEY_ACCESS_TOKEN: &str = "kc_access_token";
pub const STORAGE_KEY_TOKEN_EXPIRY: &str = "kc_token_expiry";
pub const STORAGE_KEY_ID_TOKEN: &str = "kc_id_token";

// Session-scoped storage keys (cleared when the browsing session ends)
pub const SESSION_KEY_CODE_VERIFIER: &str = "kc_code_verifier";

// Application routes
pub const CALLBACK_PATH: &str = "/keycloak-callback";
pub const HOME_ROUTE: &str = "/";

// OpenID Connect request constants
pub const OIDC_SCOPE: &str = "openid";
pub const PKCE_METHOD_S256: &str = "S256";
pub const PKCE_VERIFIER_LENGTH: usize = 128;

// Callback feedback delays
pub const CALLBACK_SUCCESS_REDIRECT_MS: u64 = 1500;
pub const CALLBACK_ERROR_REDIRECT_MS: u64 = 3000;

// Environment variable names
pub const ENV_API_URL: &str = "GYM_REVIEW_API_URL";
pub const ENV_KEYCLOAK_URL: &str = "GYM_REVIEW_KEYCLOAK_URL";
pub const ENV_KEYCLOAK_REALM: &str = "GYM_REVIEW_KEYCLOAK_REALM";
pub const ENV_KEYCLOAK_CLIENT_ID: &str = "GYM_REVIEW_KEYCLOAK_CLIENT_ID";
pub const ENV_BASE_URL: &str = "GYM_REVIEW_BASE_URL";

// Configuration defaults (local development stack)
pub const DEFAULT_API_URL: &str = "http://localhost:8080/api";
pub const DEFAULT_KEYCLOAK_URL: &str = "http://localhost:9090";
pub const DEFAULT_KEYCLOAK_REALM: &str = "gym-review";
pub const DEFAULT_KEYCLOAK_CLIENT_ID: &str = "gym-review-app";
pub const DEFAULT_BASE_URL: &str = "http://localhost:3000";

// Backend paging defaults
pub const GYM_PAGE_SIZE: u32 = 8;
pub const NEARBY_GYM_PAGE_SIZE: u32 = 12;
pub const REVIEW_PAGE_SIZE: u32 = 20;
pub const NEARBY_RADIUS_METERS: f64 = 10_000.0;
