//! Keycloak Authorization Code + PKCE login
//!
//! # Features
//!
//! - **PKCE Flow**: RFC 7636 S256 challenge, verifier kept in a session-scoped
//!   slot until the code exchange consumes it
//! - **Session Store**: access token, ID token and expiry in durable storage,
//!   with lazy expiry on every login check
//! - **Logout**: local wipe followed by the identity provider's end-session
//!   redirect
//! - **Callback State Machine**: `Loading → Success | Error`, observable and
//!   independent of rendering
//!
//! # Architecture
//!
//! ```text
//! ┌─────────────────┐        ┌──────────────────┐
//! │ KeycloakClient  │───────►│    PkceStore     │  session-scoped verifier
//! └────────┬────────┘        └──────────────────┘
//!          │ TokenExchange
//! ┌────────▼────────┐        ┌──────────────────┐
//! │ CallbackHandler │───────►│   SessionStore   │  durable tokens + Clock
//! └─────────────────┘        └────────▲─────────┘
//!                                     │
//!                            ┌────────┴─────────┐
//!                            │LogoutCoordinator │──► Navigator
//!                            └──────────────────┘
//! ```
//!
//! # Usage Example
//!
//! ```no_run
//! use std::sync::Arc;
//!
//! use gymreview_common::auth::{
//!     CallbackHandler, CallbackParams, KeycloakClient, PkceStore, SessionStore,
//! };
//! use gymreview_common::config::{Environment, RuntimeConfig};
//! use gymreview_common::storage::MemoryStorage;
//! use gymreview_common::testing::RecordingNavigator;
//! use gymreview_common::time::SystemClock;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RuntimeConfig::new(Environment::browser("http://localhost:3000"));
//! let pkce = PkceStore::new(Arc::new(MemoryStorage::new()));
//! let session = SessionStore::new(Arc::new(MemoryStorage::new()), Arc::new(SystemClock));
//! let client = Arc::new(KeycloakClient::new(config, pkce));
//!
//! // Send the browser here
//! let login_url = client.build_auth_url().await?;
//! # let _ = login_url;
//!
//! // ... identity provider redirects back to /keycloak-callback?code=... ...
//! let handler =
//!     CallbackHandler::new(client, session.clone(), Arc::new(RecordingNavigator::new()));
//! handler.handle(CallbackParams::from_query("code=abc")).await;
//!
//! assert!(session.is_logged_in());
//! # Ok(())
//! # }
//! ```

pub mod callback;
pub mod client;
pub mod error;
pub mod logout;
pub mod pkce;
pub mod session;
pub mod traits;
pub mod types;

pub use callback::{resolve, CallbackHandler, CallbackParams, CallbackState, CallbackTimings};
pub use client::KeycloakClient;
pub use error::AuthError;
pub use logout::LogoutCoordinator;
pub use pkce::{PkceChallenge, PkcePair, PkceStore, PkceVerifier};
pub use session::SessionStore;
pub use traits::{Navigator, TokenExchange};
pub use types::TokenResponse;
