//! Client-side authentication core for the gym-review application.
//!
//! # Modules
//!
//! - [`auth`]: Keycloak Authorization Code + PKCE flow, session lifecycle,
//!   logout and the redirect-callback state machine
//! - [`config`]: Runtime configuration resolution with ordered providers
//! - [`storage`]: Key-value storage seam (durable and session-scoped slots)
//! - [`time`]: Wall-clock seam used for token expiry
//! - [`testing`]: Mock clock, navigator and token exchanger for tests

#![forbid(unsafe_code)]
#![warn(rust_2018_idioms)]
#![warn(clippy::all, clippy::perf, clippy::complexity, clippy::suspicious)]

pub mod auth;
pub mod config;
pub mod storage;
pub mod testing;
pub mod time;

// Re-export commonly used types and traits for convenience
pub use auth::{
    AuthError, CallbackHandler, CallbackParams, CallbackState, KeycloakClient, LogoutCoordinator,
    Navigator, PkcePair, PkceStore, SessionStore, TokenExchange, TokenResponse,
};
pub use config::{ConfigKey, Environment, RuntimeConfig};
pub use storage::{KeyValueStore, MemoryStorage, StorageError};
pub use time::{Clock, SystemClock};
