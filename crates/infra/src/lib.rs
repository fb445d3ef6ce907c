//! # Gym Review Infrastructure
//!
//! Impure implementations behind the seams defined in `gymreview-common`.
//!
//! This crate contains:
//! - Configuration loading (`.env`, process environment, runtime override files)
//! - Keychain-backed durable storage for the session tokens
//! - The backend REST client
//! - Tracing subscriber setup
//! - [`AppContext`], the startup wiring of all of the above

pub mod api;
pub mod config;
pub mod context;
pub mod observability;
pub mod storage;

// Re-export commonly used items
pub use api::{ApiError, GymApiClient};
pub use config::{ConfigError, LoadOptions};
pub use context::AppContext;
pub use storage::KeychainStorage;
