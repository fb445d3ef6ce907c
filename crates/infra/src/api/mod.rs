//! Backend REST API
//!
//! Typed client for the gym-review backend. Read endpoints are public; write
//! endpoints require a live session and attach it as a bearer token.

pub mod auth;
pub mod client;
pub mod errors;

// Re-export commonly used items
pub use auth::AccessTokenProvider;
pub use client::GymApiClient;
pub use errors::ApiError;
