//! # Gym Review Domain
//!
//! Data types shared by the gym-review client crates.
//!
//! This crate contains:
//! - Backend DTOs (gyms, reviews, photos, paging envelopes)
//! - Constants for storage keys, routes and configuration defaults
//!
//! ## Architecture
//! - No dependencies on other gym-review crates
//! - Only serialization dependencies
//! - Pure data structures; no I/O

pub mod constants;
pub mod types;

// Re-export commonly used items
pub use types::*;
