//! Storage backends
//!
//! Durable implementations of
//! [`KeyValueStore`](gymreview_common::storage::KeyValueStore).

pub mod keychain;

pub use keychain::KeychainStorage;
