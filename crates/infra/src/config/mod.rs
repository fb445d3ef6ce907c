//! Configuration loading
//!
//! Builds the [`Environment`](gymreview_common::config::Environment) that
//! `RuntimeConfig` resolves against: build values from the process
//! environment (after an optional `.env`), runtime overrides from a probed
//! `runtime-env.{toml,json}` file.

pub mod loader;

// Re-export commonly used items
pub use loader::{
    load, load_build_env, load_runtime_overrides, probe_override_paths, ConfigError, LoadOptions,
};
