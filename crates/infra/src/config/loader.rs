//! Configuration loader
//!
//! ## Loading Strategy
//! 1. Optionally load a `.env` file into the process environment (`dotenvy`)
//! 2. Read the build values (`GYM_REVIEW_*`) from the process environment
//! 3. In a page context, read runtime overrides from an explicit file or the
//!    first probed `runtime-env.{toml,json}`
//!
//! ## Environment Variables
//! - `GYM_REVIEW_API_URL`: Backend REST base URL
//! - `GYM_REVIEW_KEYCLOAK_URL`: Identity provider base URL
//! - `GYM_REVIEW_KEYCLOAK_REALM`: Realm name
//! - `GYM_REVIEW_KEYCLOAK_CLIENT_ID`: Public client id
//! - `GYM_REVIEW_BASE_URL`: Frontend origin
//!
//! ## Override Files
//! A flat table keyed by the variable names above:
//!
//! ```toml
//! GYM_REVIEW_KEYCLOAK_URL = "https://auth.example.com"
//! GYM_REVIEW_KEYCLOAK_REALM = "gym-review"
//! ```
//!
//! Probed paths (in order): `./runtime-env.toml`, `./runtime-env.json`, the
//! same names in the parent directory, then next to the executable.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use gymreview_common::config::{ConfigKey, Environment};
use thiserror::Error;

const OVERRIDE_FILE_NAMES: [&str; 2] = ["runtime-env.toml", "runtime-env.json"];

/// Configuration loading errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Config file not found: {}", .0.display())]
    NotFound(PathBuf),

    #[error("Failed to read config file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Invalid {format} in {}: {message}", .path.display())]
    Parse { path: PathBuf, format: &'static str, message: String },

    #[error("Unsupported config format: {0}")]
    UnsupportedFormat(String),
}

/// What to load and for which context
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadOptions {
    /// Page context: runtime overrides and the location origin apply
    pub browser: bool,
    pub location_origin: Option<String>,
    /// Explicit override file; `None` probes the standard locations
    pub overrides_path: Option<PathBuf>,
    /// Load `.env` before reading the process environment
    pub dotenv: bool,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self { browser: false, location_origin: None, overrides_path: None, dotenv: true }
    }
}

impl LoadOptions {
    /// Page context served from `origin`
    #[must_use]
    pub fn page(origin: impl Into<String>) -> Self {
        Self { browser: true, location_origin: Some(origin.into()), ..Self::default() }
    }

    #[must_use]
    pub fn with_overrides_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.overrides_path = Some(path.into());
        self
    }

    #[must_use]
    pub const fn without_dotenv(mut self) -> Self {
        self.dotenv = false;
        self
    }
}

/// Build the resolution environment
///
/// # Errors
/// Returns `ConfigError` if an override file exists but cannot be read or
/// parsed, or an explicit override path does not exist.
pub fn load(options: &LoadOptions) -> Result<Environment, ConfigError> {
    if options.dotenv {
        match dotenvy::dotenv() {
            Ok(path) => tracing::debug!(path = %path.display(), "Loaded .env file"),
            Err(e) if e.not_found() => tracing::debug!("No .env file found"),
            Err(e) => tracing::warn!(error = %e, "Ignoring unreadable .env file"),
        }
    }

    let build_env = load_build_env();
    let runtime_overrides = if options.browser {
        load_runtime_overrides(options.overrides_path.clone())?
    } else {
        HashMap::new()
    };

    tracing::info!(
        browser = options.browser,
        build_values = build_env.len(),
        runtime_overrides = runtime_overrides.len(),
        "Configuration environment loaded"
    );

    Ok(Environment {
        browser: options.browser,
        runtime_overrides,
        build_env,
        location_origin: options.location_origin.clone(),
    })
}

/// Build values from the process environment
#[must_use]
pub fn load_build_env() -> HashMap<String, String> {
    build_env_from(|name| std::env::var(name).ok())
}

fn build_env_from(lookup: impl Fn(&str) -> Option<String>) -> HashMap<String, String> {
    ConfigKey::ALL
        .into_iter()
        .filter_map(|key| {
            lookup(key.env_name())
                .filter(|value| !value.is_empty())
                .map(|value| (key.env_name().to_string(), value))
        })
        .collect()
}

/// Runtime overrides from `path`, or from the first probed file
///
/// A missing probed file is not an error (no overrides).
///
/// # Errors
/// Returns `ConfigError::NotFound` for a missing explicit path, and
/// `Read`/`Parse`/`UnsupportedFormat` for a bad file.
pub fn load_runtime_overrides(
    path: Option<PathBuf>,
) -> Result<HashMap<String, String>, ConfigError> {
    let path = match path {
        Some(p) if !p.exists() => return Err(ConfigError::NotFound(p)),
        Some(p) => p,
        None => match probe_override_paths() {
            Some(p) => p,
            None => {
                tracing::debug!("No runtime override file found");
                return Ok(HashMap::new());
            }
        },
    };

    tracing::info!(path = %path.display(), "Loading runtime overrides");

    let contents = std::fs::read_to_string(&path)
        .map_err(|source| ConfigError::Read { path: path.clone(), source })?;

    parse_overrides(&contents, &path)
}

/// Parse an override file; format is chosen by extension
fn parse_overrides(contents: &str, path: &Path) -> Result<HashMap<String, String>, ConfigError> {
    let extension = path.extension().and_then(|e| e.to_str()).unwrap_or("toml");

    let raw: HashMap<String, String> = match extension {
        "toml" => toml::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            format: "TOML",
            message: e.to_string(),
        })?,
        "json" => serde_json::from_str(contents).map_err(|e| ConfigError::Parse {
            path: path.to_path_buf(),
            format: "JSON",
            message: e.to_string(),
        })?,
        other => return Err(ConfigError::UnsupportedFormat(other.to_string())),
    };

    Ok(raw
        .into_iter()
        .filter(|(name, _)| {
            let known = ConfigKey::from_env_name(name).is_some();
            if !known {
                tracing::warn!(key = %name, "Ignoring unknown runtime override");
            }
            known
        })
        .collect())
}

/// First existing override file in the standard locations
#[must_use]
pub fn probe_override_paths() -> Option<PathBuf> {
    let mut dirs = Vec::new();

    if let Ok(cwd) = std::env::current_dir() {
        dirs.push(cwd.clone());
        dirs.push(cwd.join(".."));
    }

    if let Some(exe_dir) = std::env::current_exe().ok().and_then(|p| p.parent().map(Path::to_path_buf))
    {
        dirs.push(exe_dir);
    }

    dirs.iter()
        .flat_map(|dir| OVERRIDE_FILE_NAMES.iter().map(move |name| dir.join(name)))
        .find(|path| path.exists())
}
