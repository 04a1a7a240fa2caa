//! Application configuration schemas.
//!
//! Configuration is layered with the `config` crate, lowest precedence
//! first: built-in defaults (including `KB_TOP` as the installation root),
//! an optional TOML file, then environment variables prefixed with
//! `KB_TRANSFORM__`. Callers apply CLI overrides on the result.

pub mod logging;
pub mod tool;

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use self::logging::LoggingConfig;
use self::tool::ToolConfig;

use crate::error::AppError;
use crate::result::AppResult;

/// Environment variable naming the KBase installation root.
pub const ROOT_PATH_ENV: &str = "KB_TOP";

/// Prefix for environment variable overrides of config keys.
pub const ENV_PREFIX: &str = "KB_TRANSFORM";

/// Root application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TransformConfig {
    /// Root of the installation the tool's libraries live under.
    pub root_path: Option<PathBuf>,
    /// External tool settings.
    pub tool: ToolConfig,
    /// Logging settings.
    pub logging: LoggingConfig,
}

impl TransformConfig {
    /// Load configuration, taking the installation root default from `KB_TOP`.
    pub fn load(config_path: &str) -> AppResult<Self> {
        Self::load_with_root(config_path, std::env::var(ROOT_PATH_ENV).ok())
    }

    /// Load configuration with an explicit installation root default.
    ///
    /// A missing file at `config_path` is not an error.
    pub fn load_with_root(config_path: &str, default_root: Option<String>) -> AppResult<Self> {
        tracing::debug!(path = %config_path, "Loading transform configuration");

        let mut builder = config::Config::builder();
        if let Some(root) = default_root {
            builder = builder.set_default("root_path", root)?;
        }

        let config = builder
            .add_source(config::File::from(Path::new(config_path)).required(false))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config
            .try_deserialize()
            .map_err(|e| AppError::configuration(format!("Failed to deserialize config: {e}")))
    }

    /// The installation root, or a configuration error if none was supplied.
    pub fn root_path(&self) -> AppResult<&Path> {
        match self.root_path.as_deref() {
            Some(root) if !root.as_os_str().is_empty() => Ok(root),
            _ => Err(AppError::configuration(format!(
                "Installation root is not set: export {ROOT_PATH_ENV} or set `root_path` in the config file"
            ))),
        }
    }
}
