#![deny(clippy::pedantic, unsafe_code)]
#![allow(clippy::module_name_repetitions)]

//! Configuration management for extbuild
//!
//! This crate handles loading and merging configuration from:
//! - Default values (hard-coded)
//! - Configuration file (`./extbuild.toml` or `--config`)
//! - Environment variables

pub mod constants;
pub mod hook;
pub mod package;

pub use hook::HookConfig;
pub use package::PackageMetadata;

use extbuild_errors::{ConfigError, Error};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use tokio::fs;
use tracing::debug;

/// Main configuration structure
#[derive(Debug, Clone, Serialize, Deserialize, Default, PartialEq, Eq)]
pub struct Config {
    #[serde(default)]
    pub hook: HookConfig,

    #[serde(default)]
    pub package: PackageMetadata,
}

impl Config {
    /// Get the default config file path
    #[must_use]
    pub fn default_path() -> PathBuf {
        PathBuf::from(constants::DEFAULT_CONFIG_FILE)
    }

    /// Load configuration from file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML,
    /// or declares values that fail validation.
    pub async fn load_from_file(path: &Path) -> Result<Self, Error> {
        let contents = fs::read_to_string(path).await.map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                ConfigError::NotFound {
                    path: path.display().to_string(),
                }
                .into()
            } else {
                Error::io_with_path(&e, path)
            }
        })?;

        let config: Self = toml::from_str(&contents).map_err(|e| ConfigError::ParseError {
            message: e.to_string(),
        })?;
        config.validate()?;

        debug!(path = %path.display(), "loaded configuration");
        Ok(config)
    }

    /// Load configuration with fallback to defaults
    ///
    /// # Errors
    ///
    /// Returns an error if `extbuild.toml` exists but cannot be read
    /// or parsed.
    pub async fn load() -> Result<Self, Error> {
        let config_path = Self::default_path();

        if config_path.exists() {
            Self::load_from_file(&config_path).await
        } else {
            Ok(Self::default())
        }
    }

    /// Load configuration from an optional path or use default
    ///
    /// An explicit path must exist; the implicit one may be absent.
    ///
    /// # Errors
    ///
    /// Returns an error if the config file cannot be read or parsed
    pub async fn load_or_default(path: Option<&Path>) -> Result<Self, Error> {
        match path {
            Some(config_path) => Self::load_from_file(config_path).await,
            None => Self::load().await,
        }
    }

    /// Merge with environment variables
    ///
    /// # Errors
    ///
    /// Returns an error if an environment variable is set to an empty value,
    /// or if `EXTBUILD_TOOL` is not valid UTF-8.
    pub fn merge_env(&mut self) -> Result<(), Error> {
        // EXTBUILD_TOOL
        if let Some(tool) = std::env::var_os(constants::ENV_TOOL) {
            let tool = tool.into_string().map_err(|raw| ConfigError::InvalidValue {
                field: constants::ENV_TOOL.to_string(),
                value: raw.to_string_lossy().into_owned(),
            })?;
            if tool.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: constants::ENV_TOOL.to_string(),
                    value: tool,
                }
                .into());
            }
            self.hook.tool = tool;
        }

        // EXTBUILD_WORKING_DIR; any path the OS accepts, UTF-8 or not
        if let Some(dir) = std::env::var_os(constants::ENV_WORKING_DIR) {
            if dir.is_empty() {
                return Err(ConfigError::InvalidValue {
                    field: constants::ENV_WORKING_DIR.to_string(),
                    value: String::new(),
                }
                .into());
            }
            self.hook.working_dir = Some(PathBuf::from(dir));
        }

        Ok(())
    }

    /// Check the hook section for values the build plan cannot use
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidValue` for an empty tool, an empty target
    /// list, or a blank target name.
    pub fn validate(&self) -> Result<(), Error> {
        if self.hook.tool.trim().is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "hook.tool".to_string(),
                value: self.hook.tool.clone(),
            }
            .into());
        }

        if self.hook.targets.is_empty() {
            return Err(ConfigError::InvalidValue {
                field: "hook.targets".to_string(),
                value: "[]".to_string(),
            }
            .into());
        }

        if let Some(blank) = self.hook.targets.iter().find(|t| t.trim().is_empty()) {
            return Err(ConfigError::InvalidValue {
                field: "hook.targets".to_string(),
                value: format!("{blank:?}"),
            }
            .into());
        }

        Ok(())
    }
}
