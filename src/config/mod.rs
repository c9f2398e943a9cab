//! Configuration management for RagaMaya
//!
//! Settings are layered: CLI flag > environment variable > config file.
//! The flag and environment layers are resolved by clap (see `cli::Cli`);
//! this module owns the file layer and the merge.

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::error::{ConfigError, Result};

/// Name of the per-user configuration directory under `$HOME`
const CONFIG_DIR_NAME: &str = ".ragamaya";

/// Application configuration
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Base API origin, e.g. `https://api.ragamaya.com`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_api: Option<String>,

    /// Public origin of the admin dashboard, used to render redirect targets
    #[serde(skip_serializing_if = "Option::is_none")]
    pub client_origin: Option<String>,

    /// User preferences
    #[serde(default)]
    pub preferences: Preferences,
}

/// User preferences
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Preferences {
    /// Default output format
    #[serde(skip_serializing_if = "Option::is_none")]
    pub format: Option<String>,
}

/// Values supplied on the command line or through the environment.
#[derive(Debug, Clone, Default)]
pub struct ConfigOverrides {
    pub base_api: Option<String>,
    pub client_origin: Option<String>,
}

impl Config {
    /// Directory holding config and session files (`~/.ragamaya`)
    pub fn default_dir() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or(ConfigError::Invalid(
            "Could not determine home directory".to_string(),
        ))?;

        Ok(home.join(CONFIG_DIR_NAME))
    }

    /// Get the default config file path
    pub fn default_path() -> Result<PathBuf> {
        Ok(Self::default_dir()?.join("config.yaml"))
    }

    /// Resolve an optional override into a concrete config path
    pub fn resolve_path(path: Option<&str>) -> Result<PathBuf> {
        match path {
            Some(p) => Ok(PathBuf::from(p)),
            None => Self::default_path(),
        }
    }

    /// Load configuration from `path` (or the default location).
    ///
    /// A missing file yields the default configuration: every setting can
    /// also arrive through flags or the environment.
    pub fn load_at(path: Option<&str>) -> Result<Self> {
        let path = Self::resolve_path(path)?;
        if !path.exists() {
            log::debug!("No config file at {}, using defaults", path.display());
            return Ok(Self::default());
        }
        Self::load_from(path)
    }

    /// Load configuration from a specific path
    pub fn load_from(path: PathBuf) -> Result<Self> {
        if !path.exists() {
            return Err(ConfigError::NotFound(path.display().to_string()).into());
        }

        let contents = std::fs::read_to_string(&path)?;
        let config: Config = serde_yaml::from_str(&contents).map_err(ConfigError::from)?;

        Ok(config)
    }

    /// Save configuration to `path` (or the default location)
    pub fn save_at(&self, path: Option<&str>) -> Result<()> {
        self.save_to(Self::resolve_path(path)?)
    }

    /// Save configuration to a specific path
    pub fn save_to(&self, path: PathBuf) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents =
            serde_yaml::to_string(self).map_err(|e| ConfigError::SaveError(e.to_string()))?;

        std::fs::write(&path, contents)?;

        Ok(())
    }

    /// Apply flag/environment overrides on top of the file values
    pub fn with_overrides(mut self, overrides: &ConfigOverrides) -> Self {
        if let Some(base) = &overrides.base_api {
            self.base_api = Some(base.clone());
        }
        if let Some(origin) = &overrides.client_origin {
            self.client_origin = Some(origin.clone());
        }
        self
    }

    /// Base API origin without a trailing slash, if configured and non-empty
    pub fn base_api(&self) -> Option<String> {
        normalize_origin(self.base_api.as_deref())
    }

    /// Dashboard origin without a trailing slash, if configured and non-empty
    pub fn client_origin(&self) -> Option<String> {
        normalize_origin(self.client_origin.as_deref())
    }
}

fn normalize_origin(value: Option<&str>) -> Option<String> {
    let trimmed = value?.trim().trim_end_matches('/');
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}
