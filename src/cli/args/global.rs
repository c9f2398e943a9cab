//! Global CLI options shared across all commands

use crate::cli::{Cli, OutputFormat};
use crate::config::{Config, ConfigOverrides};

/// Global CLI options passed to all command handlers.
///
/// # Precedence
///
/// CLI flag > environment variable > config file > default. This struct
/// captures the flag/env layer (clap resolves both); the config file layer
/// is merged in by [`GlobalOptions::resolve_format`] and
/// [`GlobalOptions::overrides`].
#[derive(Debug, Clone, Default)]
pub struct GlobalOptions {
    /// Output format, if given on the command line or in the environment
    pub format: Option<OutputFormat>,

    /// Custom config file path (defaults to ~/.ragamaya/config.yaml)
    pub config: Option<String>,

    /// Custom session file path (defaults to ~/.ragamaya/session.yaml)
    pub session: Option<String>,

    /// Base API origin override
    pub base_api: Option<String>,

    /// Dashboard origin override
    pub client_origin: Option<String>,
}

impl GlobalOptions {
    /// Create GlobalOptions from a parsed CLI struct.
    pub fn from_cli(cli: &Cli) -> Self {
        Self {
            format: cli.format,
            config: cli.config.clone(),
            session: cli.session.clone(),
            base_api: cli.base_api.clone(),
            client_origin: cli.client_origin.clone(),
        }
    }

    pub fn config_ref(&self) -> Option<&str> {
        self.config.as_deref()
    }

    pub fn session_ref(&self) -> Option<&str> {
        self.session.as_deref()
    }

    /// Values that take precedence over the config file
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            base_api: self.base_api.clone(),
            client_origin: self.client_origin.clone(),
        }
    }

    /// Output format after applying the config file preference
    pub fn resolve_format(&self, config: &Config) -> OutputFormat {
        if let Some(format) = self.format {
            return format;
        }

        match config.preferences.format.as_deref() {
            Some(pref) => OutputFormat::parse_preference(pref).unwrap_or_else(|| {
                log::warn!("Ignoring unknown format preference '{}'", pref);
                OutputFormat::default()
            }),
            None => OutputFormat::default(),
        }
    }
}
