//! Configuration commands

use colored::Colorize;
use serde::Serialize;

use crate::cli::{ConfigKey, OutputFormat};
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::{ConfigError, Result};
use crate::output::{json, table};

#[derive(Debug, Serialize)]
struct ConfigReport {
    path: String,
    base_api: Option<String>,
    client_origin: Option<String>,
    format: String,
}

/// Show the effective configuration (file merged with flags/env)
pub fn show(opts: &GlobalOptions) -> Result<()> {
    let path = Config::resolve_path(opts.config_ref())?;
    let config = Config::load_at(opts.config_ref())?.with_overrides(&opts.overrides());
    let format = opts.resolve_format(&config);

    let report = ConfigReport {
        path: path.display().to_string(),
        base_api: config.base_api(),
        client_origin: config.client_origin(),
        format: format!("{:?}", format).to_lowercase(),
    };

    match format {
        OutputFormat::Json => println!("{}", json::format_json(&report)?),
        _ => println!(
            "{}",
            table::format_details(&[
                ("Config file", report.path),
                ("Base API", report.base_api.unwrap_or_else(|| "--".to_string())),
                (
                    "Dashboard origin",
                    report.client_origin.unwrap_or_else(|| "--".to_string())
                ),
                ("Format", report.format),
            ])
        ),
    }
    Ok(())
}

/// Save one setting to the config file
pub fn set(opts: &GlobalOptions, key: ConfigKey, value: &str) -> Result<()> {
    let mut config = Config::load_at(opts.config_ref())?;
    apply_setting(&mut config, key, value)?;
    config.save_at(opts.config_ref())?;

    let path = Config::resolve_path(opts.config_ref())?;
    println!(
        "{} Configuration saved to {}",
        "✓".green(),
        path.display().to_string().cyan()
    );
    Ok(())
}

/// Merge a new setting into a loaded config
fn apply_setting(config: &mut Config, key: ConfigKey, value: &str) -> Result<()> {
    match key {
        ConfigKey::BaseApi => config.base_api = Some(require_http_origin("base API", value)?),
        ConfigKey::ClientOrigin => {
            config.client_origin = Some(require_http_origin("dashboard origin", value)?)
        }
        ConfigKey::Format => {
            let format = OutputFormat::parse_preference(value).ok_or_else(|| {
                ConfigError::Invalid(format!(
                    "Unknown format '{}' (expected pretty, table or json)",
                    value
                ))
            })?;
            config.preferences.format = Some(format!("{:?}", format).to_lowercase());
        }
    }
    Ok(())
}

fn require_http_origin(what: &str, value: &str) -> Result<String> {
    let value = value.trim().trim_end_matches('/');
    if value.starts_with("http://") || value.starts_with("https://") {
        Ok(value.to_string())
    } else {
        Err(ConfigError::Invalid(format!(
            "{} must start with http:// or https:// (got '{}')",
            what, value
        ))
        .into())
    }
}
