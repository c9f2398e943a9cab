//! Status command implementation

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::config::Config;
use crate::error::{Result, TokenError};
use crate::output::json;
use crate::session::{ACCESS_TOKEN_COOKIE, FileSessionStore, SessionStore, token};

/// Session state as seen without side effects
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SessionState {
    SignedOut,
    SignedIn {
        name: String,
        expires_in_minutes: i64,
    },
    Expired,
    Invalid {
        reason: String,
    },
}

/// Classify a stored token without clearing it
pub fn session_state(token: Option<&str>) -> SessionState {
    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return SessionState::SignedOut;
    };

    let now = Utc::now();
    match token::validate_at(token, now) {
        Ok(identity) => SessionState::SignedIn {
            name: identity.display_name(),
            expires_in_minutes: identity
                .expires_at()
                .map(|exp| exp.signed_duration_since(now).num_minutes())
                .unwrap_or_default(),
        },
        Err(TokenError::Expired) => SessionState::Expired,
        Err(err) => SessionState::Invalid {
            reason: err.to_string(),
        },
    }
}

#[derive(Debug, Serialize)]
struct StatusReport {
    config_file: String,
    session_file: String,
    base_api: Option<String>,
    client_origin: Option<String>,
    session: SessionState,
}

/// Run the status command
pub fn run(opts: &GlobalOptions) -> Result<()> {
    let config_path = Config::resolve_path(opts.config_ref())?;
    let config = Config::load_at(opts.config_ref())?.with_overrides(&opts.overrides());
    let store = FileSessionStore::open_at(opts.session_ref())?;

    let report = StatusReport {
        config_file: config_path.display().to_string(),
        session_file: store.path().display().to_string(),
        base_api: config.base_api(),
        client_origin: config.client_origin(),
        session: session_state(store.get(ACCESS_TOKEN_COOKIE).as_deref()),
    };

    if opts.resolve_format(&config) == OutputFormat::Json {
        println!("{}", json::format_json(&report)?);
        return Ok(());
    }

    println!("{}\n", "RagaMaya Admin Status".bold());
    println!("Config file:  {}", report.config_file.cyan());
    println!("Session file: {}", report.session_file.cyan());
    println!();

    match report.base_api {
        Some(ref base) => println!("{} Base API: {}", "✓".green(), base),
        None => {
            println!("{} Base API not configured", "✗".red());
            println!("  → Run 'ragamaya config set base-api <URL>'");
        }
    }

    if let Some(ref origin) = report.client_origin {
        println!("{} Dashboard origin: {}", "○".dimmed(), origin.cyan());
    }

    match report.session {
        SessionState::SignedIn {
            ref name,
            expires_in_minutes,
        } => println!(
            "{} Signed in as {} (expires in {}h {}m)",
            "✓".green(),
            name.bold(),
            expires_in_minutes / 60,
            expires_in_minutes % 60
        ),
        SessionState::Expired => {
            println!("{} Session expired", "⚠".yellow());
            println!("  → Run 'ragamaya login' to sign in again");
        }
        SessionState::Invalid { ref reason } => {
            println!("{} Stored session is unusable ({})", "⚠".yellow(), reason);
            println!("  → It will be cleared on the next command");
        }
        SessionState::SignedOut => {
            println!("{} Not signed in", "○".dimmed());
            println!("  → Run 'ragamaya login'");
        }
    }
    println!();

    Ok(())
}
