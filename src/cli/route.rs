//! Route check command
//!
//! Runs the navigation guard for a dashboard path exactly as a page load
//! would, including clearing an unusable session.

use chrono::Utc;
use colored::Colorize;
use serde::Serialize;

use crate::cli::args::GlobalOptions;
use crate::cli::{CommandContext, OutputFormat};
use crate::error::Result;
use crate::guard::{self, Decision, Guard, RouteClass};
use crate::output::{json, table};

/// Outcome of a route check
#[derive(Debug, Serialize)]
pub struct RouteReport {
    pub path: String,
    pub guarded: bool,
    pub public: bool,
    pub decision: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub redirect: Option<String>,
    pub session_cleared: bool,
}

/// Run the route command
pub fn run(opts: &GlobalOptions, path: &str) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    let path = normalize(path);

    let verdict = Guard::new(&ctx.session).enforce_at(&path, Utc::now());
    let redirect = verdict
        .decision
        .target()
        .map(|target| absolute_target(ctx.config.client_origin().as_deref(), target));

    let report = RouteReport {
        guarded: guard::is_guarded(&path),
        public: guard::classify(&path) == RouteClass::Public,
        decision: verdict.decision.to_string(),
        redirect,
        session_cleared: verdict.clear_session,
        path,
    };

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&report)?),
        OutputFormat::Table => println!(
            "{}",
            table::format_details(&[
                ("Path", report.path.clone()),
                ("Decision", report.decision.clone()),
                ("Redirect", report.redirect.clone().unwrap_or_default()),
                ("Session cleared", report.session_cleared.to_string()),
            ])
        ),
        OutputFormat::Pretty => print_pretty(&report, verdict.decision),
    }
    Ok(())
}

fn print_pretty(report: &RouteReport, decision: Decision) {
    let kind = if !report.guarded {
        "not guarded"
    } else if report.public {
        "public"
    } else {
        "protected"
    };

    match decision {
        Decision::Allow => println!("{} {} ({})", "✓".green(), report.path.bold(), kind),
        _ => println!(
            "{} {} ({}) → {}",
            "→".yellow(),
            report.path.bold(),
            kind,
            report.redirect.as_deref().unwrap_or_default().cyan()
        ),
    }

    if report.session_cleared {
        println!("{} Stored session was invalid and has been cleared", "○".dimmed());
    }
}

/// Paths are given as dashboard paths; add a missing leading slash
fn normalize(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}

/// Redirect target as an absolute URL when the dashboard origin is known
fn absolute_target(origin: Option<&str>, target: &str) -> String {
    match origin {
        Some(origin) => format!("{}{}", origin, target),
        None => target.to_string(),
    }
}
