//! Raw API request command

use log::debug;
use serde_json::Value;

use crate::cli::args::GlobalOptions;
use crate::cli::context::routes;
use crate::cli::{ApiMethod, CommandContext, OutputFormat};
use crate::error::{Error, Result};
use crate::output::json;

/// Run `ragamaya api`
pub async fn run(
    opts: &GlobalOptions,
    path: &str,
    method: ApiMethod,
    data: Option<&str>,
    override_patch: bool,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::DASHBOARD)?;

    let body = parse_body(data)?;
    let path = api_path(path);
    debug!("Raw {:?} request to {}", method, path);

    let payload = ctx
        .client
        .request(&path, method.into(), body, override_patch)
        .await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&payload)?),
        _ => println!("{}", serde_json::to_string_pretty(&payload)?),
    }
    Ok(())
}

/// Inline JSON, or `@path` to read JSON from a file
fn parse_body(data: Option<&str>) -> Result<Option<Value>> {
    let Some(data) = data else {
        return Ok(None);
    };

    let text = match data.strip_prefix('@') {
        Some(file) => std::fs::read_to_string(file)?,
        None => data.to_string(),
    };

    serde_json::from_str(&text)
        .map(Some)
        .map_err(|e| Error::Validation(format!("--data is not valid JSON: {}", e)))
}

fn api_path(path: &str) -> String {
    let path = path.trim();
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("/{}", path)
    }
}
