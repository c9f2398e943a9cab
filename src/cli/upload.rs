//! File upload command

use std::path::Path;

use colored::Colorize;
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::context::routes;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::AnalyticsApi;
use crate::error::{Error, Result};
use crate::output::json;

/// Run the upload command
pub async fn run(opts: &GlobalOptions, file: &Path) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::DASHBOARD)?;

    let url = upload_file(ctx.client.as_ref(), file).await?;

    match ctx.format {
        OutputFormat::Json => println!(
            "{}",
            json::format_json(&serde_json::json!({ "public_url": url }))?
        ),
        _ => println!("{} Uploaded {}\n{}", "✓".green(), file.display(), url.cyan()),
    }
    Ok(())
}

/// Upload a local file and return its public URL
pub async fn upload_file<C: AnalyticsApi + ?Sized>(client: &C, file: &Path) -> Result<String> {
    if !file.is_file() {
        return Err(Error::Validation(format!(
            "{} is not a readable file",
            file.display()
        )));
    }

    debug!("Uploading {}", file.display());
    let uploaded = client.upload(file).await?;
    Ok(uploaded.public_url)
}
