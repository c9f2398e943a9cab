//! Analytics overview command

use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::context::routes;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::AnalyticsApi;
use crate::error::Result;
use crate::models::display::analytics_metrics;
use crate::output::{Formattable, json};

/// Run the analytics command
pub async fn run(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::DASHBOARD)?;

    debug!("Fetching analytics overview");
    let analytics = ctx.client.analytics().await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&analytics)?),
        _ => analytics_metrics(&analytics).print(ctx.format)?,
    }
    Ok(())
}
