//! Payout review commands

use std::path::PathBuf;

use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::article::report_saved;
use crate::cli::context::routes;
use crate::cli::upload::upload_file;
use crate::cli::{CommandContext, PayoutFilterArgs};
use crate::client::models::{Payout, PayoutResolution, PayoutResponseRequest};
use crate::client::{AnalyticsApi, WalletApi};
use crate::error::{ApiError, Error, Result};
use crate::models::PayoutDisplay;
use crate::output::Formattable;

/// Run `payout list`
pub async fn list(opts: &GlobalOptions, filters: &PayoutFilterArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::WITHDRAWALS)?;

    let payouts = fetch_payouts(ctx.client.as_ref(), filters).await?;
    let display: Vec<PayoutDisplay> = payouts.into_iter().map(PayoutDisplay::from).collect();
    display.print(ctx.format)
}

pub async fn fetch_payouts<C: WalletApi + ?Sized>(
    client: &C,
    filters: &PayoutFilterArgs,
) -> Result<Vec<Payout>> {
    let payouts = client.list_payouts().await?;
    debug!("Fetched {} payout requests", payouts.len());
    Ok(filters.apply(payouts))
}

/// Arguments of `payout respond`
#[derive(Debug, Clone)]
pub struct RespondArgs {
    pub uuid: String,
    pub resolution: PayoutResolution,
    pub note: String,
    pub receipt_url: Option<String>,
    pub receipt_file: Option<PathBuf>,
}

/// Run `payout respond`
pub async fn respond(opts: &GlobalOptions, args: RespondArgs) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::WITHDRAWALS)?;

    let fallback = match args.resolution {
        PayoutResolution::Completed => "Payout marked as completed",
        PayoutResolution::Failed => "Payout marked as failed",
    };
    let message = respond_to_payout(ctx.client.as_ref(), &args).await?;
    report_saved(ctx.format, fallback, message)
}

/// Resolve a pending payout.
///
/// The payout must exist and still be pending. A local receipt is
/// uploaded only after the note and payout state check out.
pub async fn respond_to_payout<C: WalletApi + AnalyticsApi + ?Sized>(
    client: &C,
    args: &RespondArgs,
) -> Result<Option<String>> {
    let payout = client
        .list_payouts()
        .await?
        .into_iter()
        .find(|p| p.uuid == args.uuid)
        .ok_or_else(|| ApiError::NotFound(format!("payout {}", args.uuid)))?;

    if !payout.is_pending() {
        return Err(Error::Validation(format!(
            "Payout {} is already {}",
            payout.uuid, payout.status
        )));
    }

    let mut request = PayoutResponseRequest {
        payout_uuid: payout.uuid.clone(),
        receipt_url: args.receipt_url.clone().unwrap_or_default(),
        note: args.note.trim().to_string(),
    };

    if let Some(ref file) = args.receipt_file {
        PayoutResponseRequest {
            receipt_url: file.display().to_string(),
            ..request.clone()
        }
        .validate()?;
        request.receipt_url = upload_file(client, file).await?;
    }
    request.validate()?;

    debug!(
        "Responding to payout {} as {}",
        payout.uuid,
        args.resolution.as_path_segment()
    );
    client.respond_payout(args.resolution, &request).await
}
