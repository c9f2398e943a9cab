//! Payout display model

use serde::Serialize;
use tabled::Tabled;

use super::common::or_dash;
use crate::client::models::Payout;
use crate::output::formatters::{format_rupiah, format_timestamp_local};

/// Payout request row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct PayoutDisplay {
    #[tabled(rename = "UUID")]
    pub uuid: String,

    #[tabled(rename = "STATUS")]
    pub status: String,

    #[tabled(rename = "SELLER")]
    pub seller: String,

    #[tabled(rename = "AMOUNT")]
    pub amount: String,

    #[tabled(rename = "BANK")]
    pub bank: String,

    #[tabled(rename = "ACCOUNT")]
    pub account: String,

    #[tabled(rename = "REQUESTED")]
    pub requested: String,
}

impl From<Payout> for PayoutDisplay {
    fn from(payout: Payout) -> Self {
        let seller = if payout.user.name.is_empty() {
            or_dash(&payout.user.email)
        } else {
            payout.user.name.clone()
        };

        Self {
            status: payout.status.to_string(),
            amount: format_rupiah(payout.amount),
            bank: or_dash(&payout.bank_name),
            account: format!(
                "{} ({})",
                or_dash(&payout.bank_account),
                or_dash(&payout.bank_account_name)
            ),
            requested: format_timestamp_local(&payout.created_at),
            uuid: payout.uuid,
            seller,
        }
    }
}
