//! Wallet payout models

use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_timestamp, require_min_chars};
use crate::error::{Error, Result};

/// Lifecycle state of a payout request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PayoutStatus {
    Pending,
    Completed,
    Failed,
}

impl fmt::Display for PayoutStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            PayoutStatus::Pending => "pending",
            PayoutStatus::Completed => "completed",
            PayoutStatus::Failed => "failed",
        };
        f.write_str(label)
    }
}

impl FromStr for PayoutStatus {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "pending" => Ok(PayoutStatus::Pending),
            "completed" => Ok(PayoutStatus::Completed),
            "failed" => Ok(PayoutStatus::Failed),
            other => Err(format!(
                "unknown status '{}' (expected pending, completed or failed)",
                other
            )),
        }
    }
}

/// Final state an administrator can move a pending payout to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PayoutResolution {
    Completed,
    Failed,
}

impl PayoutResolution {
    /// Path segment of `/wallet/payout/response/{segment}`
    pub fn as_path_segment(&self) -> &'static str {
        match self {
            PayoutResolution::Completed => "completed",
            PayoutResolution::Failed => "failed",
        }
    }
}

impl FromStr for PayoutResolution {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "completed" => Ok(PayoutResolution::Completed),
            "failed" => Ok(PayoutResolution::Failed),
            other => Err(format!(
                "unknown resolution '{}' (expected completed or failed)",
                other
            )),
        }
    }
}

/// Account that requested the payout
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PayoutUser {
    #[serde(default)]
    pub uuid: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub avatar_url: String,
}

/// Proof attached when a payout was answered
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct TransactionReceipt {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub receipt_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub note: Option<String>,
}

/// Payout request returned by `/wallet/payout/getall`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Payout {
    pub uuid: String,
    /// Amount in rupiah
    pub amount: f64,
    pub status: PayoutStatus,
    #[serde(default)]
    pub bank_name: String,
    #[serde(default)]
    pub bank_account: String,
    #[serde(default)]
    pub bank_account_name: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub transaction_receipt: Option<TransactionReceipt>,
    #[serde(default)]
    pub user: PayoutUser,
}

impl Payout {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    pub fn is_pending(&self) -> bool {
        self.status == PayoutStatus::Pending
    }

    /// Search over requester name/email and bank account name/number
    pub fn matches_search(&self, query: &str) -> bool {
        let lowered = query.to_lowercase();
        self.user.name.to_lowercase().contains(&lowered)
            || self.user.email.to_lowercase().contains(&lowered)
            || self.bank_account_name.to_lowercase().contains(&lowered)
            || self.bank_account.contains(query)
    }

    /// Review order: pending first, then newest first
    pub fn review_order(a: &Payout, b: &Payout) -> Ordering {
        match (a.is_pending(), b.is_pending()) {
            (true, false) => Ordering::Less,
            (false, true) => Ordering::Greater,
            _ => b.created_at_utc().cmp(&a.created_at_utc()),
        }
    }
}

/// Payload for `/wallet/payout/response/{completed|failed}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PayoutResponseRequest {
    pub payout_uuid: String,
    pub receipt_url: String,
    pub note: String,
}

impl PayoutResponseRequest {
    /// Receipt URL required; note of at least 10 characters
    pub fn validate(&self) -> Result<()> {
        if self.receipt_url.trim().is_empty() {
            return Err(Error::Validation(
                "Upload the transfer receipt first (--receipt-url or --receipt-file)".to_string(),
            ));
        }
        require_min_chars("Note", &self.note, 10)
    }
}
