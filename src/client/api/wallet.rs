//! Wallet payout API trait

use async_trait::async_trait;

use crate::client::models::{Payout, PayoutResolution, PayoutResponseRequest};
use crate::error::Result;

/// Payout review operations
#[async_trait]
pub trait WalletApi: Send + Sync {
    /// All payout requests, in server order
    async fn list_payouts(&self) -> Result<Vec<Payout>>;

    /// Mark a pending payout completed or failed
    async fn respond_payout(
        &self,
        resolution: PayoutResolution,
        request: &PayoutResponseRequest,
    ) -> Result<Option<String>>;
}
