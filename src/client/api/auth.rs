//! Authentication API trait

use async_trait::async_trait;

use crate::client::models::LoginRequest;
use crate::error::Result;

/// Authentication operations for the RagaMaya API
#[async_trait]
pub trait AuthApi: Send + Sync {
    /// Exchange credentials for a bearer token
    async fn login(&self, credentials: &LoginRequest) -> Result<String>;
}
