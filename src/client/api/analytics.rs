//! Analytics and storage API trait

use std::path::Path;

use async_trait::async_trait;

use crate::client::models::{Analytics, UploadedFile};
use crate::error::Result;

/// Dashboard overview and file storage
#[async_trait]
pub trait AnalyticsApi: Send + Sync {
    /// Platform-wide analytics
    async fn analytics(&self) -> Result<Analytics>;

    /// Upload a file (thumbnails, transfer receipts) and get its public URL
    async fn upload(&self, path: &Path) -> Result<UploadedFile>;
}
