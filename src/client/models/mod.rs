//! RagaMaya API data models
//!
//! Domain types exchanged with the RagaMaya backend, organized by resource.

mod analytics;
mod article;
mod auth;
mod payout;
mod quiz;
mod storage;

pub use analytics::Analytics;
#[cfg(test)]
pub use analytics::AnalyticRevenue;
pub use article::{ArticleDetail, ArticleRequest, ArticleSummary, Category};
pub use auth::LoginRequest;
pub use payout::{Payout, PayoutResolution, PayoutResponseRequest, PayoutStatus};
#[cfg(test)]
pub use payout::PayoutUser;
pub use quiz::{QuizDetail, QuizLevel, QuizRequest, QuizSummary};
pub use storage::UploadedFile;

use chrono::{DateTime, Utc};

use crate::error::{Error, Result};

/// Parse the backend's `created_at` text, which is RFC 3339 in practice
pub(crate) fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(value)
        .map(|dt| dt.with_timezone(&Utc))
        .ok()
}

/// Require at least `min` characters (after trimming) in a form field
pub(crate) fn require_min_chars(field: &str, value: &str, min: usize) -> Result<()> {
    if value.trim().chars().count() < min {
        return Err(Error::Validation(format!(
            "{} must be at least {} characters",
            field, min
        )));
    }
    Ok(())
}
