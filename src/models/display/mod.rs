//! Display model implementations for table and JSON output
//!
//! Display models transform API response types into CLI-friendly formats
//! with appropriate column names and serialization.

mod analytics;
mod article;
mod common;
mod identity;
mod payout;
mod quiz;

pub use analytics::analytics_metrics;
pub use article::ArticleDisplay;
pub use identity::IdentityDisplay;
pub use payout::PayoutDisplay;
pub use quiz::QuizDisplay;
