//! API trait definitions split by responsibility
//!
//! - [`AuthApi`] - login
//! - [`ContentApi`] - articles and quizzes
//! - [`WalletApi`] - payout requests
//! - [`AnalyticsApi`] - dashboard analytics and file storage

mod analytics;
mod auth;
mod content;
mod wallet;

pub use analytics::AnalyticsApi;
pub use auth::AuthApi;
pub use content::ContentApi;
pub use wallet::WalletApi;
