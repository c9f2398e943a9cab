//! RagaMaya API client
//!
//! [`RagaMayaClient`] talks to the backend; command handlers depend on the
//! responsibility traits in [`api`] so tests can substitute the mock.

pub mod api;
#[cfg(test)]
pub mod mock;
pub mod models;
pub mod ragamaya;
pub mod reply;
pub mod request;

pub use api::{AnalyticsApi, AuthApi, ContentApi, WalletApi};
#[cfg(test)]
pub use mock::MockRagaMayaClient;
pub use ragamaya::RagaMayaClient;
pub use request::Verb;
