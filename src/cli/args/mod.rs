//! Shared CLI argument types
//!
//! Reusable argument structs flattened into commands with
//! `#[command(flatten)]`.

mod common;
mod filters;
mod global;

pub use common::{ApiMethod, OutputFormat};
pub use filters::{ArticleFilterArgs, PayoutFilterArgs, QuizFilterArgs};
pub use global::GlobalOptions;
