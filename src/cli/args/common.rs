//! Common CLI types shared across commands

use clap::ValueEnum;

use crate::client::Verb;

/// Output format options
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Pretty format - human-optimized rich formatting (default)
    #[default]
    Pretty,
    /// Table format - one row per entry
    Table,
    /// JSON format - structured for scripts
    Json,
}

impl OutputFormat {
    /// Parse a format name from the config file, ignoring case
    pub fn parse_preference(value: &str) -> Option<Self> {
        <Self as ValueEnum>::from_str(value.trim(), true).ok()
    }
}

/// HTTP methods accepted by `ragamaya api`
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum ApiMethod {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl From<ApiMethod> for Verb {
    fn from(method: ApiMethod) -> Self {
        match method {
            ApiMethod::Get => Verb::Get,
            ApiMethod::Post => Verb::Post,
            ApiMethod::Put => Verb::Put,
            ApiMethod::Delete => Verb::Delete,
        }
    }
}
