//! Article display model

use serde::Serialize;
use tabled::Tabled;

use super::common::truncate_string;
use crate::client::models::ArticleSummary;
use crate::output::formatters::format_timestamp_local;

/// Article row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct ArticleDisplay {
    #[tabled(rename = "UUID")]
    pub uuid: String,

    #[tabled(rename = "SLUG")]
    pub slug: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "CATEGORY")]
    pub category: String,

    /// Local time in tables; raw RFC 3339 in JSON
    #[tabled(rename = "CREATED")]
    #[serde(skip)]
    pub created: String,

    #[tabled(skip)]
    pub created_at: String,
}

impl From<ArticleSummary> for ArticleDisplay {
    fn from(article: ArticleSummary) -> Self {
        Self {
            created: format_timestamp_local(&article.created_at),
            uuid: article.uuid,
            slug: article.slug,
            title: truncate_string(&article.title, 48),
            category: article.category.name,
            created_at: article.created_at,
        }
    }
}
