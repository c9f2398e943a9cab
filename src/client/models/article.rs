//! Article models

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{parse_timestamp, require_min_chars};
use crate::error::{Error, Result};

/// Content category shared by articles and quizzes
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Category {
    pub uuid: String,
    pub name: String,
}

impl Category {
    /// Match by uuid or case-insensitive name
    pub fn matches(&self, needle: &str) -> bool {
        self.uuid == needle || self.name.eq_ignore_ascii_case(needle)
    }
}

/// Article row returned by `/article/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleSummary {
    pub uuid: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub category: Category,
}

impl ArticleSummary {
    pub fn created_at_utc(&self) -> Option<DateTime<Utc>> {
        parse_timestamp(&self.created_at)
    }

    /// Case-insensitive substring search over title, slug and category
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.slug.to_lowercase().contains(&query)
            || self.category.name.to_lowercase().contains(&query)
    }
}

/// Full article returned by `/article/{slug}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleDetail {
    pub uuid: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub thumbnail: String,
    #[serde(default)]
    pub created_at: String,
    #[serde(default)]
    pub category: Category,
}

/// Payload for `/article/create` and `/article/update/{uuid}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ArticleRequest {
    pub title: String,
    pub content: String,
    /// Category name; the backend creates unknown categories
    pub category: String,
    pub thumbnail: String,
}

impl ArticleRequest {
    /// Request pre-filled from an existing article
    pub fn from_detail(detail: &ArticleDetail) -> Self {
        Self {
            title: detail.title.clone(),
            content: detail.content.clone(),
            category: detail.category.name.clone(),
            thumbnail: detail.thumbnail.clone(),
        }
    }

    /// Title ≥ 10, content ≥ 50, category ≥ 3 characters; thumbnail required
    pub fn validate(&self) -> Result<()> {
        require_min_chars("Title", &self.title, 10)?;
        require_min_chars("Content", &self.content, 50)?;
        require_min_chars("Category", &self.category, 3)?;
        if self.thumbnail.trim().is_empty() {
            return Err(Error::Validation(
                "A thumbnail is required for articles".to_string(),
            ));
        }
        Ok(())
    }
}
