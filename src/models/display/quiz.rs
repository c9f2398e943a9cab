//! Quiz display model

use serde::Serialize;
use tabled::Tabled;

use super::common::truncate_string;
use crate::client::models::QuizSummary;
use crate::output::formatters::format_minutes;

/// Quiz row for table/JSON output.
#[derive(Debug, Clone, Tabled, Serialize)]
pub struct QuizDisplay {
    #[tabled(rename = "UUID")]
    pub uuid: String,

    #[tabled(rename = "SLUG")]
    pub slug: String,

    #[tabled(rename = "TITLE")]
    pub title: String,

    #[tabled(rename = "LEVEL")]
    pub level: String,

    #[tabled(rename = "CATEGORY")]
    pub category: String,

    #[tabled(rename = "QUESTIONS")]
    pub questions: u32,

    #[tabled(rename = "ESTIMATE")]
    pub estimate: String,

    #[tabled(rename = "MIN SCORE")]
    pub minimum_score: u32,
}

impl From<QuizSummary> for QuizDisplay {
    fn from(quiz: QuizSummary) -> Self {
        Self {
            uuid: quiz.uuid,
            slug: quiz.slug,
            title: truncate_string(&quiz.title, 40),
            level: quiz.level.to_string(),
            category: quiz.category.name,
            questions: quiz.total_questions,
            estimate: format_minutes(quiz.estimate),
            minimum_score: quiz.minimum_score,
        }
    }
}
