//! Quiz models

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::{Category, require_min_chars};
use crate::error::{Error, Result};

/// Number of answer options every question carries
pub const OPTIONS_PER_QUESTION: usize = 4;

/// Allowed question count per quiz
pub const MIN_QUESTIONS: usize = 3;
pub const MAX_QUESTIONS: usize = 20;

/// Quiz difficulty
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum QuizLevel {
    Beginner,
    Intermediate,
    Advanced,
}

impl fmt::Display for QuizLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            QuizLevel::Beginner => "beginner",
            QuizLevel::Intermediate => "intermediate",
            QuizLevel::Advanced => "advanced",
        };
        f.write_str(label)
    }
}

impl FromStr for QuizLevel {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "beginner" => Ok(QuizLevel::Beginner),
            "intermediate" => Ok(QuizLevel::Intermediate),
            "advanced" => Ok(QuizLevel::Advanced),
            other => Err(format!(
                "unknown level '{}' (expected beginner, intermediate or advanced)",
                other
            )),
        }
    }
}

/// Quiz row returned by `/quiz/search`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizSummary {
    pub uuid: String,
    pub slug: String,
    pub title: String,
    pub level: QuizLevel,
    #[serde(default)]
    pub estimate: u32,
    #[serde(default)]
    pub minimum_score: u32,
    #[serde(default)]
    pub total_questions: u32,
    #[serde(default)]
    pub category: Category,
}

impl QuizSummary {
    /// Case-insensitive substring search over title, slug and category
    pub fn matches_search(&self, query: &str) -> bool {
        let query = query.to_lowercase();
        self.title.to_lowercase().contains(&query)
            || self.slug.to_lowercase().contains(&query)
            || self.category.name.to_lowercase().contains(&query)
    }
}

/// Question as returned by `/quiz/{slug}` (answers are not disclosed)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestionDetail {
    pub question: String,
    #[serde(default)]
    pub options: Vec<String>,
}

/// Full quiz returned by `/quiz/{slug}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizDetail {
    pub uuid: String,
    pub slug: String,
    pub title: String,
    #[serde(default)]
    pub desc: String,
    pub level: QuizLevel,
    #[serde(default)]
    pub estimate: u32,
    #[serde(default)]
    pub minimum_score: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
    #[serde(default)]
    pub category: Category,
    #[serde(default)]
    pub questions: Vec<QuizQuestionDetail>,
}

/// Question in a create/update payload
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizQuestion {
    pub question: String,
    pub options: Vec<String>,
    /// Index of the correct option
    pub answer_index: i32,
}

/// Payload for `/quiz/create` and `/quiz/update/{uuid}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuizRequest {
    pub title: String,
    pub desc: String,
    pub level: QuizLevel,
    /// Category name
    pub category: String,
    /// Estimated duration in minutes
    pub estimate: u32,
    /// Passing score, 1..=100
    pub minimum_score: u32,
    pub questions: Vec<QuizQuestion>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub thumbnail: Option<String>,
}

impl QuizRequest {
    /// Apply the dashboard's form rules
    pub fn validate(&self) -> Result<()> {
        require_min_chars("Title", &self.title, 10)?;
        require_min_chars("Description", &self.desc, 20)?;
        require_min_chars("Category", &self.category, 3)?;

        if self.estimate < 1 {
            return Err(Error::Validation(
                "Estimate must be at least 1 minute".to_string(),
            ));
        }
        if !(1..=100).contains(&self.minimum_score) {
            return Err(Error::Validation(
                "Minimum score must be between 1 and 100".to_string(),
            ));
        }
        if !(MIN_QUESTIONS..=MAX_QUESTIONS).contains(&self.questions.len()) {
            return Err(Error::Validation(format!(
                "A quiz needs between {} and {} questions (found {})",
                MIN_QUESTIONS,
                MAX_QUESTIONS,
                self.questions.len()
            )));
        }

        for (i, question) in self.questions.iter().enumerate() {
            let n = i + 1;
            require_min_chars(&format!("Question {}", n), &question.question, 10)?;
            if question.options.len() != OPTIONS_PER_QUESTION {
                return Err(Error::Validation(format!(
                    "Question {} must have exactly {} options",
                    n, OPTIONS_PER_QUESTION
                )));
            }
            if question.options.iter().any(|o| o.trim().is_empty()) {
                return Err(Error::Validation(format!(
                    "Question {} has an empty option",
                    n
                )));
            }
            if !(0..OPTIONS_PER_QUESTION as i32).contains(&question.answer_index) {
                return Err(Error::Validation(format!(
                    "Question {} must mark one correct answer (answer_index 0-3)",
                    n
                )));
            }
        }

        Ok(())
    }
}
