//! Article and quiz API trait

use async_trait::async_trait;

use crate::client::models::{
    ArticleDetail, ArticleRequest, ArticleSummary, QuizDetail, QuizRequest, QuizSummary,
};
use crate::error::Result;

/// Content management operations
#[async_trait]
pub trait ContentApi: Send + Sync {
    /// All articles (`GET /article/search`)
    async fn list_articles(&self) -> Result<Vec<ArticleSummary>>;

    /// One article by slug
    async fn get_article(&self, slug: &str) -> Result<ArticleDetail>;

    /// Create an article, returning the server's message
    async fn create_article(&self, request: &ArticleRequest) -> Result<Option<String>>;

    /// Replace an article's fields
    async fn update_article(&self, uuid: &str, request: &ArticleRequest)
    -> Result<Option<String>>;

    /// All quizzes (`GET /quiz/search`)
    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>>;

    /// One quiz by slug
    async fn get_quiz(&self, slug: &str) -> Result<QuizDetail>;

    /// Create a quiz
    async fn create_quiz(&self, request: &QuizRequest) -> Result<Option<String>>;

    /// Replace a quiz
    async fn update_quiz(&self, uuid: &str, request: &QuizRequest) -> Result<Option<String>>;

    /// Delete a quiz
    async fn delete_quiz(&self, uuid: &str) -> Result<Option<String>>;
}
