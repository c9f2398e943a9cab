//! Mock RagaMaya API client for testing
//!
//! Provides a mock implementation of the API traits so command handlers
//! can be tested without a backend.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use serde::Serialize;
use serde_json::Value;
use tokio::sync::Mutex;

use super::api::{AnalyticsApi, AuthApi, ContentApi, WalletApi};
use super::models::{
    Analytics, ArticleDetail, ArticleRequest, ArticleSummary, LoginRequest, Payout,
    PayoutResolution, PayoutResponseRequest, QuizDetail, QuizRequest, QuizSummary, UploadedFile,
};
use crate::error::{ApiError, Result};

/// Mock API client for testing.
///
/// Configure responses via builder methods, then hand it to a handler.
///
/// # Example
/// ```ignore
/// let mock = MockRagaMayaClient::new().with_payouts(vec![payout]).await;
/// let payouts = mock.list_payouts().await?;
/// assert_eq!(payouts.len(), 1);
/// ```
#[derive(Default)]
pub struct MockRagaMayaClient {
    /// Token returned from login
    token: Arc<Mutex<Option<String>>>,
    articles: Arc<Mutex<Vec<ArticleSummary>>>,
    article_details: Arc<Mutex<Vec<ArticleDetail>>>,
    quizzes: Arc<Mutex<Vec<QuizSummary>>>,
    quiz_details: Arc<Mutex<Vec<QuizDetail>>>,
    payouts: Arc<Mutex<Vec<Payout>>>,
    analytics: Arc<Mutex<Analytics>>,
    /// Error to return on the next call, consumed on first use
    error: Arc<Mutex<Option<ApiError>>>,
    /// Every call, in order
    captured_requests: Arc<Mutex<Vec<CapturedRequest>>>,
}

/// A captured API call for test assertions.
#[derive(Debug, Clone)]
pub struct CapturedRequest {
    /// Trait method called (e.g. "update_article")
    pub method: String,
    /// Slug, uuid or path segment the call targeted
    pub target: Option<String>,
    /// Serialized request payload, if any
    pub payload: Option<Value>,
}

impl MockRagaMayaClient {
    pub fn new() -> Self {
        Self::default()
    }

    pub async fn with_token(self, token: &str) -> Self {
        *self.token.lock().await = Some(token.to_string());
        self
    }

    pub async fn with_articles(self, articles: Vec<ArticleSummary>) -> Self {
        *self.articles.lock().await = articles;
        self
    }

    pub async fn with_article_details(self, details: Vec<ArticleDetail>) -> Self {
        *self.article_details.lock().await = details;
        self
    }

    pub async fn with_quizzes(self, quizzes: Vec<QuizSummary>) -> Self {
        *self.quizzes.lock().await = quizzes;
        self
    }

    pub async fn with_quiz_details(self, details: Vec<QuizDetail>) -> Self {
        *self.quiz_details.lock().await = details;
        self
    }

    pub async fn with_payouts(self, payouts: Vec<Payout>) -> Self {
        *self.payouts.lock().await = payouts;
        self
    }

    pub async fn with_analytics(self, analytics: Analytics) -> Self {
        *self.analytics.lock().await = analytics;
        self
    }

    /// Configure an error to return on the next API call.
    pub async fn with_error(self, error: ApiError) -> Self {
        *self.error.lock().await = Some(error);
        self
    }

    pub async fn captured_requests(&self) -> Vec<CapturedRequest> {
        self.captured_requests.lock().await.clone()
    }

    /// Names of the methods called so far
    pub async fn calls(&self) -> Vec<String> {
        self.captured_requests
            .lock()
            .await
            .iter()
            .map(|r| r.method.clone())
            .collect()
    }

    async fn check_error(&self) -> Result<()> {
        if let Some(e) = self.error.lock().await.take() {
            return Err(e.into());
        }
        Ok(())
    }

    async fn capture<P: Serialize>(&self, method: &str, target: Option<&str>, payload: Option<&P>) {
        self.captured_requests.lock().await.push(CapturedRequest {
            method: method.to_string(),
            target: target.map(str::to_string),
            payload: payload.and_then(|p| serde_json::to_value(p).ok()),
        });
    }

    async fn record(&self, method: &str, target: Option<&str>) -> Result<()> {
        self.capture::<Value>(method, target, None).await;
        self.check_error().await
    }

    async fn record_with<P: Serialize>(
        &self,
        method: &str,
        target: Option<&str>,
        payload: &P,
    ) -> Result<()> {
        self.capture(method, target, Some(payload)).await;
        self.check_error().await
    }
}

#[async_trait]
impl AuthApi for MockRagaMayaClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<String> {
        self.record_with("login", Some(&credentials.username), credentials)
            .await?;
        Ok(self
            .token
            .lock()
            .await
            .clone()
            .unwrap_or_else(|| "mock-token".to_string()))
    }
}

#[async_trait]
impl ContentApi for MockRagaMayaClient {
    async fn list_articles(&self) -> Result<Vec<ArticleSummary>> {
        self.record("list_articles", None).await?;
        Ok(self.articles.lock().await.clone())
    }

    async fn get_article(&self, slug: &str) -> Result<ArticleDetail> {
        self.record("get_article", Some(slug)).await?;
        self.article_details
            .lock()
            .await
            .iter()
            .find(|a| a.slug == slug)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("article {}", slug)).into())
    }

    async fn create_article(&self, request: &ArticleRequest) -> Result<Option<String>> {
        self.record_with("create_article", None, request).await?;
        Ok(Some("Article created".to_string()))
    }

    async fn update_article(
        &self,
        uuid: &str,
        request: &ArticleRequest,
    ) -> Result<Option<String>> {
        self.record_with("update_article", Some(uuid), request)
            .await?;
        Ok(Some("Article updated".to_string()))
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>> {
        self.record("list_quizzes", None).await?;
        Ok(self.quizzes.lock().await.clone())
    }

    async fn get_quiz(&self, slug: &str) -> Result<QuizDetail> {
        self.record("get_quiz", Some(slug)).await?;
        self.quiz_details
            .lock()
            .await
            .iter()
            .find(|q| q.slug == slug)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("quiz {}", slug)).into())
    }

    async fn create_quiz(&self, request: &QuizRequest) -> Result<Option<String>> {
        self.record_with("create_quiz", None, request).await?;
        Ok(Some("Quiz created".to_string()))
    }

    async fn update_quiz(&self, uuid: &str, request: &QuizRequest) -> Result<Option<String>> {
        self.record_with("update_quiz", Some(uuid), request).await?;
        Ok(Some("Quiz updated".to_string()))
    }

    async fn delete_quiz(&self, uuid: &str) -> Result<Option<String>> {
        self.record("delete_quiz", Some(uuid)).await?;
        Ok(None)
    }
}

#[async_trait]
impl WalletApi for MockRagaMayaClient {
    async fn list_payouts(&self) -> Result<Vec<Payout>> {
        self.record("list_payouts", None).await?;
        Ok(self.payouts.lock().await.clone())
    }

    async fn respond_payout(
        &self,
        resolution: PayoutResolution,
        request: &PayoutResponseRequest,
    ) -> Result<Option<String>> {
        self.record_with(
            "respond_payout",
            Some(resolution.as_path_segment()),
            request,
        )
        .await?;
        Ok(Some("Payout updated".to_string()))
    }
}

#[async_trait]
impl AnalyticsApi for MockRagaMayaClient {
    async fn analytics(&self) -> Result<Analytics> {
        self.record("analytics", None).await?;
        Ok(self.analytics.lock().await.clone())
    }

    async fn upload(&self, path: &Path) -> Result<UploadedFile> {
        let name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();
        self.record("upload", Some(&name)).await?;
        Ok(UploadedFile {
            public_url: format!("https://storage.ragamaya.test/{}", name),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_error_is_consumed_once() {
        let mock = MockRagaMayaClient::new()
            .with_error(ApiError::NotFound("x".to_string()))
            .await;

        assert!(mock.list_articles().await.is_err());
        assert!(mock.list_articles().await.is_ok());
        assert_eq!(mock.calls().await, vec!["list_articles", "list_articles"]);
    }

    #[tokio::test]
    async fn test_captures_payloads() {
        let mock = MockRagaMayaClient::new();
        mock.login(&LoginRequest {
            username: "admin".to_string(),
            password: "secret1".to_string(),
        })
        .await
        .unwrap();

        let captured = mock.captured_requests().await;
        assert_eq!(captured[0].target.as_deref(), Some("admin"));
        assert_eq!(
            captured[0].payload.as_ref().unwrap()["password"],
            "secret1"
        );
    }
}
