//! RagaMaya API client implementation

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client as HttpClient;
use reqwest::multipart::{Form, Part};
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;

use super::api::{AnalyticsApi, AuthApi, ContentApi, WalletApi};
use super::models::{
    Analytics, ArticleDetail, ArticleRequest, ArticleSummary, LoginRequest, Payout,
    PayoutResolution, PayoutResponseRequest, QuizDetail, QuizRequest, QuizSummary, UploadedFile,
};
use super::reply::ApiReply;
use super::request::{GENERIC_FAILURE_MESSAGE, RequestDescriptor, Verb, failure_message};
use crate::error::{ApiError, ConfigError, Result};
use crate::session::Session;

/// Per-request timeout
const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Multipart field name expected by `/storage/upload`
const UPLOAD_FIELD: &str = "file";

/// RagaMaya API client
///
/// Holds the configured origin and the session it reads bearer tokens from.
/// The origin is checked lazily so commands that never call the API work
/// without it.
pub struct RagaMayaClient {
    http: HttpClient,
    base_url: Option<String>,
    session: Arc<Session>,
}

impl RagaMayaClient {
    /// Create a new client
    pub fn new(base_url: Option<String>, session: Arc<Session>) -> Result<Self> {
        let http = HttpClient::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| ApiError::Request {
                status: None,
                message: e.to_string(),
            })?;

        Ok(Self {
            http,
            base_url: base_url.map(|b| b.trim_end_matches('/').to_string()),
            session,
        })
    }

    fn base_url(&self) -> Result<&str> {
        self.base_url
            .as_deref()
            .filter(|b| !b.is_empty())
            .ok_or_else(|| ConfigError::MissingBaseApi.into())
    }

    /// Issue one call and return the payload unchanged.
    ///
    /// See [`RequestDescriptor::prepare`] for the verb, header and body
    /// rules. Failures carry the server's `message` when it sent one.
    pub async fn request(
        &self,
        path: &str,
        verb: Verb,
        body: Option<Value>,
        override_patch: bool,
    ) -> Result<Value> {
        let mut descriptor = RequestDescriptor::new(verb, path);
        if let Some(body) = body {
            descriptor = descriptor.with_body(body);
        }
        if override_patch {
            descriptor = descriptor.override_to_patch();
        }
        self.send(&descriptor).await
    }

    /// Issue the call a descriptor describes
    pub async fn send(&self, descriptor: &RequestDescriptor) -> Result<Value> {
        let base_url = self.base_url()?;
        let token = self.session.token();
        let prepared = descriptor.prepare(base_url, token.as_deref());

        log::debug!("{} {}", prepared.method, prepared.url);

        let mut builder = self.http.request(prepared.method.clone(), &prepared.url);
        for (name, value) in &prepared.headers {
            builder = builder.header(*name, value);
        }
        if !prepared.query.is_empty() {
            builder = builder.query(&prepared.query);
        }
        if let Some(json) = &prepared.json {
            builder = builder.body(json.to_string());
        }

        self.execute(builder).await
    }

    /// Issue a call and decode the response envelope
    pub async fn send_reply<T: DeserializeOwned>(
        &self,
        descriptor: &RequestDescriptor,
    ) -> Result<ApiReply<T>> {
        let payload = self.send(descriptor).await?;
        ApiReply::decode(payload)
    }

    async fn execute(&self, builder: reqwest::RequestBuilder) -> Result<Value> {
        let response = match builder.send().await {
            Ok(response) => response,
            Err(err) => {
                let message = transport_message(&err);
                log::warn!("API request failed: {}", message);
                return Err(ApiError::Request {
                    status: None,
                    message,
                }
                .into());
            }
        };

        let status = response.status();
        let text = response.text().await.map_err(|e| ApiError::Request {
            status: Some(status.as_u16()),
            message: transport_message(&e),
        })?;

        if !status.is_success() {
            let message = failure_message(status.as_u16(), &text);
            log::warn!("API request failed ({}): {}", status, message);
            return Err(ApiError::Request {
                status: Some(status.as_u16()),
                message,
            }
            .into());
        }

        if text.trim().is_empty() {
            return Ok(Value::Null);
        }
        Ok(serde_json::from_str(&text).unwrap_or(Value::String(text)))
    }

    async fn get_body<T: DeserializeOwned>(&self, path: &str, what: &str) -> Result<T> {
        self.send_reply(&RequestDescriptor::get(path))
            .await?
            .into_body(what)
    }

    async fn mutate<B: Serialize + ?Sized>(
        &self,
        verb: Verb,
        path: &str,
        body: Option<&B>,
    ) -> Result<Option<String>> {
        let mut descriptor = RequestDescriptor::new(verb, path);
        if let Some(body) = body {
            descriptor = descriptor.with_body(serde_json::to_value(body)?);
        }
        self.send_reply::<Value>(&descriptor).await?.into_message()
    }
}

fn transport_message(err: &reqwest::Error) -> String {
    let message = if err.is_timeout() {
        "Request timed out".to_string()
    } else if err.is_connect() {
        "Failed to connect to API".to_string()
    } else {
        err.to_string()
    };

    if message.trim().is_empty() {
        GENERIC_FAILURE_MESSAGE.to_string()
    } else {
        message
    }
}

/// Best-effort content type for uploads
fn mime_for(path: &Path) -> &'static str {
    match path
        .extension()
        .and_then(|e| e.to_str())
        .map(|e| e.to_ascii_lowercase())
        .as_deref()
    {
        Some("png") => "image/png",
        Some("jpg") | Some("jpeg") => "image/jpeg",
        Some("webp") => "image/webp",
        Some("pdf") => "application/pdf",
        _ => "application/octet-stream",
    }
}

/// Pull the token out of a login payload (`token`, or a string `body`)
fn extract_token(payload: &Value) -> Option<String> {
    payload
        .get("token")
        .and_then(Value::as_str)
        .or_else(|| payload.get("body").and_then(Value::as_str))
        .filter(|t| !t.is_empty())
        .map(str::to_string)
}

#[async_trait]
impl AuthApi for RagaMayaClient {
    async fn login(&self, credentials: &LoginRequest) -> Result<String> {
        let descriptor =
            RequestDescriptor::post("/auth/login").with_body(serde_json::to_value(credentials)?);
        let payload = self.send(&descriptor).await?;

        if let Ok(ApiReply::Failure { status, message }) =
            ApiReply::<Value>::decode(payload.clone())
        {
            return Err(ApiError::Rejected { status, message }.into());
        }

        extract_token(&payload).ok_or_else(|| {
            ApiError::InvalidResponse("Token not found in login response".to_string()).into()
        })
    }
}

#[async_trait]
impl ContentApi for RagaMayaClient {
    async fn list_articles(&self) -> Result<Vec<ArticleSummary>> {
        self.send_reply(&RequestDescriptor::get("/article/search"))
            .await?
            .into_body_or(Vec::new())
    }

    async fn get_article(&self, slug: &str) -> Result<ArticleDetail> {
        self.get_body(&format!("/article/{}", slug), "article").await
    }

    async fn create_article(&self, request: &ArticleRequest) -> Result<Option<String>> {
        self.mutate(Verb::Post, "/article/create", Some(request))
            .await
    }

    async fn update_article(
        &self,
        uuid: &str,
        request: &ArticleRequest,
    ) -> Result<Option<String>> {
        self.mutate(Verb::Put, &format!("/article/update/{}", uuid), Some(request))
            .await
    }

    async fn list_quizzes(&self) -> Result<Vec<QuizSummary>> {
        self.send_reply(&RequestDescriptor::get("/quiz/search"))
            .await?
            .into_body_or(Vec::new())
    }

    async fn get_quiz(&self, slug: &str) -> Result<QuizDetail> {
        self.get_body(&format!("/quiz/{}", slug), "quiz").await
    }

    async fn create_quiz(&self, request: &QuizRequest) -> Result<Option<String>> {
        self.mutate(Verb::Post, "/quiz/create", Some(request)).await
    }

    async fn update_quiz(&self, uuid: &str, request: &QuizRequest) -> Result<Option<String>> {
        self.mutate(Verb::Post, &format!("/quiz/update/{}", uuid), Some(request))
            .await
    }

    async fn delete_quiz(&self, uuid: &str) -> Result<Option<String>> {
        self.mutate::<Value>(Verb::Delete, &format!("/quiz/delete/{}", uuid), None)
            .await
    }
}

#[async_trait]
impl WalletApi for RagaMayaClient {
    async fn list_payouts(&self) -> Result<Vec<Payout>> {
        self.send_reply(&RequestDescriptor::get("/wallet/payout/getall"))
            .await?
            .into_body_or(Vec::new())
    }

    async fn respond_payout(
        &self,
        resolution: PayoutResolution,
        request: &PayoutResponseRequest,
    ) -> Result<Option<String>> {
        let path = format!("/wallet/payout/response/{}", resolution.as_path_segment());
        self.mutate(Verb::Post, &path, Some(request)).await
    }
}

#[async_trait]
impl AnalyticsApi for RagaMayaClient {
    async fn analytics(&self) -> Result<Analytics> {
        self.get_body("/analytic/getall", "analytics").await
    }

    async fn upload(&self, path: &Path) -> Result<UploadedFile> {
        let base_url = self.base_url()?;
        let bytes = tokio::fs::read(path).await?;
        let file_name = path
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or("upload")
            .to_string();

        let part = Part::bytes(bytes)
            .file_name(file_name)
            .mime_str(mime_for(path))
            .map_err(|e| ApiError::Request {
                status: None,
                message: e.to_string(),
            })?;
        let form = Form::new().part(UPLOAD_FIELD, part);

        let url = format!("{}/storage/upload", base_url);
        log::debug!("POST {} (multipart)", url);

        let mut builder = self.http.post(&url).multipart(form);
        if let Some(token) = self.session.token() {
            builder = builder.header("Authorization", format!("Bearer {}", token));
        }

        let payload = self.execute(builder).await?;
        ApiReply::decode(payload)?.into_body("uploaded file")
    }
}
