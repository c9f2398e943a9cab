//! Response envelope decoding
//!
//! The backend wraps payloads as `{ "status": 200, "message": "...",
//! "body": ... }`. [`ApiReply`] decodes that shape once, at the boundary,
//! so handlers match on success/failure instead of probing fields.

use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::error::{ApiError, Result};

/// Decoded response envelope
#[derive(Debug, Clone, PartialEq)]
pub enum ApiReply<T> {
    Success {
        message: Option<String>,
        body: Option<T>,
    },
    Failure {
        status: u16,
        message: String,
    },
}

impl<T: DeserializeOwned> ApiReply<T> {
    /// Decode a raw payload.
    ///
    /// A missing `status` or one in 200..=299 is a success. A present but
    /// null `body` is treated as absent.
    pub fn decode(value: Value) -> Result<Self> {
        let Value::Object(mut map) = value else {
            return Err(
                ApiError::InvalidResponse("expected a JSON object envelope".to_string()).into(),
            );
        };

        let status = match map.get("status") {
            None | Some(Value::Null) => None,
            Some(v) => Some(parse_status(v).ok_or_else(|| {
                ApiError::InvalidResponse(format!("unrecognised status field: {}", v))
            })?),
        };

        let message = match map.remove("message") {
            Some(Value::String(s)) if !s.is_empty() => Some(s),
            _ => None,
        };

        match status {
            Some(code) if !(200..300).contains(&code) => Ok(ApiReply::Failure {
                status: code,
                message: message
                    .unwrap_or_else(|| format!("Request failed with status {}", code)),
            }),
            _ => {
                let body = match map.remove("body") {
                    None | Some(Value::Null) => None,
                    Some(raw) => Some(serde_json::from_value(raw).map_err(|e| {
                        ApiError::InvalidResponse(format!("Failed to parse response body: {}", e))
                    })?),
                };
                Ok(ApiReply::Success { message, body })
            }
        }
    }
}

impl<T> ApiReply<T> {
    #[cfg(test)]
    pub fn is_success(&self) -> bool {
        matches!(self, ApiReply::Success { .. })
    }

    /// The body of a success; failures and empty successes are errors
    pub fn into_body(self, what: &str) -> Result<T> {
        match self {
            ApiReply::Success { body: Some(body), .. } => Ok(body),
            ApiReply::Success { body: None, .. } => {
                Err(ApiError::InvalidResponse(format!("{} missing from response", what)).into())
            }
            ApiReply::Failure { status, message } => {
                Err(ApiError::Rejected { status, message }.into())
            }
        }
    }

    /// The body of a success, or `default` when the success carried none
    pub fn into_body_or(self, default: T) -> Result<T> {
        match self {
            ApiReply::Success { body, .. } => Ok(body.unwrap_or(default)),
            ApiReply::Failure { status, message } => {
                Err(ApiError::Rejected { status, message }.into())
            }
        }
    }

    /// The message of a success (for mutations with no useful body)
    pub fn into_message(self) -> Result<Option<String>> {
        match self {
            ApiReply::Success { message, .. } => Ok(message),
            ApiReply::Failure { status, message } => {
                Err(ApiError::Rejected { status, message }.into())
            }
        }
    }
}

fn parse_status(value: &Value) -> Option<u16> {
    match value {
        Value::Number(n) => n.as_u64().and_then(|n| u16::try_from(n).ok()),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}
