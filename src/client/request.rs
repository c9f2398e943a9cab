//! Request descriptors and their wire form
//!
//! Everything that decides what goes on the wire lives here as pure
//! functions, so header/verb/body rules are testable without a server.

use std::fmt;

use reqwest::Method;
use serde_json::Value;

/// Header carrying the intended verb when the wire verb differs
pub const METHOD_OVERRIDE_HEADER: &str = "X-HTTP-Method-Override";

/// Message used when neither the server nor the transport explains a failure
pub const GENERIC_FAILURE_MESSAGE: &str = "Request failed. Please try again.";

/// Verbs a caller may request
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Get,
    Post,
    Put,
    Delete,
}

impl Verb {
    pub fn as_method(&self) -> Method {
        match self {
            Verb::Get => Method::GET,
            Verb::Post => Method::POST,
            Verb::Put => Method::PUT,
            Verb::Delete => Method::DELETE,
        }
    }

    /// Reads carry their body as query parameters
    pub fn is_read(&self) -> bool {
        matches!(self, Verb::Get)
    }
}

impl fmt::Display for Verb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_method().as_str())
    }
}

/// Everything that determines one outbound call
#[derive(Debug, Clone, PartialEq)]
pub struct RequestDescriptor {
    pub path: String,
    pub verb: Verb,
    pub body: Option<Value>,
    pub override_patch: bool,
}

impl RequestDescriptor {
    pub fn new(verb: Verb, path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            verb,
            body: None,
            override_patch: false,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Verb::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Verb::Post, path)
    }

    #[cfg(test)]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Verb::Put, path)
    }

    #[cfg(test)]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Verb::Delete, path)
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Send as POST with `X-HTTP-Method-Override: PATCH`
    pub fn override_to_patch(mut self) -> Self {
        self.override_patch = true;
        self
    }

    /// Resolve the wire form against a base origin and optional bearer token
    pub fn prepare(&self, base_url: &str, token: Option<&str>) -> PreparedRequest {
        let mut headers = Vec::new();

        if let Some(token) = token.filter(|t| !t.is_empty()) {
            headers.push(("Authorization", format!("Bearer {}", token)));
        }

        let (query, json) = if self.verb.is_read() {
            let query = self.body.as_ref().map(query_pairs).unwrap_or_default();
            (query, None)
        } else {
            headers.push(("Content-Type", "application/json".to_string()));
            let intended = if self.override_patch {
                "PATCH".to_string()
            } else {
                self.verb.to_string()
            };
            headers.push((METHOD_OVERRIDE_HEADER, intended));
            (Vec::new(), self.body.clone())
        };

        let method = if self.override_patch {
            Method::POST
        } else {
            self.verb.as_method()
        };

        PreparedRequest {
            method,
            url: format!("{}{}", base_url, self.path),
            headers,
            query,
            json,
        }
    }
}

/// Wire form of a [`RequestDescriptor`]
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: Method,
    pub url: String,
    pub headers: Vec<(&'static str, String)>,
    pub query: Vec<(String, String)>,
    pub json: Option<Value>,
}

#[cfg(test)]
impl PreparedRequest {
    /// Value of a header, if set
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Flatten a JSON object into query parameters.
///
/// Scalars become text, arrays repeat as `key[]`, nested objects are sent
/// as JSON text and nulls are dropped. A non-object body has no keys to
/// name its values and yields nothing.
pub fn query_pairs(body: &Value) -> Vec<(String, String)> {
    let Value::Object(map) = body else {
        return Vec::new();
    };

    let mut pairs = Vec::new();
    for (key, value) in map {
        match value {
            Value::Null => {}
            Value::Array(items) => {
                let name = format!("{}[]", key);
                pairs.extend(
                    items
                        .iter()
                        .filter_map(scalar_text)
                        .map(|v| (name.clone(), v)),
                );
            }
            other => {
                if let Some(text) = scalar_text(other) {
                    pairs.push((key.clone(), text));
                }
            }
        }
    }
    pairs
}

fn scalar_text(value: &Value) -> Option<String> {
    match value {
        Value::Null => None,
        Value::String(s) => Some(s.clone()),
        Value::Bool(b) => Some(b.to_string()),
        Value::Number(n) => Some(n.to_string()),
        Value::Array(_) | Value::Object(_) => Some(value.to_string()),
    }
}

/// Pick the message for a non-2xx response.
///
/// Priority: the server's `message` field, then the transport description,
/// then [`GENERIC_FAILURE_MESSAGE`].
pub fn failure_message(status: u16, body: &str) -> String {
    server_message(body)
        .or_else(|| (status != 0).then(|| format!("Request failed with status code {}", status)))
        .unwrap_or_else(|| GENERIC_FAILURE_MESSAGE.to_string())
}

/// The `message` field of a JSON error body, if present and non-empty
pub fn server_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    match value.get("message")? {
        Value::String(s) if !s.trim().is_empty() => Some(s.clone()),
        _ => None,
    }
}
