//! JSON output formatting

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Envelope for JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct JsonOutput<T> {
    pub data: T,
    pub meta: Metadata,
}

/// Metadata included in JSON output
#[derive(Debug, Serialize, Deserialize)]
pub struct Metadata {
    /// When the output was produced (RFC 3339)
    pub timestamp: String,

    /// CLI version
    pub version: String,

    /// Number of records, when `data` is a list
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
}

impl JsonOutput<Value> {
    /// Wrap already-serialized data, counting records for lists
    pub fn new(data: Value) -> Self {
        let count = data.as_array().map(Vec::len);
        Self {
            data,
            meta: Metadata {
                timestamp: Utc::now().to_rfc3339(),
                version: env!("CARGO_PKG_VERSION").to_string(),
                count,
            },
        }
    }
}

/// Format data as pretty-printed JSON inside the output envelope
pub fn format_json<T: Serialize + ?Sized>(data: &T) -> Result<String, serde_json::Error> {
    let output = JsonOutput::new(serde_json::to_value(data)?);
    serde_json::to_string_pretty(&output)
}
