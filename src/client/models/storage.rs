//! Storage upload models

use serde::{Deserialize, Serialize};

/// Result of `/storage/upload`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UploadedFile {
    /// Publicly reachable URL of the stored file
    pub public_url: String,
}
