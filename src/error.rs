//! Error types for the RagaMaya admin CLI

use thiserror::Error;

/// Result type alias for RagaMaya operations
pub type Result<T> = std::result::Result<T, Error>;

/// Top-level error type for the application
#[derive(Debug, Error)]
pub enum Error {
    #[error(transparent)]
    Api(#[from] ApiError),

    #[error(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("Interactive prompt error: {0}")]
    Dialoguer(String),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Session storage error: {0}")]
    Session(String),

    #[error("Validation failed: {0}")]
    Validation(String),

    #[error("Not signed in. Run `ragamaya login` first.")]
    NotSignedIn,

    #[error("Already signed in as {0}. Run `ragamaya logout` to switch accounts.")]
    AlreadySignedIn(String),

    #[error("Operation failed: {0}")]
    Other(String),
}

impl From<dialoguer::Error> for Error {
    fn from(err: dialoguer::Error) -> Self {
        Error::Dialoguer(err.to_string())
    }
}

/// API-related errors
///
/// `Request` and `Rejected` display the server-supplied message verbatim so
/// callers can surface it unchanged.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport failure or non-2xx HTTP status
    #[error("{message}")]
    Request { status: Option<u16>, message: String },

    /// 2xx transport response whose envelope reports a failure status
    #[error("{message}")]
    Rejected { status: u16, message: String },

    #[error("Invalid API response: {0}")]
    InvalidResponse(String),

    #[error("Resource not found: {0}")]
    NotFound(String),
}

#[cfg(test)]
impl ApiError {
    /// HTTP or envelope status attached to the error, if any
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::Request { status, .. } => *status,
            ApiError::Rejected { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    NotFound(String),

    #[error("Failed to parse configuration: {0}")]
    ParseError(String),

    #[error("Invalid configuration: {0}")]
    Invalid(String),

    #[error("Failed to save configuration: {0}")]
    SaveError(String),

    #[error(
        "Base API origin is not configured. Set RAGAMAYA_BASE_API or run `ragamaya config set base-api <URL>`."
    )]
    MissingBaseApi,
}

impl From<serde_yaml::Error> for ConfigError {
    fn from(err: serde_yaml::Error) -> Self {
        ConfigError::ParseError(err.to_string())
    }
}

/// Reasons a session token is unusable.
///
/// These never escape the session layer; they degrade to "no identity".
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum TokenError {
    #[error("Malformed token: {0}")]
    Malformed(String),

    #[error("Token has no expiry claim")]
    MissingExpiry,

    #[error("Token expired")]
    Expired,
}
