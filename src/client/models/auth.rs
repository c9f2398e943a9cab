//! Authentication models

use serde::Serialize;

use super::require_min_chars;
use crate::error::Result;

/// Credentials posted to `/auth/login`
#[derive(Debug, Clone, Serialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    /// Username of at least 3 characters, password of at least 6
    pub fn validate(&self) -> Result<()> {
        require_min_chars("Username", &self.username, 3)?;
        if self.password.chars().count() < 6 {
            return Err(crate::error::Error::Validation(
                "Password must be at least 6 characters".to_string(),
            ));
        }
        Ok(())
    }
}
