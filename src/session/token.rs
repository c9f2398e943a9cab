//! Bearer token decoding
//!
//! Tokens are compact JWTs. Only the payload is inspected; the signature is
//! verified by the backend, never here.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::error::TokenError;

/// Decode base64url (URL-safe alphabet, padding optional)
fn base64_decode_url(input: &str) -> Result<Vec<u8>, String> {
    use base64::{Engine as _, engine::general_purpose};

    general_purpose::URL_SAFE_NO_PAD
        .decode(input.trim_end_matches('='))
        .map_err(|e| e.to_string())
}

/// Seller profile attached to some admin accounts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SellerProfile {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub uuid: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
}

/// Identity fields decoded from a session token.
///
/// The default value is the empty identity: what callers see when there is
/// no usable token.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Identity {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub seller_profile: Option<SellerProfile>,

    /// Issued-at, seconds since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub iat: Option<i64>,

    /// Expires-at, seconds since epoch
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exp: Option<i64>,
}

impl Identity {
    /// True for the identity produced by a missing or unusable token
    pub fn is_empty(&self) -> bool {
        *self == Identity::default()
    }

    /// Best label for messages: name, then email, then id
    pub fn display_name(&self) -> String {
        self.name
            .as_deref()
            .or(self.email.as_deref())
            .or(self.id.as_deref())
            .unwrap_or("unknown user")
            .to_string()
    }

    /// Expiry as a timestamp.
    ///
    /// Values beyond the representable range clamp to its nearest end.
    pub fn expires_at(&self) -> Option<DateTime<Utc>> {
        let exp = self.exp?;
        Some(DateTime::from_timestamp(exp, 0).unwrap_or(if exp > 0 {
            DateTime::<Utc>::MAX_UTC
        } else {
            DateTime::<Utc>::MIN_UTC
        }))
    }

    /// Check the expiry claim against `now`.
    ///
    /// A token is usable only while `now` is strictly before its expiry. A
    /// token without an expiry claim is never usable.
    pub fn check_expiry_at(&self, now: DateTime<Utc>) -> Result<(), TokenError> {
        let expires_at = self.expires_at().ok_or(TokenError::MissingExpiry)?;
        if now < expires_at {
            Ok(())
        } else {
            Err(TokenError::Expired)
        }
    }
}

/// Decode the payload of a compact JWT into an [`Identity`]
pub fn decode_claims(token: &str) -> Result<Identity, TokenError> {
    let parts: Vec<&str> = token.split('.').collect();
    if parts.len() != 3 {
        return Err(TokenError::Malformed(format!(
            "expected 3 segments, found {}",
            parts.len()
        )));
    }

    let payload_bytes = base64_decode_url(parts[1])
        .map_err(|e| TokenError::Malformed(format!("payload is not base64url: {}", e)))?;

    let payload: Value = serde_json::from_slice(&payload_bytes)
        .map_err(|e| TokenError::Malformed(format!("payload is not JSON: {}", e)))?;

    let Value::Object(claims) = payload else {
        return Err(TokenError::Malformed(
            "payload is not a JSON object".to_string(),
        ));
    };

    Ok(Identity {
        id: text_claim(&claims, "sub")
            .or_else(|| text_claim(&claims, "uuid"))
            .or_else(|| text_claim(&claims, "id")),
        name: text_claim(&claims, "name"),
        email: text_claim(&claims, "email"),
        role: text_claim(&claims, "role"),
        avatar: text_claim(&claims, "avatar_url"),
        seller_profile: claims
            .get("seller_profile")
            .and_then(|v| serde_json::from_value(v.clone()).ok()),
        iat: time_claim(&claims, "iat"),
        exp: time_claim(&claims, "exp"),
    })
}

/// Decode and require a live expiry
pub fn validate_at(token: &str, now: DateTime<Utc>) -> Result<Identity, TokenError> {
    let identity = decode_claims(token)?;
    identity.check_expiry_at(now)?;
    Ok(identity)
}

/// True iff a token is present, decodes, and expires strictly after `now`
pub fn is_valid_at(token: Option<&str>, now: DateTime<Utc>) -> bool {
    match token {
        Some(t) if !t.is_empty() => validate_at(t, now).is_ok(),
        _ => false,
    }
}

/// [`is_valid_at`] against the current clock
pub fn is_valid(token: Option<&str>) -> bool {
    is_valid_at(token, Utc::now())
}

fn text_claim(claims: &Map<String, Value>, key: &str) -> Option<String> {
    match claims.get(key)? {
        Value::String(s) if !s.is_empty() => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

fn time_claim(claims: &Map<String, Value>, key: &str) -> Option<i64> {
    let value = claims.get(key)?;
    value
        .as_i64()
        .or_else(|| value.as_f64().map(|f| f.floor() as i64))
}
