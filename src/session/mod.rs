//! Client-side session state
//!
//! A [`Session`] wraps an injected [`SessionStore`] and exposes the decoded
//! identity of the signed-in administrator. Decode and expiry failures are
//! never surfaced to callers: they clear the stored credentials and degrade
//! to the empty identity.

use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};

use crate::error::{ApiError, Result};

pub mod store;
pub mod token;

#[cfg(test)]
pub use store::MemorySessionStore;
pub use store::{FileSessionStore, SessionStore, clear_session};
pub use token::{Identity, is_valid};

/// Cookie holding the bearer token
pub const ACCESS_TOKEN_COOKIE: &str = "access_token";

/// Companion cookie cleared together with the access token
pub const REFRESH_TOKEN_COOKIE: &str = "refresh_token";

/// Lifetime of the access token cookie written on login
pub const ACCESS_TOKEN_TTL_DAYS: i64 = 7;

/// Session bound to a cookie store, with a cached decoded identity
pub struct Session {
    store: Arc<dyn SessionStore>,
    cached: Mutex<Option<(String, Identity)>>,
}

impl Session {
    pub fn new(store: Arc<dyn SessionStore>) -> Self {
        Self {
            store,
            cached: Mutex::new(None),
        }
    }

    /// Session over a fresh in-memory store
    #[cfg(test)]
    pub fn in_memory() -> Self {
        Self::new(Arc::new(MemorySessionStore::new()))
    }

    /// Raw access token, if one is stored and non-empty
    pub fn token(&self) -> Option<String> {
        self.store
            .get(ACCESS_TOKEN_COOKIE)
            .filter(|t| !t.is_empty())
    }

    /// Whether the stored token is present, decodable, and unexpired
    pub fn is_valid(&self) -> bool {
        is_valid(self.token().as_deref())
    }

    /// Decoded identity of the current token (see [`Session::identity_at`])
    pub fn identity(&self) -> Identity {
        self.identity_at(Utc::now())
    }

    /// Decoded identity of the current token, evaluated at `now`.
    ///
    /// A malformed, expiry-less or expired token clears both cookies and
    /// yields the empty identity. No token yields the empty identity without
    /// touching the store.
    pub fn identity_at(&self, now: DateTime<Utc>) -> Identity {
        let Some(token) = self.token() else {
            log::debug!("No access token stored");
            self.reset_cache();
            return Identity::default();
        };

        {
            let cached = self.cached.lock().unwrap_or_else(|e| e.into_inner());
            if let Some((cached_token, identity)) = cached.as_ref() {
                if *cached_token == token && identity.check_expiry_at(now).is_ok() {
                    return identity.clone();
                }
            }
        }

        match token::validate_at(&token, now) {
            Ok(identity) => {
                *self.cached.lock().unwrap_or_else(|e| e.into_inner()) =
                    Some((token, identity.clone()));
                identity
            }
            Err(err) => {
                log::debug!("Discarding stored token: {}", err);
                self.clear_quietly();
                Identity::default()
            }
        }
    }

    /// Store a token returned by a successful login.
    ///
    /// The token must decode and be unexpired; otherwise nothing is stored.
    pub fn sign_in(&self, token: &str) -> Result<Identity> {
        let identity = token::validate_at(token, Utc::now()).map_err(|e| {
            ApiError::InvalidResponse(format!("Login returned an unusable token: {}", e))
        })?;

        let expires_at = Utc::now() + Duration::days(ACCESS_TOKEN_TTL_DAYS);
        self.store
            .set(ACCESS_TOKEN_COOKIE, token, Some(expires_at))?;
        *self.cached.lock().unwrap_or_else(|e| e.into_inner()) =
            Some((token.to_string(), identity.clone()));

        Ok(identity)
    }

    /// Clear both cookies and drop every piece of in-memory identity state
    pub fn logout(&self) -> Result<()> {
        self.reset_cache();
        clear_session(self.store.as_ref())
    }

    /// Clear credentials from a path that must not fail (guard, identity reads)
    pub(crate) fn clear_quietly(&self) {
        self.reset_cache();
        if let Err(err) = clear_session(self.store.as_ref()) {
            log::warn!("Failed to clear session cookies: {}", err);
        }
    }

    fn reset_cache(&self) {
        *self.cached.lock().unwrap_or_else(|e| e.into_inner()) = None;
    }
}
