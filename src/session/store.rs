//! Cookie-jar storage for session credentials
//!
//! The session layer never reads ambient global state: every consumer is
//! handed a [`SessionStore`] explicitly. Production uses the file-backed
//! jar; tests use [`MemorySessionStore`].

use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{ACCESS_TOKEN_COOKIE, REFRESH_TOKEN_COOKIE};
use crate::error::{Error, Result};

/// Named cookie storage with `get`/`set`/`clear` semantics.
pub trait SessionStore: Send + Sync {
    /// Read a cookie. Cookies past their own expiry read as absent.
    fn get(&self, name: &str) -> Option<String>;

    /// Write a cookie, optionally with an expiry instant
    fn set(&self, name: &str, value: &str, expires_at: Option<DateTime<Utc>>) -> Result<()>;

    /// Remove a cookie. Removing an absent cookie is not an error.
    fn clear(&self, name: &str) -> Result<()>;
}

/// Remove both the access token and its companion refresh token.
pub fn clear_session(store: &dyn SessionStore) -> Result<()> {
    store.clear(ACCESS_TOKEN_COOKIE)?;
    store.clear(REFRESH_TOKEN_COOKIE)?;
    Ok(())
}

/// A stored cookie value
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Cookie {
    pub value: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expires_at: Option<DateTime<Utc>>,
}

impl Cookie {
    fn is_live_at(&self, now: DateTime<Utc>) -> bool {
        self.expires_at.is_none_or(|exp| now < exp)
    }
}

/// Serialized form of the jar
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct CookieJar {
    #[serde(default)]
    cookies: BTreeMap<String, Cookie>,
}

impl CookieJar {
    fn get(&self, name: &str) -> Option<String> {
        self.cookies
            .get(name)
            .filter(|c| c.is_live_at(Utc::now()))
            .map(|c| c.value.clone())
    }
}

/// In-memory cookie jar
#[cfg(test)]
#[derive(Debug, Default)]
pub struct MemorySessionStore {
    jar: Mutex<CookieJar>,
}

#[cfg(test)]
impl MemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Convenience constructor with an access token already set
    pub fn with_access_token(token: &str) -> Self {
        let store = Self::new();
        let mut jar = store.jar.lock().unwrap_or_else(|e| e.into_inner());
        jar.cookies.insert(
            ACCESS_TOKEN_COOKIE.to_string(),
            Cookie {
                value: token.to_string(),
                expires_at: None,
            },
        );
        drop(jar);
        store
    }
}

#[cfg(test)]
impl SessionStore for MemorySessionStore {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.lock().unwrap_or_else(|e| e.into_inner()).get(name)
    }

    fn set(&self, name: &str, value: &str, expires_at: Option<DateTime<Utc>>) -> Result<()> {
        self.jar
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .cookies
            .insert(
                name.to_string(),
                Cookie {
                    value: value.to_string(),
                    expires_at,
                },
            );
        Ok(())
    }

    fn clear(&self, name: &str) -> Result<()> {
        self.jar
            .lock()
            .unwrap_or_else(|e| e.into_inner())
            .cookies
            .remove(name);
        Ok(())
    }
}

/// File-backed cookie jar (`~/.ragamaya/session.yaml` by default).
///
/// The jar is loaded once at construction and rewritten on every mutation.
#[derive(Debug)]
pub struct FileSessionStore {
    path: PathBuf,
    jar: Mutex<CookieJar>,
}

impl FileSessionStore {
    /// Default jar location next to the config file
    pub fn default_path() -> Result<PathBuf> {
        Ok(crate::config::Config::default_dir()?.join("session.yaml"))
    }

    /// Open the jar at `path` (or the default location).
    ///
    /// A missing file is an empty jar. An unreadable jar is discarded with a
    /// warning rather than failing the command.
    pub fn open_at(path: Option<&str>) -> Result<Self> {
        let path = match path {
            Some(p) => PathBuf::from(p),
            None => Self::default_path()?,
        };

        let jar = if path.exists() {
            let contents = std::fs::read_to_string(&path)?;
            serde_yaml::from_str(&contents).unwrap_or_else(|e| {
                log::warn!("Ignoring unreadable session file {}: {}", path.display(), e);
                CookieJar::default()
            })
        } else {
            CookieJar::default()
        };

        Ok(Self {
            path,
            jar: Mutex::new(jar),
        })
    }

    /// Location of the backing file
    pub fn path(&self) -> &PathBuf {
        &self.path
    }

    fn persist(&self, jar: &CookieJar) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        let contents = serde_yaml::to_string(jar).map_err(|e| Error::Session(e.to_string()))?;
        std::fs::write(&self.path, contents)?;

        // Credentials: owner read/write only
        #[cfg(unix)]
        {
            use std::os::unix::fs::PermissionsExt;
            let mut perms = std::fs::metadata(&self.path)?.permissions();
            perms.set_mode(0o600);
            std::fs::set_permissions(&self.path, perms)?;
        }

        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn get(&self, name: &str) -> Option<String> {
        self.jar.lock().unwrap_or_else(|e| e.into_inner()).get(name)
    }

    fn set(&self, name: &str, value: &str, expires_at: Option<DateTime<Utc>>) -> Result<()> {
        let mut jar = self.jar.lock().unwrap_or_else(|e| e.into_inner());
        jar.cookies.insert(
            name.to_string(),
            Cookie {
                value: value.to_string(),
                expires_at,
            },
        );
        self.persist(&jar)
    }

    fn clear(&self, name: &str) -> Result<()> {
        let mut jar = self.jar.lock().unwrap_or_else(|e| e.into_inner());
        if jar.cookies.remove(name).is_none() {
            return Ok(());
        }
        self.persist(&jar)
    }
}
