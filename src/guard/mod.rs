//! Navigation guard
//!
//! Decides, once per navigation, whether a dashboard route may be shown,
//! must redirect to the login page, or must redirect away from it. The
//! decision is a pure function of the path, the stored token and the clock;
//! [`Guard::enforce`] additionally clears invalid credentials.

use std::fmt;

use chrono::{DateTime, Utc};

use crate::session::{Session, token};

/// Login page
pub const LOGIN_PATH: &str = "/login";

/// Dashboard home
pub const HOME_PATH: &str = "/";

/// Paths reachable without a session
const PUBLIC_PREFIXES: &[&str] = &["/login", "/register"];

/// Paths the guard never runs for (API routes, static assets, favicon)
const EXCLUDED_PREFIXES: &[&str] = &["api", "_next/static", "_next/image", "favicon.ico"];

/// Route classification
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteClass {
    /// Login and registration pages
    Public,
    /// Everything else
    Protected,
}

/// Classify a path as public or protected
pub fn classify(path: &str) -> RouteClass {
    if PUBLIC_PREFIXES.iter().any(|p| path.starts_with(p)) {
        RouteClass::Public
    } else {
        RouteClass::Protected
    }
}

/// Whether the guard runs for `path` at all
pub fn is_guarded(path: &str) -> bool {
    let rest = path.strip_prefix('/').unwrap_or(path);
    !EXCLUDED_PREFIXES.iter().any(|p| rest.starts_with(p))
}

/// Outcome of a navigation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Decision {
    Allow,
    RedirectToLogin,
    RedirectToHome,
}

impl Decision {
    /// Redirect target, if the decision is a redirect
    pub fn target(&self) -> Option<&'static str> {
        match self {
            Decision::Allow => None,
            Decision::RedirectToLogin => Some(LOGIN_PATH),
            Decision::RedirectToHome => Some(HOME_PATH),
        }
    }
}

impl fmt::Display for Decision {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Decision::Allow => write!(f, "allow"),
            Decision::RedirectToLogin => write!(f, "redirect to {}", LOGIN_PATH),
            Decision::RedirectToHome => write!(f, "redirect to {}", HOME_PATH),
        }
    }
}

/// A decision plus whether the stored credentials must be cleared with it
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Verdict {
    pub decision: Decision,
    pub clear_session: bool,
}

impl Verdict {
    fn keep(decision: Decision) -> Self {
        Self {
            decision,
            clear_session: false,
        }
    }

    fn clear(decision: Decision) -> Self {
        Self {
            decision,
            clear_session: true,
        }
    }
}

/// Evaluate a navigation to `path` with the given raw token at `now`.
///
/// Rules, in order:
/// 1. no token, protected path: redirect to login
/// 2. no token, public path: allow
/// 3. invalid or expired token: clear credentials; public paths are
///    allowed, protected paths redirect to login
/// 4. valid token, public path: redirect home
/// 5. valid token, protected path: allow
pub fn evaluate(path: &str, token: Option<&str>, now: DateTime<Utc>) -> Verdict {
    let class = classify(path);

    let Some(token) = token.filter(|t| !t.is_empty()) else {
        return match class {
            RouteClass::Protected => Verdict::keep(Decision::RedirectToLogin),
            RouteClass::Public => Verdict::keep(Decision::Allow),
        };
    };

    if let Err(err) = token::validate_at(token, now) {
        log::debug!("Guard rejected token for {}: {}", path, err);
        return match class {
            RouteClass::Protected => Verdict::clear(Decision::RedirectToLogin),
            RouteClass::Public => Verdict::clear(Decision::Allow),
        };
    }

    match class {
        RouteClass::Public => Verdict::keep(Decision::RedirectToHome),
        RouteClass::Protected => Verdict::keep(Decision::Allow),
    }
}

/// Guard bound to a session store
pub struct Guard<'a> {
    session: &'a Session,
}

impl<'a> Guard<'a> {
    pub fn new(session: &'a Session) -> Self {
        Self { session }
    }

    /// Evaluate a navigation and apply its side effects
    pub fn enforce(&self, path: &str) -> Decision {
        self.enforce_at(path, Utc::now()).decision
    }

    /// [`Guard::enforce`] at a fixed instant, returning the full verdict
    pub fn enforce_at(&self, path: &str, now: DateTime<Utc>) -> Verdict {
        if !is_guarded(path) {
            return Verdict::keep(Decision::Allow);
        }

        let token = self.session.token();
        let verdict = evaluate(path, token.as_deref(), now);
        if verdict.clear_session {
            self.session.clear_quietly();
        }

        log::debug!("Guard: {} -> {}", path, verdict.decision);
        verdict
    }
}
