//! Command execution context
//!
//! Loads configuration, opens the session, builds the API client and gates
//! each command on the navigation guard for the page it stands in for.

use std::sync::Arc;

use crate::cli::OutputFormat;
use crate::cli::args::GlobalOptions;
use crate::client::RagaMayaClient;
use crate::config::Config;
use crate::error::{Error, Result};
use crate::guard::{Decision, Guard};
use crate::session::{FileSessionStore, Session};

/// Dashboard pages commands map to
pub mod routes {
    pub const LOGIN: &str = "/login";
    pub const DASHBOARD: &str = "/";
    pub const ARTICLES: &str = "/article";
    pub const QUIZZES: &str = "/quiz";
    pub const WITHDRAWALS: &str = "/withdraw";
}

/// Context for command execution: merged config, session, client and
/// output format.
pub struct CommandContext {
    pub config: Config,
    pub session: Arc<Session>,
    pub client: Arc<RagaMayaClient>,
    pub format: OutputFormat,
}

impl CommandContext {
    /// Build the context from global options.
    ///
    /// Nothing here touches the network; a missing base API origin only
    /// fails once a command issues a request.
    pub fn new(opts: &GlobalOptions) -> Result<Self> {
        let config = Config::load_at(opts.config_ref())?.with_overrides(&opts.overrides());
        let store = FileSessionStore::open_at(opts.session_ref())?;
        let session = Arc::new(Session::new(Arc::new(store)));
        let format = opts.resolve_format(&config);
        Self::with_parts(config, session, format)
    }

    /// Build the context from already-resolved parts
    pub fn with_parts(config: Config, session: Arc<Session>, format: OutputFormat) -> Result<Self> {
        let client = Arc::new(RagaMayaClient::new(config.base_api(), session.clone())?);
        Ok(Self {
            config,
            session,
            client,
            format,
        })
    }

    /// Run the guard for `path` and turn redirects into errors
    pub fn require_route(&self, path: &str) -> Result<()> {
        let decision = Guard::new(&self.session).enforce(path);
        decision_to_result(decision, || self.session.identity().display_name())
    }
}

/// Map a guard decision onto command success or failure
pub fn decision_to_result(decision: Decision, who: impl FnOnce() -> String) -> Result<()> {
    match decision {
        Decision::Allow => Ok(()),
        Decision::RedirectToLogin => Err(Error::NotSignedIn),
        Decision::RedirectToHome => Err(Error::AlreadySignedIn(who())),
    }
}
