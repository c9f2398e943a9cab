//! CLI command definitions and handlers

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};

pub mod analytics;
pub mod api;
pub mod args;
pub mod article;
pub mod auth;
pub mod config;
pub mod context;
pub mod payout;
pub mod quiz;
pub mod route;
pub mod status;
pub mod upload;

pub use args::{ApiMethod, ArticleFilterArgs, OutputFormat, PayoutFilterArgs, QuizFilterArgs};
pub use context::CommandContext;

use crate::client::models::PayoutResolution;

/// RagaMaya admin CLI - manage the RagaMaya marketplace from the terminal
#[derive(Parser, Debug)]
#[command(name = "ragamaya")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Output format (pretty, table, json)
    #[arg(
        long,
        global = true,
        env = "RAGAMAYA_FORMAT",
        hide_env = true,
        hide_possible_values = true
    )]
    pub format: Option<OutputFormat>,

    /// Override config file location
    #[arg(long, global = true, env = "RAGAMAYA_CONFIG", hide_env = true)]
    pub config: Option<String>,

    /// Override session file location
    #[arg(long, global = true, env = "RAGAMAYA_SESSION", hide_env = true)]
    pub session: Option<String>,

    /// Base API origin (e.g. https://api.ragamaya.com)
    #[arg(long, global = true, env = "RAGAMAYA_BASE_API", hide_env = true)]
    pub base_api: Option<String>,

    /// Public dashboard origin, used to print redirect targets
    #[arg(long, global = true, env = "RAGAMAYA_CLIENT_ORIGIN", hide_env = true)]
    pub client_origin: Option<String>,

    /// Enable debug logging
    #[arg(long, global = true, env = "RAGAMAYA_DEBUG", hide_env = true)]
    pub debug: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Sign in as an administrator
    Login {
        /// Username (prompted when omitted)
        #[arg(long, short = 'u')]
        username: Option<String>,

        /// Password (prompted when omitted)
        #[arg(long, env = "RAGAMAYA_PASSWORD", hide_env_values = true)]
        password: Option<String>,
    },

    /// Sign out and clear the stored session
    Logout,

    /// Show configuration and session status
    Status,

    /// Show the signed-in administrator
    Whoami,

    /// Show what the navigation guard decides for a dashboard path
    #[command(after_help = "\
Examples:
  ragamaya route /quiz        # protected page
  ragamaya route /login       # public page")]
    Route {
        /// Dashboard path, e.g. /article
        path: String,
    },

    /// Show the dashboard analytics overview
    Analytics,

    /// Manage articles
    #[command(subcommand)]
    Article(ArticleCommands),

    /// Manage quizzes
    #[command(subcommand)]
    Quiz(QuizCommands),

    /// Review seller payout requests
    #[command(subcommand)]
    Payout(PayoutCommands),

    /// Upload a file to storage and print its public URL
    Upload {
        /// File to upload
        file: PathBuf,
    },

    /// Send an authenticated request to the RagaMaya API
    #[command(after_help = "\
Examples:
  ragamaya api /article/search --data '{\"category\":\"seni\"}'
  ragamaya api /quiz/update/q-1 -X post --data @quiz.json
  ragamaya api /user/profile -X put --data @profile.json --override-patch")]
    Api {
        /// API path, e.g. /article/search
        path: String,

        /// Request method
        #[arg(long, short = 'X', value_enum, default_value_t = ApiMethod::Get)]
        method: ApiMethod,

        /// JSON body, or @FILE to read it from a file (query parameters for GET)
        #[arg(long, short = 'd')]
        data: Option<String>,

        /// Send as POST with an X-HTTP-Method-Override: PATCH header
        #[arg(long)]
        override_patch: bool,
    },

    /// View or change configuration
    #[command(subcommand)]
    Config(ConfigCommands),
}

/// Article subcommands
#[derive(Subcommand, Debug)]
pub enum ArticleCommands {
    /// List articles, newest first
    List {
        #[command(flatten)]
        filters: ArticleFilterArgs,
    },

    /// Show one article
    Get {
        /// Article slug
        slug: String,
    },

    /// Create an article
    Create {
        #[command(flatten)]
        fields: ArticleFieldArgs,
    },

    /// Change an article's fields
    Update {
        /// Article slug
        slug: String,

        #[command(flatten)]
        fields: ArticleFieldArgs,
    },
}

/// Editable article fields
#[derive(clap::Args, Debug, Default, Clone)]
pub struct ArticleFieldArgs {
    /// Title (at least 10 characters)
    #[arg(long)]
    pub title: Option<String>,

    /// Content (at least 50 characters)
    #[arg(long, conflicts_with = "content_file")]
    pub content: Option<String>,

    /// Read content from a file
    #[arg(long)]
    pub content_file: Option<PathBuf>,

    /// Category name
    #[arg(long)]
    pub category: Option<String>,

    /// Thumbnail URL
    #[arg(long, conflicts_with = "thumbnail_file")]
    pub thumbnail: Option<String>,

    /// Upload a local image as the thumbnail
    #[arg(long)]
    pub thumbnail_file: Option<PathBuf>,
}

/// Quiz subcommands
#[derive(Subcommand, Debug)]
pub enum QuizCommands {
    /// List quizzes
    List {
        #[command(flatten)]
        filters: QuizFilterArgs,
    },

    /// Show one quiz with its questions
    Get {
        /// Quiz slug
        slug: String,
    },

    /// Create a quiz from a YAML or JSON definition
    Create {
        /// Quiz definition file
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Replace a quiz with a YAML or JSON definition
    Update {
        /// Quiz slug
        slug: String,

        /// Quiz definition file
        #[arg(long, short = 'f')]
        file: PathBuf,
    },

    /// Delete one or more quizzes
    #[command(after_help = "\
Examples:
  ragamaya quiz delete 3f2a...            # Prompts for confirmation
  ragamaya quiz delete 3f2a... 9c1b... --yes")]
    Delete {
        /// Quiz UUIDs
        #[arg(required = true)]
        uuids: Vec<String>,

        /// Skip confirmation prompt
        #[arg(long, short = 'y')]
        yes: bool,
    },
}

/// Payout subcommands
#[derive(Subcommand, Debug)]
pub enum PayoutCommands {
    /// List payout requests, pending first
    List {
        #[command(flatten)]
        filters: PayoutFilterArgs,
    },

    /// Complete or reject a pending payout
    Respond {
        /// Payout UUID
        uuid: String,

        /// Resolution (completed, failed)
        #[arg(long)]
        status: PayoutResolution,

        /// Note for the seller (at least 10 characters)
        #[arg(long)]
        note: String,

        /// URL of an already uploaded transfer receipt
        #[arg(long, conflicts_with = "receipt_file")]
        receipt_url: Option<String>,

        /// Upload a local transfer receipt
        #[arg(long)]
        receipt_file: Option<PathBuf>,
    },
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommands {
    /// Show the effective configuration
    Show,

    /// Save a setting to the config file
    Set {
        /// Setting to change
        key: ConfigKey,

        /// New value
        value: String,
    },
}

/// Settings stored in the config file
#[derive(ValueEnum, Clone, Copy, Debug, PartialEq, Eq)]
pub enum ConfigKey {
    /// Base API origin
    BaseApi,
    /// Public dashboard origin
    ClientOrigin,
    /// Default output format
    Format,
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_parse_api_request() {
        let cli = Cli::try_parse_from([
            "ragamaya",
            "api",
            "/user/profile",
            "-X",
            "put",
            "--data",
            "{}",
            "--override-patch",
        ])
        .unwrap();

        match cli.command {
            Commands::Api {
                path,
                method,
                data,
                override_patch,
            } => {
                assert_eq!(path, "/user/profile");
                assert_eq!(method, ApiMethod::Put);
                assert_eq!(data.as_deref(), Some("{}"));
                assert!(override_patch);
            }
            other => panic!("Expected Api, got {:?}", other),
        }

        let cli = Cli::try_parse_from(["ragamaya", "api", "/analytic/getall"]).unwrap();
        assert!(matches!(
            cli.command,
            Commands::Api {
                method: ApiMethod::Get,
                override_patch: false,
                ..
            }
        ));
    }

    #[test]
    fn test_parse_payout_respond() {
        let cli = Cli::try_parse_from([
            "ragamaya",
            "payout",
            "respond",
            "p-1",
            "--status",
            "failed",
            "--note",
            "Nomor rekening tidak valid",
            "--receipt-url",
            "https://cdn/r.png",
        ])
        .unwrap();

        match cli.command {
            Commands::Payout(PayoutCommands::Respond {
                uuid,
                status,
                receipt_url,
                ..
            }) => {
                assert_eq!(uuid, "p-1");
                assert_eq!(status, PayoutResolution::Failed);
                assert_eq!(receipt_url.as_deref(), Some("https://cdn/r.png"));
            }
            other => panic!("unexpected command {:?}", other),
        }
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "ragamaya",
            "route",
            "/quiz",
            "--format",
            "json",
            "--base-api",
            "http://localhost:8080",
        ])
        .unwrap();

        assert_eq!(cli.format, Some(OutputFormat::Json));
        assert_eq!(cli.base_api.as_deref(), Some("http://localhost:8080"));
    }

    #[test]
    fn test_quiz_delete_requires_uuid() {
        assert!(Cli::try_parse_from(["ragamaya", "quiz", "delete"]).is_err());
    }
}
