//! RagaMaya admin CLI - the admin dashboard's session guard and API client
//! driven from the terminal

use clap::Parser;
use log::LevelFilter;

mod cli;
mod client;
mod config;
mod error;
mod guard;
mod models;
mod output;
mod session;

use cli::args::GlobalOptions;
use cli::{
    ArticleCommands, Cli, Commands, ConfigCommands, PayoutCommands, QuizCommands,
    payout::RespondArgs,
};
use error::Result;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_logging(cli.debug);

    if let Err(err) = run(cli).await {
        eprintln!("Error: {}", err);
        std::process::exit(1);
    }
}

/// `--debug` forces debug output; otherwise `RUST_LOG`, defaulting to warn
fn init_logging(debug: bool) {
    let mut builder = env_logger::Builder::from_env(
        env_logger::Env::default().default_filter_or("warn"),
    );
    if debug {
        builder.filter_level(LevelFilter::Debug);
    }
    builder.format_timestamp(None).init();
}

async fn run(cli: Cli) -> Result<()> {
    let opts = GlobalOptions::from_cli(&cli);

    match cli.command {
        Commands::Login { username, password } => cli::auth::login(&opts, username, password).await,
        Commands::Logout => cli::auth::logout(&opts),
        Commands::Status => cli::status::run(&opts),
        Commands::Whoami => cli::auth::whoami(&opts),
        Commands::Route { path } => cli::route::run(&opts, &path),
        Commands::Analytics => cli::analytics::run(&opts).await,
        Commands::Upload { file } => cli::upload::run(&opts, &file).await,
        Commands::Article(cmd) => match cmd {
            ArticleCommands::List { filters } => cli::article::list(&opts, &filters).await,
            ArticleCommands::Get { slug } => cli::article::get(&opts, &slug).await,
            ArticleCommands::Create { fields } => cli::article::create(&opts, &fields).await,
            ArticleCommands::Update { slug, fields } => {
                cli::article::update(&opts, &slug, &fields).await
            }
        },
        Commands::Quiz(cmd) => match cmd {
            QuizCommands::List { filters } => cli::quiz::list(&opts, &filters).await,
            QuizCommands::Get { slug } => cli::quiz::get(&opts, &slug).await,
            QuizCommands::Create { file } => cli::quiz::create(&opts, &file).await,
            QuizCommands::Update { slug, file } => cli::quiz::update(&opts, &slug, &file).await,
            QuizCommands::Delete { uuids, yes } => cli::quiz::delete(&opts, &uuids, yes).await,
        },
        Commands::Payout(cmd) => match cmd {
            PayoutCommands::List { filters } => cli::payout::list(&opts, &filters).await,
            PayoutCommands::Respond {
                uuid,
                status,
                note,
                receipt_url,
                receipt_file,
            } => {
                cli::payout::respond(
                    &opts,
                    RespondArgs {
                        uuid,
                        resolution: status,
                        note,
                        receipt_url,
                        receipt_file,
                    },
                )
                .await
            }
        },
        Commands::Api {
            path,
            method,
            data,
            override_patch,
        } => cli::api::run(&opts, &path, method, data.as_deref(), override_patch).await,
        Commands::Config(cmd) => match cmd {
            ConfigCommands::Show => cli::config::show(&opts),
            ConfigCommands::Set { key, value } => cli::config::set(&opts, key, &value),
        },
    }
}
