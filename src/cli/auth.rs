//! Sign-in, sign-out and identity commands

use std::sync::Arc;

use colored::Colorize;
use dialoguer::{Input, Password, theme::ColorfulTheme};
use log::debug;

use crate::cli::args::GlobalOptions;
use crate::cli::context::routes;
use crate::cli::{CommandContext, OutputFormat};
use crate::client::AuthApi;
use crate::client::models::LoginRequest;
use crate::error::{Error, Result};
use crate::models::IdentityDisplay;
use crate::output::{Formattable, json, table};
use crate::session::{FileSessionStore, Identity, Session};

/// Run the login command
pub async fn login(
    opts: &GlobalOptions,
    username: Option<String>,
    password: Option<String>,
) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::LOGIN)?;

    let username = match username {
        Some(u) => u,
        None => Input::<String>::with_theme(&ColorfulTheme::default())
            .with_prompt("Username")
            .interact_text()?,
    };
    let password = match password {
        Some(p) => p,
        None => Password::with_theme(&ColorfulTheme::default())
            .with_prompt("Password")
            .interact()?,
    };

    let identity = sign_in(
        ctx.client.as_ref(),
        &ctx.session,
        LoginRequest { username, password },
    )
    .await?;

    match ctx.format {
        OutputFormat::Json => println!("{}", json::format_json(&identity)?),
        _ => println!(
            "{} Signed in as {}",
            "✓".green(),
            identity.display_name().bold()
        ),
    }
    Ok(())
}

/// Validate credentials, call the login endpoint and store the token
pub async fn sign_in<C: AuthApi + ?Sized>(
    client: &C,
    session: &Session,
    credentials: LoginRequest,
) -> Result<Identity> {
    credentials.validate()?;
    debug!("Signing in as {}", credentials.username);

    let token = client.login(&credentials).await?;
    session.sign_in(&token)
}

/// Run the logout command.
///
/// Clearing works even when the stored token is unreadable, so this does
/// not go through the guard.
pub fn logout(opts: &GlobalOptions) -> Result<()> {
    let session = Session::new(Arc::new(FileSessionStore::open_at(opts.session_ref())?));
    let had_token = session.token().is_some();
    let was_valid = session.is_valid();
    session.logout()?;

    if was_valid {
        println!("{} Signed out", "✓".green());
    } else if had_token {
        println!("{} Cleared an expired or unreadable session", "○".dimmed());
    } else {
        println!("{} No active session", "○".dimmed());
    }
    Ok(())
}

/// Run the whoami command
pub fn whoami(opts: &GlobalOptions) -> Result<()> {
    let ctx = CommandContext::new(opts)?;
    ctx.require_route(routes::DASHBOARD)?;

    let identity = ctx.session.identity();
    if identity.is_empty() {
        return Err(Error::NotSignedIn);
    }

    match ctx.format {
        OutputFormat::Pretty => {
            let display = IdentityDisplay::from(&identity);
            println!(
                "{}",
                table::format_details(&[
                    ("Name", display.name),
                    ("Email", display.email),
                    ("Role", display.role),
                    ("Seller", display.seller),
                    ("Expires", display.expires),
                ])
            );
        }
        OutputFormat::Table => vec![IdentityDisplay::from(&identity)].print(ctx.format)?,
        OutputFormat::Json => println!("{}", json::format_json(&identity)?),
    }
    Ok(())
}
