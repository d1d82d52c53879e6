//! CLI administration tool for shortlink.
//!
//! Provides session and account maintenance without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Delete sessions past their expiry
//! cargo run --bin admin -- sessions purge
//!
//! # Log an account out everywhere
//! cargo run --bin admin -- sessions revoke alice
//!
//! # List accounts
//! cargo run --bin admin -- users list
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `shortlink::config`. Only the database settings matter here.

use shortlink::config;
use shortlink::domain::entities::normalize_username;
use shortlink::domain::repositories::{AccountRepository, SessionRepository};
use shortlink::infrastructure::persistence::{PgAccountRepository, PgSessionRepository};
use shortlink::server::connect_pool;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing shortlink.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

/// Top-level command groups.
#[derive(Subcommand)]
enum Commands {
    /// Manage login sessions
    Sessions {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Inspect accounts
    Users {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Delete every expired session
    Purge {
        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// Delete every session of one account
    Revoke {
        /// Username (any letter case)
        username: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all accounts
    List,
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let config = config::load_from_env()?;
    let pool = connect_pool(&config).await?;

    let result = match cli.command {
        Commands::Sessions { action } => handle_session_action(action, &pool).await,
        Commands::Users { action } => handle_user_action(action, &pool).await,
        Commands::Db { action } => handle_db_action(action, &pool).await,
    };

    pool.close().await;
    result
}

async fn handle_session_action(action: SessionAction, pool: &PgPool) -> Result<()> {
    let pool = Arc::new(pool.clone());
    let sessions = PgSessionRepository::new(pool.clone());

    match action {
        SessionAction::Purge { yes } => purge_sessions(&sessions, yes).await,
        SessionAction::Revoke { username, yes } => {
            let accounts = PgAccountRepository::new(pool);
            revoke_sessions(&accounts, &sessions, &username, yes).await
        }
    }
}

/// Deletes sessions whose expiry has passed.
///
/// Expired rows are already rejected by the server; this only reclaims space.
async fn purge_sessions(sessions: &PgSessionRepository, skip_confirm: bool) -> Result<()> {
    println!("{}", "Purge expired sessions".bright_blue().bold());
    println!();

    if !confirm("Delete all expired sessions?", true, skip_confirm)? {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    let deleted = sessions
        .delete_expired(Utc::now())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to purge sessions: {}", e))?;

    println!(
        "{} {} expired session(s) deleted",
        "Done:".green().bold(),
        deleted.to_string().bright_white().bold()
    );

    Ok(())
}

/// Logs an account out of every device.
async fn revoke_sessions(
    accounts: &PgAccountRepository,
    sessions: &PgSessionRepository,
    username: &str,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "Revoke sessions".bright_blue().bold());
    println!();

    let username = normalize_username(username);

    let account = accounts
        .find_by_username(&username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .with_context(|| format!("Account '{username}' not found"))?;

    println!("  Account: {}", account.username.cyan());
    println!("  ID:      {}", account.id.to_string().bright_black());
    println!();

    if !confirm("Revoke all sessions of this account?", false, skip_confirm)? {
        println!("{}", "Cancelled".red());
        return Ok(());
    }

    let deleted = sessions
        .delete_for_user(account.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke sessions: {}", e))?;

    println!(
        "{} {} session(s) revoked",
        "Done:".green().bold(),
        deleted.to_string().bright_white().bold()
    );

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: &PgPool) -> Result<()> {
    match action {
        UserAction::List => list_users(&PgAccountRepository::new(Arc::new(pool.clone()))).await,
    }
}

/// Lists accounts. Password records are never printed.
///
/// # Output Format
///
/// ```text
///   ID    Username             Name                           Created
///   ---------------------------------------------------------------------------
///   1     alice                Alice Liddell                  2026-01-15 10:30
/// ```
async fn list_users(accounts: &PgAccountRepository) -> Result<()> {
    println!("{}", "Accounts".bright_blue().bold());
    println!();

    let users = accounts
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No accounts found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<20} {:<30} {}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold()
    );
    println!("  {}", "-".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<20} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.name,
            user.created_at
                .format("%Y-%m-%d %H:%M")
                .to_string()
                .bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            print!("Checking database connection... ");

            PgAccountRepository::new(Arc::new(pool.clone()))
                .check_connection()
                .await
                .map_err(|e| anyhow::anyhow!("Database check failed: {}", e))?;

            println!("{}", "OK".green().bold());
        }
    }

    Ok(())
}

fn confirm(prompt: &str, default: bool, skip: bool) -> Result<bool> {
    if skip {
        return Ok(true);
    }

    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}
