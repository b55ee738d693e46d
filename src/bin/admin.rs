//! Operator CLI for linkis.
//!
//! Provisions creator accounts, manages their billing state and API tokens,
//! and runs a few database diagnostics without going through the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # Create an account on a 14-day trial
//! cargo run --bin admin -- user create --username ana --email ana@example.com
//!
//! # Mark an account as paying
//! cargo run --bin admin -- user subscription ana active
//!
//! # Issue an API token for an account
//! cargo run --bin admin -- token create --username ana
//!
//! # Revoke a token
//! cargo run --bin admin -- token revoke 3
//!
//! # Totals
//! cargo run --bin admin -- stats
//! ```
//!
//! # Environment Variables
//!
//! - `DATABASE_URL` (required): PostgreSQL connection string
//! - `TOKEN_SIGNING_SECRET` (required for `token create`): must match the server

use linkis::domain::entities::{NewUser, SubscriptionStatus};
use linkis::domain::repositories::{TokenRepository, UserRepository};
use linkis::infrastructure::persistence::{PgTokenRepository, PgUserRepository};
use linkis::utils::token::{generate_token, hash_token};
use linkis::utils::username::{normalize_username, validate_username};

use anyhow::{Context, Result};
use chrono::{Duration, Utc};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::{Confirm, Input};
use sqlx::PgPool;
use std::sync::Arc;

/// Default trial length for new accounts.
const DEFAULT_TRIAL_DAYS: i64 = 14;

/// CLI tool for operating linkis.
#[derive(Parser)]
#[command(name = "admin")]
#[command(author, version, about, long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage creator accounts
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage API tokens
    Token {
        #[command(subcommand)]
        action: TokenAction,
    },

    /// Show statistics
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// Create an account
    Create {
        #[arg(short, long)]
        username: Option<String>,

        #[arg(short, long)]
        email: Option<String>,

        #[arg(long)]
        display_name: Option<String>,

        /// Trial length in days; 0 creates a paid account
        #[arg(long, default_value_t = DEFAULT_TRIAL_DAYS)]
        trial_days: i64,
    },

    /// List all accounts
    List,

    /// Set the billing state of an account
    Subscription {
        username: String,

        /// trial, active, cancelled or expired
        status: SubscriptionStatus,

        /// Trial length from now, only used with `trial`
        #[arg(long, default_value_t = DEFAULT_TRIAL_DAYS)]
        trial_days: i64,
    },
}

#[derive(Subcommand)]
enum TokenAction {
    /// Create a new API token for an account
    Create {
        /// Owner of the token
        #[arg(short, long)]
        username: String,

        /// Token name (e.g., "Phone", "Laptop")
        #[arg(short, long)]
        name: Option<String>,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },

    /// List tokens, optionally for one account
    List {
        #[arg(short, long)]
        username: Option<String>,
    },

    /// Revoke a token by id
    Revoke { id: i64 },
}

#[derive(Subcommand)]
enum DbAction {
    /// Check database connection
    Check,

    /// Show database info
    Info,
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    let cli = Cli::parse();

    let database_url = std::env::var("DATABASE_URL").context("DATABASE_URL must be set")?;

    let pool = PgPool::connect(&database_url)
        .await
        .context("Failed to connect to database")?;
    let pool = Arc::new(pool);

    match cli.command {
        Commands::User { action } => handle_user_action(action, pool).await?,
        Commands::Token { action } => handle_token_action(action, pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

async fn handle_user_action(action: UserAction, pool: Arc<PgPool>) -> Result<()> {
    let users = PgUserRepository::new(pool);

    match action {
        UserAction::Create {
            username,
            email,
            display_name,
            trial_days,
        } => create_user(&users, username, email, display_name, trial_days).await,
        UserAction::List => list_users(&users).await,
        UserAction::Subscription {
            username,
            status,
            trial_days,
        } => set_subscription(&users, &username, status, trial_days).await,
    }
}

/// Creates an account, prompting for missing fields.
///
/// With `trial_days > 0` the account starts in `trial`, otherwise `active`.
async fn create_user(
    users: &PgUserRepository,
    username: Option<String>,
    email: Option<String>,
    display_name: Option<String>,
    trial_days: i64,
) -> Result<()> {
    println!("{}", "👤 Create Account".bright_blue().bold());
    println!();

    let username = match username {
        Some(u) => u,
        None => Input::new().with_prompt("Username").interact_text()?,
    };
    let username = normalize_username(&username);
    validate_username(&username).map_err(|e| anyhow::anyhow!("{}", e))?;

    let email: String = match email {
        Some(e) => e,
        None => Input::new().with_prompt("Email").interact_text()?,
    };

    let (status, trial_ends_at) = if trial_days > 0 {
        (
            SubscriptionStatus::Trial,
            Some(Utc::now() + Duration::days(trial_days)),
        )
    } else {
        (SubscriptionStatus::Active, None)
    };

    let user = users
        .create(NewUser {
            username,
            email: email.trim().to_string(),
            display_name,
            subscription_status: status,
            trial_ends_at,
        })
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create account: {}", e))?;

    println!("{}", "✅ Account created".green().bold());
    println!("  ID:       {}", user.id.to_string().bright_black());
    println!("  Page:     /{}", user.username.cyan());
    println!("  Status:   {}", status_label(user.subscription_status));
    if let Some(ends) = user.trial_ends_at {
        println!("  Trial to: {}", ends.format("%Y-%m-%d %H:%M UTC"));
    }
    println!();
    println!(
        "  Issue a token with: {} admin -- token create --username {}",
        "cargo run --bin".bright_cyan(),
        user.username
    );
    println!();

    Ok(())
}

async fn list_users(users: &PgUserRepository) -> Result<()> {
    println!("{}", "📋 Accounts".bright_blue().bold());
    println!();

    let all = users
        .list()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list accounts: {}", e))?;

    if all.is_empty() {
        println!("{}", "  No accounts found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<30} {:<12} {:<20}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Status".bright_white().bold(),
        "Trial ends".bright_white().bold()
    );
    println!("  {}", "─".repeat(70).bright_black());

    for user in &all {
        let trial_ends = user
            .trial_ends_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "-".to_string());

        println!(
            "  {:<5} {:<30} {:<12} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            status_label(user.subscription_status),
            trial_ends.bright_black()
        );
    }

    println!();
    println!("  Total: {}", all.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn set_subscription(
    users: &PgUserRepository,
    username: &str,
    status: SubscriptionStatus,
    trial_days: i64,
) -> Result<()> {
    let user = users
        .find_by_username(username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Account not found")?;

    let trial_ends_at = match status {
        SubscriptionStatus::Trial => Some(Utc::now() + Duration::days(trial_days)),
        _ => user.trial_ends_at,
    };

    let updated = users
        .set_subscription(user.id, status, trial_ends_at)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to update subscription: {}", e))?;

    println!(
        "{} {} is now {}",
        "✅".green(),
        updated.username.cyan(),
        status_label(updated.subscription_status)
    );

    Ok(())
}

fn status_label(status: SubscriptionStatus) -> ColoredString {
    match status {
        SubscriptionStatus::Active => "active".green(),
        SubscriptionStatus::Trial => "trial".yellow(),
        SubscriptionStatus::Cancelled => "cancelled".red(),
        SubscriptionStatus::Expired => "expired".red(),
    }
}

async fn handle_token_action(action: TokenAction, pool: Arc<PgPool>) -> Result<()> {
    let users = PgUserRepository::new(pool.clone());
    let tokens = PgTokenRepository::new(pool);

    match action {
        TokenAction::Create {
            username,
            name,
            yes,
        } => create_token(&users, &tokens, &username, name, yes).await,
        TokenAction::List { username } => list_tokens(&users, &tokens, username).await,
        TokenAction::Revoke { id } => revoke_token(&tokens, id).await,
    }
}

/// Issues a token for an account.
///
/// Only the HMAC of the token is stored; the raw value is printed once.
async fn create_token(
    users: &PgUserRepository,
    tokens: &PgTokenRepository,
    username: &str,
    name: Option<String>,
    skip_confirm: bool,
) -> Result<()> {
    println!("{}", "🔑 Create API Token".bright_blue().bold());
    println!();

    let secret =
        std::env::var("TOKEN_SIGNING_SECRET").context("TOKEN_SIGNING_SECRET must be set")?;

    let user = users
        .find_by_username(username)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Account not found")?;

    let token_name = match name {
        Some(n) => n,
        None => Input::new()
            .with_prompt("Token name")
            .with_initial_text("Editor")
            .interact_text()?,
    };

    if !skip_confirm {
        let confirmed = Confirm::new()
            .with_prompt(format!("Create token '{}' for @{}?", token_name, user.username))
            .default(true)
            .interact()?;

        if !confirmed {
            println!("{}", "❌ Cancelled".red());
            return Ok(());
        }
    }

    let token_value = generate_token();
    tokens
        .create_token(user.id, &token_name, &hash_token(&secret, &token_value))
        .await
        .map_err(|e| anyhow::anyhow!("Failed to create token: {}", e))?;

    println!();
    println!("{}", "✅ Token created".green().bold());
    println!("  Token: {}", token_value.bright_yellow().bold());
    println!();
    println!(
        "{}",
        "⚠️  Save this token now, it cannot be shown again."
            .red()
            .bold()
    );
    println!();
    println!(
        "  curl -H \"Authorization: Bearer {}\" http://localhost:3000/api/links",
        token_value.bright_yellow()
    );
    println!();

    Ok(())
}

async fn list_tokens(
    users: &PgUserRepository,
    tokens: &PgTokenRepository,
    username: Option<String>,
) -> Result<()> {
    println!("{}", "📋 API Tokens".bright_blue().bold());
    println!();

    let user_id = match username {
        Some(u) => Some(
            users
                .find_by_username(&u)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("Account not found")?
                .id,
        ),
        None => None,
    };

    let all = tokens
        .list_tokens(user_id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list tokens: {}", e))?;

    if all.is_empty() {
        println!("{}", "  No tokens found".yellow());
        return Ok(());
    }

    println!(
        "  {:<5} {:<8} {:<25} {:<18} {:<18} {:<8}",
        "ID".bright_white().bold(),
        "User".bright_white().bold(),
        "Name".bright_white().bold(),
        "Created".bright_white().bold(),
        "Last used".bright_white().bold(),
        "Status".bright_white().bold()
    );
    println!("  {}", "─".repeat(88).bright_black());

    for token in &all {
        let status = if token.revoked_at.is_some() {
            "REVOKED".red()
        } else {
            "ACTIVE".green()
        };
        let last_used = token
            .last_used_at
            .map(|t| t.format("%Y-%m-%d %H:%M").to_string())
            .unwrap_or_else(|| "never".to_string());

        println!(
            "  {:<5} {:<8} {:<25} {:<18} {:<18} {}",
            token.id.to_string().bright_black(),
            token.user_id.to_string().bright_black(),
            token.name.cyan(),
            token.created_at.format("%Y-%m-%d %H:%M").to_string(),
            last_used.bright_black(),
            status
        );
    }

    println!();
    println!("  Total: {}", all.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

async fn revoke_token(tokens: &PgTokenRepository, id: i64) -> Result<()> {
    println!("{}", "🔒 Revoke API Token".bright_blue().bold());
    println!();

    let token = tokens
        .find_by_id(id)
        .await
        .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
        .context("Token not found")?;

    if token.revoked_at.is_some() {
        println!("{}", "⚠️  This token is already revoked".yellow());
        return Ok(());
    }

    println!("  Token: {}", token.name.cyan());
    println!("  User:  {}", token.user_id.to_string().bright_black());
    println!();

    let confirmed = Confirm::new()
        .with_prompt("Revoke this token?")
        .default(false)
        .interact()?;

    if !confirmed {
        println!("{}", "❌ Cancelled".red());
        return Ok(());
    }

    tokens
        .revoke_token(token.id)
        .await
        .map_err(|e| anyhow::anyhow!("Failed to revoke token: {}", e))?;

    println!("{}", "✅ Token revoked".green().bold());
    println!();

    Ok(())
}

async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    let users_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM users")
        .fetch_one(pool)
        .await?;

    let live_count: i64 = sqlx::query_scalar(
        "SELECT COUNT(*) FROM users
         WHERE subscription_status = 'active'
            OR (subscription_status = 'trial' AND trial_ends_at > NOW())",
    )
    .fetch_one(pool)
    .await?;

    let links_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM links")
        .fetch_one(pool)
        .await?;

    let clicks_count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM link_clicks")
        .fetch_one(pool)
        .await?;

    println!(
        "  Accounts:   {}",
        users_count.to_string().bright_green().bold()
    );
    println!(
        "  Live pages: {}",
        live_count.to_string().bright_green().bold()
    );
    println!(
        "  Links:      {}",
        links_count.to_string().bright_green().bold()
    );
    println!(
        "  Clicks:     {}",
        clicks_count.to_string().bright_green().bold()
    );
    println!();

    Ok(())
}

async fn handle_db_action(action: DbAction, pool: &PgPool) -> Result<()> {
    match action {
        DbAction::Check => {
            println!("{}", "🔍 Checking database connection...".bright_blue());

            sqlx::query("SELECT 1").fetch_one(pool).await?;

            println!("{}", "✅ Database connection OK".green().bold());
        }
        DbAction::Info => {
            println!("{}", "ℹ️  Database Information".bright_blue().bold());
            println!();

            let version: String = sqlx::query_scalar("SELECT version()")
                .fetch_one(pool)
                .await?;

            let migrations: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM _sqlx_migrations")
                .fetch_one(pool)
                .await?;

            println!("  PostgreSQL: {}", version.bright_white());
            println!("  Migrations: {}", migrations.to_string().bright_white());
            println!();
        }
    }

    Ok(())
}
