//! CLI administration tool for resource-gateway.
//!
//! Provides commands for inspecting accounts, issuing tokens, dropping
//! cached sessions and performing database checks without going through
//! the HTTP API.
//!
//! # Usage
//!
//! ```bash
//! # List local accounts
//! cargo run --bin admin -- user list
//!
//! # Issue a bearer token for an existing account
//! cargo run --bin admin -- user token bret
//!
//! # Drop a cached session so the next request reloads the account
//! cargo run --bin admin -- session revoke bret
//!
//! # View row counts
//! cargo run --bin admin -- stats
//!
//! # Check database connection
//! cargo run --bin admin -- db check
//! ```
//!
//! # Environment Variables
//!
//! Same as the server; see `resource_gateway::config`.

use resource_gateway::application::services::AuthService;
use resource_gateway::config::{self, Config};
use resource_gateway::domain::repositories::UserRepository;
use resource_gateway::infrastructure::cache::{CacheService, RedisCache};
use resource_gateway::infrastructure::persistence::PgUserRepository;
use resource_gateway::server;
use resource_gateway::utils::jwt::JwtSigner;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use colored::*;
use dialoguer::Confirm;
use sqlx::PgPool;
use std::sync::Arc;

/// CLI tool for managing resource-gateway.
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
    /// Inspect accounts and issue tokens
    User {
        #[command(subcommand)]
        action: UserAction,
    },

    /// Manage cached sessions
    Session {
        #[command(subcommand)]
        action: SessionAction,
    },

    /// Show row counts
    Stats,

    /// Database operations
    Db {
        #[command(subcommand)]
        action: DbAction,
    },
}

#[derive(Subcommand)]
enum UserAction {
    /// List all local accounts
    List,

    /// Issue a bearer token for an account
    Token {
        /// Account username
        username: String,
    },
}

#[derive(Subcommand)]
enum SessionAction {
    /// Drop the cached principal of an account
    Revoke {
        /// Account username
        username: String,

        /// Skip confirmation prompt
        #[arg(short = 'y', long)]
        yes: bool,
    },
}

/// Database operation subcommands.
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

    let config = config::load_from_env()?;

    let pool = server::connect_pool(&config).await?;

    match cli.command {
        Commands::User { action } => handle_user_action(action, &config, &pool).await?,
        Commands::Session { action } => handle_session_action(action, &config, &pool).await?,
        Commands::Stats => handle_stats(&pool).await?,
        Commands::Db { action } => handle_db_action(action, &pool).await?,
    }

    Ok(())
}

fn auth_service(
    config: &Config,
    pool: &PgPool,
    cache: Arc<dyn CacheService>,
) -> AuthService<PgUserRepository> {
    let users = Arc::new(PgUserRepository::new(Arc::new(pool.clone())));
    let signer = JwtSigner::new(&config.jwt_secret, config.jwt_expires_in_seconds);
    AuthService::new(users, cache, signer)
}

/// Dispatches account commands.
async fn handle_user_action(action: UserAction, config: &Config, pool: &PgPool) -> Result<()> {
    let repo = PgUserRepository::new(Arc::new(pool.clone()));

    match action {
        UserAction::List => list_users(&repo).await,
        UserAction::Token { username } => {
            let user = repo
                .find_by_username(&username)
                .await
                .map_err(|e| anyhow::anyhow!("Database error: {}", e))?
                .context("User not found")?;

            let cache = server::connect_cache(config).await;
            let token = auth_service(config, pool, cache).create_token(&user.username);

            println!("{}", "🔑 Bearer Token".bright_blue().bold());
            println!();
            println!("  User:    {}", user.username.cyan());
            println!(
                "  Expires: in {}s",
                config.jwt_expires_in_seconds.to_string().bright_white()
            );
            println!("  Token:   {}", token.bright_yellow().bold());
            println!();
            println!("{}", "Example:".bright_white());
            println!(
                "  curl -H \"Authorization: Bearer {}\" http://{}/api/users/current",
                token.bright_yellow(),
                config.listen_addr
            );
            println!();
            Ok(())
        }
    }
}

/// Lists all accounts.
///
/// # Output Format
///
/// ```text
/// 📋 Users
///
///   ID    Username             Name                           Phone
///   ───────────────────────────────────────────────────────────────────────────
///   1     bret                 Leanne Graham                  1-770-736-8031
/// ```
async fn list_users(repo: &PgUserRepository) -> Result<()> {
    println!("{}", "📋 Users".bright_blue().bold());
    println!();

    let users = repo
        .list_all()
        .await
        .map_err(|e| anyhow::anyhow!("Failed to list users: {}", e))?;

    if users.is_empty() {
        println!("{}", "  No users found".yellow());
        println!();
        println!("  Register one with: {}", "POST /api/users".bright_cyan());
        return Ok(());
    }

    println!(
        "  {:<5} {:<20} {:<30} {:<20}",
        "ID".bright_white().bold(),
        "Username".bright_white().bold(),
        "Name".bright_white().bold(),
        "Phone".bright_white().bold()
    );
    println!("  {}", "─".repeat(75).bright_black());

    for user in &users {
        println!(
            "  {:<5} {:<20} {:<30} {}",
            user.id.to_string().bright_black(),
            user.username.cyan(),
            user.name,
            user.phone.bright_black()
        );
    }

    println!();
    println!("  Total: {}", users.len().to_string().bright_white().bold());
    println!();

    Ok(())
}

/// Dispatches session commands.
async fn handle_session_action(
    action: SessionAction,
    config: &Config,
    pool: &PgPool,
) -> Result<()> {
    match action {
        SessionAction::Revoke { username, yes } => {
            println!("{}", "🔒 Revoke Session".bright_blue().bold());
            println!();

            let Some(redis_url) = config.redis_url.as_deref() else {
                println!(
                    "{}",
                    "⚠️  Redis is not configured; sessions live in each server's memory and cannot be revoked from here."
                        .yellow()
                );
                return Ok(());
            };

            println!("  User: {}", username.cyan());
            println!();

            if !yes {
                let confirmed = Confirm::new()
                    .with_prompt("Drop the cached session?")
                    .default(false)
                    .interact()?;

                if !confirmed {
                    println!("{}", "❌ Cancelled".red());
                    return Ok(());
                }
            }

            let cache = RedisCache::connect(redis_url, config.cache_ttl_seconds)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to connect to Redis: {}", e))?;

            auth_service(config, pool, Arc::new(cache))
                .invalidate_session(&username)
                .await
                .map_err(|e| anyhow::anyhow!("Failed to revoke session: {}", e))?;

            println!();
            println!("{}", "✅ Session revoked".green().bold());
            println!();
        }
    }

    Ok(())
}

/// Displays row counts for every mirrored resource.
async fn handle_stats(pool: &PgPool) -> Result<()> {
    println!("{}", "📊 Statistics".bright_blue().bold());
    println!();

    for (label, table) in [
        ("Users", "users"),
        ("Todos", "todos"),
        ("Albums", "albums"),
        ("Photos", "photos"),
    ] {
        let count: i64 = sqlx::query_scalar(&format!("SELECT COUNT(*) FROM {table}"))
            .fetch_one(pool)
            .await?;

        println!(
            "  {:<8} {}",
            format!("{label}:"),
            count.to_string().bright_green().bold()
        );
    }
    println!();

    Ok(())
}

/// Handles database diagnostic commands.
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
