//! Create (or find) an account and print a bearer token for it.
//!
//! There is no password login; operators use this to bootstrap the first
//! admin and to mint tokens for local testing.

use anyhow::{Context, Result};
use clap::Parser;
use clubhive_core::config::Config;
use clubhive_core::domains::auth::bootstrap::{ensure_user, issue_token};
use clubhive_core::domains::auth::JwtService;
use clubhive_core::domains::users::models::UserRole;
use sqlx::PgPool;

#[derive(Parser)]
#[command(name = "seed_admin")]
#[command(about = "Create a user (admin by default) and print a token for it")]
struct Cli {
    /// Email address of the account
    #[arg(long)]
    email: String,

    /// Display name used when the account is created
    #[arg(long, default_value = "Administrator")]
    name: String,

    /// Create a regular member instead of an admin
    #[arg(long)]
    member: bool,

    /// Skip running migrations before seeding
    #[arg(long)]
    skip_migrations: bool,
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Load config
    let config = Config::from_env()?;

    // Connect to database
    let pool = PgPool::connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    if !cli.skip_migrations {
        sqlx::migrate!("./migrations")
            .run(&pool)
            .await
            .context("Failed to run migrations")?;
    }

    let role = if cli.member {
        UserRole::Member
    } else {
        UserRole::Admin
    };

    let user = ensure_user(&cli.name, &cli.email, role, &pool).await?;

    let jwt = JwtService::new(&config.jwt_secret, config.jwt_issuer.clone());
    let token = issue_token(&jwt, &user)?;

    println!("User:  {} <{}> ({})", user.name, user.email, user.role);
    println!("Id:    {}", user.id);
    println!("Token: {}", token);

    Ok(())
}
