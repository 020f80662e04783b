// Club Hive API server

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::{Context, Result};
use clubhive_core::domains::auth::JwtService;
use clubhive_core::kernel::start_scheduler;
use clubhive_core::{server::build_app, Config};
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use tokio_cron_scheduler::JobScheduler;
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "info,clubhive_core=debug,sqlx=warn".into());

    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

async fn connect_and_migrate(config: &Config) -> Result<PgPool> {
    let pool = PgPoolOptions::new()
        .max_connections(config.database_max_connections)
        .connect(&config.database_url)
        .await
        .context("Failed to connect to database")?;

    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;

    info!(
        max_connections = config.database_max_connections,
        "Database ready"
    );
    Ok(pool)
}

/// The returned scheduler must stay alive for jobs to keep firing.
async fn maybe_start_reminders(config: &Config, pool: &PgPool) -> Result<Option<JobScheduler>> {
    if !config.reminders_enabled {
        info!("Event reminders disabled");
        return Ok(None);
    }
    let scheduler = start_scheduler(pool.clone(), &config.reminder_cron)
        .await
        .context("Failed to start scheduler")?;
    Ok(Some(scheduler))
}

#[tokio::main]
async fn main() -> Result<()> {
    init_tracing();

    let config = Config::from_env().context("Failed to load configuration")?;
    let pool = connect_and_migrate(&config).await?;
    let _scheduler = maybe_start_reminders(&config, &pool).await?;

    let jwt_service = Arc::new(JwtService::new(
        &config.jwt_secret,
        config.jwt_issuer.clone(),
    ));
    let app = build_app(
        pool,
        jwt_service,
        &config.allowed_origins,
        config.rate_limit_enabled,
    )?;

    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    info!(%addr, rate_limit = config.rate_limit_enabled, "Club Hive API listening");

    // Connect info feeds the rate limiter's peer-address fallback.
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await
    .context("Server error")
}
