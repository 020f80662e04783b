//! Integration test context backed by a real Postgres.
//!
//! The first test to ask for a database starts a Postgres 16 container and
//! migrates it; every later test in the same binary connects to that one.
//! Nothing is truncated between tests, so fixtures use unique names.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::Router;
use clubhive_core::domains::auth::JwtService;
use clubhive_core::domains::users::models::User;
use clubhive_core::server::build_app;
use sqlx::postgres::PgPoolOptions;
use sqlx::PgPool;
use test_context::AsyncTestContext;
use testcontainers::runners::AsyncRunner;
use testcontainers::{ContainerAsync, ImageExt};
use testcontainers_modules::postgres::Postgres;
use tokio::sync::OnceCell;

pub const TEST_JWT_SECRET: &str = "integration-test-secret";
pub const TEST_JWT_ISSUER: &str = "clubhive-test";

/// A migrated database that lives as long as the test binary.
struct Database {
    url: String,
    _container: ContainerAsync<Postgres>,
}

static DATABASE: OnceCell<Database> = OnceCell::const_new();

async fn start_database() -> Result<Database> {
    // RUST_LOG=clubhive_core=debug cargo test -- --nocapture
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();

    let container = Postgres::default()
        .with_tag("16")
        .with_cmd(["-c", "max_connections=200"])
        .start()
        .await
        .context("Failed to start Postgres container")?;
    let url = format!(
        "postgresql://postgres:postgres@{}:{}/postgres",
        container.get_host().await?,
        container.get_host_port_ipv4(5432).await?
    );

    let pool = PgPool::connect(&url).await?;
    sqlx::migrate!("./migrations")
        .run(&pool)
        .await
        .context("Failed to run migrations")?;
    pool.close().await;

    Ok(Database {
        url,
        _container: container,
    })
}

async fn database_url() -> &'static str {
    let db = DATABASE
        .get_or_init(|| async {
            start_database()
                .await
                .expect("Failed to start test database")
        })
        .await;
    &db.url
}

/// Per-test context: its own pool on the shared database and a token signer.
///
/// ```ignore
/// #[test_context(TestHarness)]
/// #[tokio::test]
/// async fn my_test(ctx: &TestHarness) {
///     let admin = fixtures::admin(&ctx.db_pool).await;
/// }
/// ```
pub struct TestHarness {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
}

impl AsyncTestContext for TestHarness {
    async fn setup() -> Self {
        Self::new().await.expect("Failed to create test harness")
    }
}

impl TestHarness {
    pub async fn new() -> Result<Self> {
        let db_pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(database_url().await)
            .await
            .context("Failed to connect to test database")?;

        Ok(Self {
            db_pool,
            jwt_service: Arc::new(JwtService::new(
                TEST_JWT_SECRET,
                TEST_JWT_ISSUER.to_string(),
            )),
        })
    }

    /// The full HTTP application, any origin allowed, rate limiting off.
    pub fn app(&self) -> Router {
        build_app(self.db_pool.clone(), self.jwt_service.clone(), &[], false)
            .expect("Failed to build app")
    }

    pub fn token_for(&self, user: &User) -> String {
        self.jwt_service
            .create_token(user.id, user.role)
            .expect("Failed to create token")
    }
}
