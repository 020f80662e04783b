use std::time::Duration;

use axum::{extract::Extension, http::StatusCode, Json};
use serde::Serialize;
use sqlx::PgPool;

use crate::server::app::AppState;

const DB_PING_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Serialize)]
pub struct HealthReport {
    pub status: &'static str,
    pub database: DatabaseCheck,
    pub pool: PoolStats,
}

#[derive(Debug, Serialize)]
pub struct DatabaseCheck {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PoolStats {
    pub size: u32,
    pub idle: usize,
    pub max_connections: u32,
}

impl DatabaseCheck {
    async fn run(pool: &PgPool) -> Self {
        let ping = sqlx::query("SELECT 1").execute(pool);
        let error = match tokio::time::timeout(DB_PING_TIMEOUT, ping).await {
            Ok(Ok(_)) => None,
            Ok(Err(e)) => Some(format!("query failed: {}", e)),
            Err(_) => Some(format!("no answer within {}s", DB_PING_TIMEOUT.as_secs())),
        };
        let status = if error.is_none() { "ok" } else { "error" };
        Self { status, error }
    }

    fn is_ok(&self) -> bool {
        self.error.is_none()
    }
}

impl PoolStats {
    fn of(pool: &PgPool) -> Self {
        Self {
            size: pool.size(),
            idle: pool.num_idle(),
            max_connections: pool.options().get_max_connections(),
        }
    }
}

/// `GET /health`: 200 when the database answers, 503 otherwise. Not rate limited.
pub async fn health_handler(
    Extension(state): Extension<AppState>,
) -> (StatusCode, Json<HealthReport>) {
    let database = DatabaseCheck::run(&state.db_pool).await;
    let (code, status) = if database.is_ok() {
        (StatusCode::OK, "healthy")
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, "unhealthy")
    };

    (
        code,
        Json(HealthReport {
            status,
            database,
            pool: PoolStats::of(&state.db_pool),
        }),
    )
}
