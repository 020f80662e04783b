//! Application setup and server configuration.

use std::sync::Arc;

use anyhow::{Context, Result};
use axum::{
    extract::Extension,
    http::{
        header::{AUTHORIZATION, CONTENT_TYPE},
        HeaderValue, Method,
    },
    middleware,
    routing::get,
    Router,
};
use sqlx::PgPool;
use tower_governor::{
    governor::GovernorConfigBuilder, key_extractor::SmartIpKeyExtractor, GovernorLayer,
};
use tower_http::cors::{AllowOrigin, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::domains::auth::JwtService;
use crate::server::middleware::jwt_auth_middleware;
use crate::server::routes::{api_router, health_handler};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    pub db_pool: PgPool,
    pub jwt_service: Arc<JwtService>,
}

/// Build the Axum application router
///
/// `allowed_origins` empty means any origin is accepted. Rate limiting
/// keys on the client IP (forwarding headers first, then the peer address),
/// so the server must be run with connect info when it is enabled.
pub fn build_app(
    pool: PgPool,
    jwt_service: Arc<JwtService>,
    allowed_origins: &[String],
    rate_limit_enabled: bool,
) -> Result<Router> {
    let app_state = AppState {
        db_pool: pool,
        jwt_service: jwt_service.clone(),
    };

    let origins = if allowed_origins.is_empty() {
        AllowOrigin::any()
    } else {
        let parsed = allowed_origins
            .iter()
            .map(|o| HeaderValue::from_str(o).with_context(|| format!("invalid origin: {}", o)))
            .collect::<Result<Vec<_>>>()?;
        AllowOrigin::list(parsed)
    };

    let cors = CorsLayer::new()
        .allow_origin(origins)
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers([AUTHORIZATION, CONTENT_TYPE]);

    let mut api = api_router().layer(middleware::from_fn(move |req, next| {
        jwt_auth_middleware(jwt_service.clone(), req, next)
    })); // JWT authentication

    if rate_limit_enabled {
        // 10 requests per second per IP with bursts of 20
        let rate_limit_config = Arc::new(
            GovernorConfigBuilder::default()
                .key_extractor(SmartIpKeyExtractor)
                .per_second(10)
                .burst_size(20)
                .use_headers()
                .finish()
                .context("invalid rate limiter configuration")?,
        );
        api = api.layer(GovernorLayer {
            config: rate_limit_config,
        });
    }

    let app = Router::new()
        .nest("/api", api)
        // Health check (no rate limit)
        .route("/health", get(health_handler))
        // Middleware layers (applied in reverse order - last added runs first)
        .layer(Extension(app_state))
        .layer(cors)
        .layer(TraceLayer::new_for_http());

    Ok(app)
}
