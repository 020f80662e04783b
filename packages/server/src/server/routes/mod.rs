// HTTP routes
pub mod analytics;
pub mod announcements;
pub mod auth;
pub mod clubs;
pub mod events;
pub mod health;
pub mod notifications;
pub mod users;

pub use health::*;

use axum::Router;
use serde::Serialize;

/// Body of responses that only acknowledge an action.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// All `/api` routes.
pub fn api_router() -> Router {
    Router::new()
        .nest("/auth", auth::router())
        .nest("/users", users::router())
        .nest("/leaderboard", users::leaderboard_router())
        .nest("/clubs", clubs::router())
        .nest("/events", events::router())
        .nest("/announcements", announcements::router())
        .nest("/notifications", notifications::router())
        .nest("/analytics", analytics::router())
}
