use axum::{
    extract::{Extension, Path},
    routing::get,
    Json, Router,
};

use crate::common::{Actor, AppResult, ClubId, EventId, UserId};
use crate::domains::analytics::actions;
use crate::domains::analytics::{ClubAnalytics, EventAnalytics, MemberAnalytics, SystemAnalytics};
use crate::server::app::AppState;

pub fn router() -> Router {
    Router::new()
        .route("/system-wide", get(system_wide))
        .route("/club/:club_id", get(club))
        .route("/event/:event_id", get(event))
        .route("/member/:user_id", get(member))
}

async fn system_wide(
    Extension(state): Extension<AppState>,
    actor: Actor,
) -> AppResult<Json<SystemAnalytics>> {
    Ok(Json(actions::system_analytics(&actor, &state.db_pool).await?))
}

async fn club(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(club_id): Path<ClubId>,
) -> AppResult<Json<ClubAnalytics>> {
    Ok(Json(
        actions::club_analytics(&actor, club_id, &state.db_pool).await?,
    ))
}

async fn event(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(event_id): Path<EventId>,
) -> AppResult<Json<EventAnalytics>> {
    Ok(Json(
        actions::event_analytics(&actor, event_id, &state.db_pool).await?,
    ))
}

async fn member(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<MemberAnalytics>> {
    Ok(Json(
        actions::member_analytics(&actor, user_id, &state.db_pool).await?,
    ))
}
