use axum::{
    extract::{Extension, Path, Query},
    routing::{get, put},
    Json, Router,
};
use serde::Deserialize;

use crate::common::{Actor, AppResult, ClubId, Pagination, UserId};
use crate::domains::clubs::models::{Membership, MembershipWithClub};
use crate::domains::users::actions;
use crate::domains::users::models::{LeaderboardEntry, User};
use crate::server::app::AppState;
use crate::server::extract::JsonBody;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_users))
        .route("/:id/role", put(update_role))
        .route("/:id/memberships", get(memberships))
        .route("/:id/club-role", put(assign_club_role))
}

pub fn leaderboard_router() -> Router {
    Router::new().route("/", get(leaderboard))
}

#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: String,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubRoleRequest {
    pub club_id: ClubId,
    pub role: String,
}

async fn list_users(
    Extension(state): Extension<AppState>,
    actor: Actor,
) -> AppResult<Json<Vec<User>>> {
    Ok(Json(actions::list_users(&actor, &state.db_pool).await?))
}

async fn update_role(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(user_id): Path<UserId>,
    JsonBody(body): JsonBody<RoleRequest>,
) -> AppResult<Json<User>> {
    let user = actions::update_user_role(&actor, user_id, &body.role, &state.db_pool).await?;
    Ok(Json(user))
}

async fn memberships(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(user_id): Path<UserId>,
) -> AppResult<Json<Vec<MembershipWithClub>>> {
    Ok(Json(
        actions::user_memberships(&actor, user_id, &state.db_pool).await?,
    ))
}

async fn assign_club_role(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(user_id): Path<UserId>,
    JsonBody(body): JsonBody<ClubRoleRequest>,
) -> AppResult<Json<Membership>> {
    let membership =
        actions::assign_club_role(&actor, user_id, body.club_id, &body.role, &state.db_pool)
            .await?;
    Ok(Json(membership))
}

async fn leaderboard(
    Extension(state): Extension<AppState>,
    _actor: Actor,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<LeaderboardEntry>>> {
    Ok(Json(actions::leaderboard(page, &state.db_pool).await?))
}
