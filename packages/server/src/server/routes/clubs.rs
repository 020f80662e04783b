use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{delete, get, post, put},
    Json, Router,
};
use serde::Deserialize;

use super::MessageResponse;
use crate::common::{Actor, AppResult, ClubId, UserId};
use crate::domains::clubs::actions::{self, ClubChanges};
use crate::domains::clubs::models::{Club, Membership, MembershipWithClub, MembershipWithUser};
use crate::server::app::AppState;
use crate::server::extract::JsonBody;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_clubs).post(create_club))
        .route("/my-clubs", get(my_clubs))
        .route("/:id", put(update_club).delete(delete_club))
        .route("/:id/join", post(join_club))
        .route("/:id/pending", get(pending_requests))
        .route("/:id/membership/:user_id", put(set_membership_status))
        .route("/:id/members", get(list_members))
        .route("/:id/members/:user_id", delete(remove_member))
        .route("/:id/members/:user_id/role", put(set_member_role))
}

#[derive(Debug, Deserialize)]
pub struct CreateClubRequest {
    pub name: String,
    pub description: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateClubRequest {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct StatusRequest {
    pub status: String,
}

#[derive(Debug, Deserialize)]
pub struct RoleRequest {
    pub role: String,
}

async fn list_clubs(
    Extension(state): Extension<AppState>,
    _actor: Actor,
) -> AppResult<Json<Vec<Club>>> {
    Ok(Json(actions::list_clubs(&state.db_pool).await?))
}

async fn create_club(
    Extension(state): Extension<AppState>,
    actor: Actor,
    JsonBody(body): JsonBody<CreateClubRequest>,
) -> AppResult<(StatusCode, Json<Club>)> {
    let club = actions::create_club(
        &actor,
        &body.name,
        body.description.as_deref(),
        &state.db_pool,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(club)))
}

async fn update_club(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(club_id): Path<ClubId>,
    JsonBody(body): JsonBody<UpdateClubRequest>,
) -> AppResult<Json<Club>> {
    let changes = ClubChanges {
        name: body.name,
        description: body.description,
        status: body.status,
    };
    Ok(Json(
        actions::update_club(&actor, club_id, changes, &state.db_pool).await?,
    ))
}

async fn delete_club(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(club_id): Path<ClubId>,
) -> AppResult<Json<MessageResponse>> {
    actions::delete_club(&actor, club_id, &state.db_pool).await?;
    Ok(Json(MessageResponse::new("Club deleted successfully")))
}

async fn my_clubs(
    Extension(state): Extension<AppState>,
    actor: Actor,
) -> AppResult<Json<Vec<MembershipWithClub>>> {
    Ok(Json(actions::my_clubs(&actor, &state.db_pool).await?))
}

async fn join_club(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(club_id): Path<ClubId>,
) -> AppResult<(StatusCode, Json<Membership>)> {
    let membership = actions::join_club(&actor, club_id, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(membership)))
}

async fn pending_requests(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(club_id): Path<ClubId>,
) -> AppResult<Json<Vec<MembershipWithUser>>> {
    Ok(Json(
        actions::pending_requests(&actor, club_id, &state.db_pool).await?,
    ))
}

async fn set_membership_status(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path((club_id, user_id)): Path<(ClubId, UserId)>,
    JsonBody(body): JsonBody<StatusRequest>,
) -> AppResult<Json<Membership>> {
    let membership =
        actions::set_membership_status(&actor, club_id, user_id, &body.status, &state.db_pool)
            .await?;
    Ok(Json(membership))
}

async fn list_members(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(club_id): Path<ClubId>,
) -> AppResult<Json<Vec<MembershipWithUser>>> {
    Ok(Json(
        actions::list_members(&actor, club_id, &state.db_pool).await?,
    ))
}

async fn set_member_role(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path((club_id, user_id)): Path<(ClubId, UserId)>,
    JsonBody(body): JsonBody<RoleRequest>,
) -> AppResult<Json<Membership>> {
    let membership =
        actions::set_member_role(&actor, club_id, user_id, &body.role, &state.db_pool).await?;
    Ok(Json(membership))
}

async fn remove_member(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path((club_id, user_id)): Path<(ClubId, UserId)>,
) -> AppResult<Json<MessageResponse>> {
    actions::remove_member(&actor, club_id, user_id, &state.db_pool).await?;
    Ok(Json(MessageResponse::new("Member removed successfully")))
}
