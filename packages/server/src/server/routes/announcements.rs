use axum::{
    extract::{Extension, Path, Query},
    http::StatusCode,
    routing::{delete, get},
    Json, Router,
};
use serde::Deserialize;

use super::MessageResponse;
use crate::common::{Actor, AnnouncementId, AppResult, ClubId, Pagination};
use crate::domains::announcements::actions;
use crate::domains::announcements::models::AnnouncementWithAuthor;
use crate::server::app::AppState;
use crate::server::extract::JsonBody;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_announcements).post(create_announcement))
        .route("/club/:club_id", get(club_announcements))
        .route("/:id", delete(delete_announcement))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateAnnouncementRequest {
    #[serde(default)]
    pub title: String,
    #[serde(default)]
    pub content: String,
    pub club_id: Option<ClubId>,
}

async fn create_announcement(
    Extension(state): Extension<AppState>,
    actor: Actor,
    JsonBody(body): JsonBody<CreateAnnouncementRequest>,
) -> AppResult<(StatusCode, Json<AnnouncementWithAuthor>)> {
    let announcement = actions::create_announcement(
        &actor,
        &body.title,
        &body.content,
        body.club_id,
        &state.db_pool,
    )
    .await?;
    Ok((StatusCode::CREATED, Json(announcement)))
}

async fn list_announcements(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Query(page): Query<Pagination>,
) -> AppResult<Json<Vec<AnnouncementWithAuthor>>> {
    Ok(Json(
        actions::list_announcements(&actor, page, &state.db_pool).await?,
    ))
}

async fn club_announcements(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(club_id): Path<ClubId>,
) -> AppResult<Json<Vec<AnnouncementWithAuthor>>> {
    Ok(Json(
        actions::list_club_announcements(&actor, club_id, &state.db_pool).await?,
    ))
}

async fn delete_announcement(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(id): Path<AnnouncementId>,
) -> AppResult<Json<MessageResponse>> {
    actions::delete_announcement(&actor, id, &state.db_pool).await?;
    Ok(Json(MessageResponse::new("Announcement deleted successfully")))
}
