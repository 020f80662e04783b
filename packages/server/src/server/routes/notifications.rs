use axum::{
    extract::{Extension, Path, Query},
    routing::{delete, get, put},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::MessageResponse;
use crate::common::{Actor, AppResult, NotificationId, Pagination};
use crate::domains::notifications::actions;
use crate::domains::notifications::models::Notification;
use crate::server::app::AppState;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_notifications))
        .route("/unread-count", get(unread_count))
        .route("/mark-all-read", put(mark_all_read))
        .route("/:id/read", put(mark_read))
        .route("/:id", delete(delete_notification))
}

#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NotificationQuery {
    #[serde(default)]
    pub unread_only: bool,
    pub limit: Option<i64>,
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UnreadCountResponse {
    pub count: i64,
}

async fn list_notifications(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Query(query): Query<NotificationQuery>,
) -> AppResult<Json<Vec<Notification>>> {
    let page = Pagination {
        limit: query.limit,
        offset: query.offset,
    };
    Ok(Json(
        actions::list_notifications(&actor, query.unread_only, page, &state.db_pool).await?,
    ))
}

async fn unread_count(
    Extension(state): Extension<AppState>,
    actor: Actor,
) -> AppResult<Json<UnreadCountResponse>> {
    let count = actions::unread_count(&actor, &state.db_pool).await?;
    Ok(Json(UnreadCountResponse { count }))
}

async fn mark_read(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(id): Path<NotificationId>,
) -> AppResult<Json<Notification>> {
    Ok(Json(actions::mark_read(&actor, id, &state.db_pool).await?))
}

async fn mark_all_read(
    Extension(state): Extension<AppState>,
    actor: Actor,
) -> AppResult<Json<MessageResponse>> {
    let updated = actions::mark_all_read(&actor, &state.db_pool).await?;
    Ok(Json(MessageResponse::new(format!(
        "Marked {} notifications as read",
        updated
    ))))
}

async fn delete_notification(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(id): Path<NotificationId>,
) -> AppResult<Json<MessageResponse>> {
    actions::delete_notification(&actor, id, &state.db_pool).await?;
    Ok(Json(MessageResponse::new("Notification deleted")))
}
