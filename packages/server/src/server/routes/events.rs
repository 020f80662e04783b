use axum::{
    extract::{Extension, Path},
    http::StatusCode,
    routing::{get, post, put},
    Json, Router,
};
use chrono::{DateTime, Utc};
use serde::Deserialize;

use super::MessageResponse;
use crate::common::{Actor, AppResult, ClubId, EventId, UserId};
use crate::domains::events::actions::{self, AttendanceOutcome, RegistrationStatus};
use crate::domains::events::models::{
    CreateEvent, Event, EventWithClub, ParticipantWithUser, Participation, DEFAULT_EVENT_POINTS,
};
use crate::server::app::AppState;
use crate::server::extract::JsonBody;

pub fn router() -> Router {
    Router::new()
        .route("/", get(list_events).post(create_event))
        .route("/:id/register", post(register).delete(unregister))
        .route("/:id/participants", get(participants))
        .route("/:id/my-registration", get(my_registration))
        .route("/:id/attendance", put(mark_attendance))
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateEventRequest {
    #[serde(alias = "ClubId")]
    pub club_id: ClubId,
    pub title: String,
    pub description: Option<String>,
    pub venue: String,
    pub date: DateTime<Utc>,
    pub points: Option<i32>,
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceRequest {
    pub user_id: UserId,
    pub status: String,
}

async fn list_events(
    Extension(state): Extension<AppState>,
    _actor: Actor,
) -> AppResult<Json<Vec<EventWithClub>>> {
    Ok(Json(actions::list_events(&state.db_pool).await?))
}

async fn create_event(
    Extension(state): Extension<AppState>,
    actor: Actor,
    JsonBody(body): JsonBody<CreateEventRequest>,
) -> AppResult<(StatusCode, Json<Event>)> {
    let input = CreateEvent {
        club_id: body.club_id,
        title: body.title,
        description: body.description,
        venue: body.venue,
        date: body.date,
        points: body.points.unwrap_or(DEFAULT_EVENT_POINTS),
    };
    let event = actions::create_event(&actor, input, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(event)))
}

async fn register(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(event_id): Path<EventId>,
) -> AppResult<(StatusCode, Json<Participation>)> {
    let participation = actions::register_for_event(&actor, event_id, &state.db_pool).await?;
    Ok((StatusCode::CREATED, Json(participation)))
}

async fn unregister(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(event_id): Path<EventId>,
) -> AppResult<Json<MessageResponse>> {
    actions::unregister_from_event(&actor, event_id, &state.db_pool).await?;
    Ok(Json(MessageResponse::new("Unregistered successfully")))
}

async fn participants(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(event_id): Path<EventId>,
) -> AppResult<Json<Vec<ParticipantWithUser>>> {
    Ok(Json(
        actions::list_participants(&actor, event_id, &state.db_pool).await?,
    ))
}

async fn my_registration(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(event_id): Path<EventId>,
) -> AppResult<Json<RegistrationStatus>> {
    Ok(Json(
        actions::my_registration(&actor, event_id, &state.db_pool).await?,
    ))
}

async fn mark_attendance(
    Extension(state): Extension<AppState>,
    actor: Actor,
    Path(event_id): Path<EventId>,
    JsonBody(body): JsonBody<AttendanceRequest>,
) -> AppResult<Json<AttendanceOutcome>> {
    let outcome = actions::mark_attendance(
        &actor,
        event_id,
        body.user_id,
        &body.status,
        &state.db_pool,
    )
    .await?;
    Ok(Json(outcome))
}
