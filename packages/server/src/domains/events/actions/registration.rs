//! Self-service RSVP.
//!
//! Any signed-in user may register for any event; club membership is not
//! required. Unregistering is only allowed before attendance is marked.

use serde::Serialize;
use sqlx::PgPool;
use tracing::info;

use crate::common::{Actor, AppError, AppResult, EventId};
use crate::domains::events::models::{Event, Participation, ParticipationStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegistrationStatus {
    pub registered: bool,
    pub status: Option<ParticipationStatus>,
}

pub async fn register_for_event(
    actor: &Actor,
    event_id: EventId,
    pool: &PgPool,
) -> AppResult<Participation> {
    Event::find_by_id(event_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;

    let participation = Participation::register(event_id, actor.user_id, pool).await?;
    info!(event_id = %event_id, user_id = %actor.user_id, "Registered for event");
    Ok(participation)
}

pub async fn unregister_from_event(
    actor: &Actor,
    event_id: EventId,
    pool: &PgPool,
) -> AppResult<()> {
    let participation = Participation::find(event_id, actor.user_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Not registered for this event"))?;

    if participation.status != ParticipationStatus::Registered
        || !Participation::delete_if_registered(event_id, actor.user_id, pool).await?
    {
        return Err(AppError::invalid(
            "Cannot unregister after attendance has been marked",
        ));
    }

    info!(event_id = %event_id, user_id = %actor.user_id, "Unregistered from event");
    Ok(())
}

pub async fn my_registration(
    actor: &Actor,
    event_id: EventId,
    pool: &PgPool,
) -> AppResult<RegistrationStatus> {
    let participation = Participation::find(event_id, actor.user_id, pool).await?;
    Ok(RegistrationStatus {
        registered: participation.is_some(),
        status: participation.map(|p| p.status),
    })
}
