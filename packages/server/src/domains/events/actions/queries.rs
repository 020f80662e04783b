use sqlx::PgPool;

use crate::common::{Actor, AppError, AppResult, Capability, EventId};
use crate::domains::events::models::{Event, EventWithClub, ParticipantWithUser, Participation};

pub async fn list_events(pool: &PgPool) -> AppResult<Vec<EventWithClub>> {
    Ok(Event::find_all_with_club(pool).await?)
}

/// Event roster, for admins and the club's approved board.
pub async fn list_participants(
    actor: &Actor,
    event_id: EventId,
    pool: &PgPool,
) -> AppResult<Vec<ParticipantWithUser>> {
    let event = Event::find_by_id(event_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;

    actor
        .can(Capability::ManageClub(event.club_id))
        .check(pool)
        .await?;

    Ok(Participation::find_for_event_with_users(event_id, pool).await?)
}
