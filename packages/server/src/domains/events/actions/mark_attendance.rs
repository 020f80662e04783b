//! Attendance reconciler.
//!
//! One call handles one (event, user) pair inside one transaction: the
//! roster row is locked, the points delta is applied with a single atomic
//! update, the new status is written and, on an award, the user is notified.

use serde::Serialize;
use sqlx::PgPool;
use tracing::{debug, info};

use crate::common::{Actor, AppError, AppResult, Capability, EventId, UserId};
use crate::domains::events::attendance::{AttendanceTransition, PointsEffect};
use crate::domains::events::models::{Event, Participation, ParticipationStatus};
use crate::domains::notifications::models::{Notification, NotificationTemplate};
use crate::domains::users::models::User;

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AttendanceOutcome {
    pub participation: Participation,
    pub previous_status: ParticipationStatus,
    pub points_delta: i32,
    /// Balance after the change; `None` when points were not touched.
    pub user_points: Option<i32>,
}

/// Set a participant's attendance status, awarding or revoking event points.
///
/// Checks run in this order: status validity, event existence, caller
/// permission (admin or approved board of the event's club), roster entry.
pub async fn mark_attendance(
    actor: &Actor,
    event_id: EventId,
    user_id: UserId,
    status: &str,
    pool: &PgPool,
) -> AppResult<AttendanceOutcome> {
    let next: ParticipationStatus = status.parse()?;

    let event = Event::find_by_id(event_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;

    actor
        .can(Capability::ManageClub(event.club_id))
        .check(pool)
        .await?;

    let mut tx = pool.begin().await?;

    let participation = Participation::find_for_update(event_id, user_id, &mut *tx)
        .await?
        .ok_or_else(|| AppError::not_found("Participation not found"))?;

    let previous = participation.status;
    let effect = AttendanceTransition::new(previous, next).points_effect(event.points);

    let user_points = match effect {
        PointsEffect::None => None,
        _ => Some(
            User::adjust_points(user_id, effect.delta(), &mut *tx)
                .await?
                .ok_or_else(|| AppError::not_found("User not found"))?,
        ),
    };

    let participation = Participation::set_status(participation.id, next, &mut *tx).await?;

    if effect.notifies() {
        let template = NotificationTemplate::points_awarded(&event);
        Notification::create(user_id, &template, &mut *tx).await?;
    }

    tx.commit().await?;

    match effect {
        PointsEffect::None => debug!(
            event_id = %event_id,
            user_id = %user_id,
            %previous,
            %next,
            "Attendance updated without points change"
        ),
        _ => info!(
            event_id = %event_id,
            user_id = %user_id,
            %previous,
            %next,
            delta = effect.delta(),
            balance = ?user_points,
            "Attendance updated"
        ),
    }

    Ok(AttendanceOutcome {
        participation,
        previous_status: previous,
        points_delta: effect.delta(),
        user_points,
    })
}
