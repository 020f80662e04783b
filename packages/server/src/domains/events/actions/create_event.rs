use sqlx::PgPool;
use tracing::info;

use crate::common::{Actor, AppError, AppResult, Capability};
use crate::domains::announcements::models::Announcement;
use crate::domains::clubs::models::Club;
use crate::domains::events::models::{CreateEvent, Event, MAX_EVENT_POINTS};
use crate::domains::notifications::fanout::format_event_date;
use crate::domains::notifications::models::NotificationTemplate;
use crate::domains::notifications::{fan_out, Audience};

/// Body of the announcement posted alongside a new event.
pub fn event_announcement_content(event: &Event) -> String {
    let mut content = format!(
        "Join us for \"{}\" at {} on {}.",
        event.title,
        event.venue,
        format_event_date(event.date)
    );
    if let Some(description) = event.description.as_deref().filter(|d| !d.trim().is_empty()) {
        content.push(' ');
        content.push_str(description.trim());
    }
    content
}

/// Create an event for a club.
///
/// Alongside the event this posts a club announcement and notifies the
/// club's approved members. That is separate from the announcement fan-out
/// of `create_announcement`, which targets every membership row.
pub async fn create_event(
    actor: &Actor,
    input: CreateEvent,
    pool: &PgPool,
) -> AppResult<Event> {
    if input.title.trim().is_empty() || input.venue.trim().is_empty() {
        return Err(AppError::invalid("Title and venue are required"));
    }
    if !(0..=MAX_EVENT_POINTS).contains(&input.points) {
        return Err(AppError::invalid(format!(
            "Points must be between 0 and {}",
            MAX_EVENT_POINTS
        )));
    }

    Club::find_by_id(input.club_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Club not found"))?;
    actor
        .can(Capability::ManageClub(input.club_id))
        .check(pool)
        .await?;

    let mut tx = pool.begin().await?;

    let event = Event::create(&input, &mut *tx).await?;

    let title = format!("New Event: {}", event.title);
    let content = event_announcement_content(&event);
    let announcement = Announcement::create(
        &title,
        &content,
        Some(event.club_id),
        actor.user_id,
        &mut *tx,
    )
    .await?;

    let template = NotificationTemplate::announcement(announcement.id, &title, &content);
    let notified = fan_out(
        Audience::ApprovedClubMembers(event.club_id),
        &template,
        &mut *tx,
    )
    .await?;

    tx.commit().await?;

    info!(
        event_id = %event.id,
        club_id = %event.club_id,
        notified,
        "Event created"
    );

    Ok(event)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::common::{ClubId, EventId};
    use chrono::{TimeZone, Utc};

    fn event(description: Option<&str>) -> Event {
        Event {
            id: EventId::new(),
            club_id: ClubId::new(),
            title: "Robot Demo".into(),
            description: description.map(Into::into),
            venue: "Lab 3".into(),
            date: Utc.with_ymd_and_hms(2025, 4, 2, 14, 0, 0).unwrap(),
            points: 10,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        }
    }

    #[test]
    fn test_announcement_content_names_venue_and_date() {
        assert_eq!(
            event_announcement_content(&event(None)),
            "Join us for \"Robot Demo\" at Lab 3 on Apr 2, 2:00 PM."
        );
    }

    #[test]
    fn test_announcement_content_appends_description() {
        let content = event_announcement_content(&event(Some("  Bring a laptop. ")));
        assert!(content.ends_with("2:00 PM. Bring a laptop."));
        assert_eq!(
            event_announcement_content(&event(Some("   "))),
            event_announcement_content(&event(None))
        );
    }
}
