//! Notification fan-out.
//!
//! A trigger (announcement, event creation, reminder, attendance) picks an
//! [`Audience`] and a [`NotificationTemplate`]; [`fan_out`] resolves the
//! audience to user ids and writes one row per recipient in a single
//! batched insert. Callers pass the connection of their own transaction so
//! the trigger row and its notifications commit or roll back together.

use anyhow::Result;
use chrono::{DateTime, Utc};
use sqlx::PgConnection;
use tracing::debug;

use super::models::{Notification, NotificationSubject, NotificationTemplate, NotificationType};
use crate::common::{AnnouncementId, ClubId, UserId};
use crate::domains::clubs::models::Membership;
use crate::domains::events::models::Event;
use crate::domains::users::models::User;

/// Maximum length of a notification body, in characters.
pub const MAX_CONTENT_CHARS: usize = 200;

/// Truncate to [`MAX_CONTENT_CHARS`] Unicode scalar values.
pub fn truncate_content(content: &str) -> String {
    match content.char_indices().nth(MAX_CONTENT_CHARS) {
        Some((idx, _)) => content[..idx].to_string(),
        None => content.to_string(),
    }
}

/// Display format for event dates in notification bodies, e.g. `Mar 7, 6:30 PM`.
pub fn format_event_date(date: DateTime<Utc>) -> String {
    date.format("%b %-d, %-I:%M %p").to_string()
}

/// Who receives a notification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Audience {
    /// Every membership row of the club, whatever its status.
    ClubMembers(ClubId),
    /// Approved members of the club only.
    ApprovedClubMembers(ClubId),
    /// Every user who is not a site admin.
    AllNonAdmins,
}

impl Audience {
    /// Audience of an explicit announcement: the club's members, or
    /// everyone but admins for a global announcement.
    pub fn for_announcement(club_id: Option<ClubId>) -> Self {
        match club_id {
            Some(club_id) => Self::ClubMembers(club_id),
            None => Self::AllNonAdmins,
        }
    }

    pub async fn resolve(&self, conn: &mut PgConnection) -> Result<Vec<UserId>> {
        match self {
            Self::ClubMembers(club_id) => Membership::user_ids_for_club(*club_id, conn).await,
            Self::ApprovedClubMembers(club_id) => {
                Membership::approved_user_ids_for_club(*club_id, conn).await
            }
            Self::AllNonAdmins => User::find_non_admin_ids(conn).await,
        }
    }
}

impl NotificationTemplate {
    pub fn announcement(id: AnnouncementId, title: &str, content: &str) -> Self {
        Self {
            kind: NotificationType::Announcement,
            title: title.to_string(),
            content: truncate_content(content),
            related_id: Some(id.into_uuid()),
            related_type: Some(NotificationSubject::Announcement),
        }
    }

    pub fn points_awarded(event: &Event) -> Self {
        Self {
            kind: NotificationType::PointsAwarded,
            title: "Points Awarded".to_string(),
            content: format!(
                "You earned {} points for attending \"{}\"!",
                event.points, event.title
            ),
            related_id: Some(event.id.into_uuid()),
            related_type: Some(NotificationSubject::Event),
        }
    }

    pub fn event_reminder(event: &Event) -> Self {
        Self {
            kind: NotificationType::EventReminder,
            title: "Event Reminder".to_string(),
            content: format!(
                "Reminder: \"{}\" is happening tomorrow at {}!",
                event.title,
                format_event_date(event.date)
            ),
            related_id: Some(event.id.into_uuid()),
            related_type: Some(NotificationSubject::Event),
        }
    }
}

/// Resolve `audience` and insert one notification per recipient.
///
/// Returns the number of rows written. A store failure fails the whole
/// batch; there is no per-recipient partial success.
pub async fn fan_out(
    audience: Audience,
    template: &NotificationTemplate,
    conn: &mut PgConnection,
) -> Result<u64> {
    let recipients = audience.resolve(&mut *conn).await?;
    let written = Notification::create_for_users(&recipients, template, &mut *conn).await?;

    debug!(
        audience = ?audience,
        kind = ?template.kind,
        recipients = recipients.len(),
        "Fanned out notifications"
    );

    Ok(written)
}
