use sqlx::PgPool;
use tracing::info;

use crate::common::{Actor, AppError, AppResult, Capability, ClubId};
use crate::domains::announcements::models::{Announcement, AnnouncementWithAuthor};
use crate::domains::clubs::models::Club;
use crate::domains::notifications::models::NotificationTemplate;
use crate::domains::notifications::{fan_out, Audience};

/// Post an announcement and notify its audience.
///
/// Club announcements need an admin or an approved board member of the
/// club; global ones (`club_id = None`) need an admin. The announcement and
/// all of its notifications are committed together.
pub async fn create_announcement(
    actor: &Actor,
    title: &str,
    content: &str,
    club_id: Option<ClubId>,
    pool: &PgPool,
) -> AppResult<AnnouncementWithAuthor> {
    let title = title.trim();
    let content = content.trim();
    if title.is_empty() || content.is_empty() {
        return Err(AppError::invalid("Title and content are required"));
    }

    match club_id {
        Some(club_id) => {
            Club::find_by_id(club_id, pool)
                .await?
                .ok_or_else(|| AppError::not_found("Club not found"))?;
            actor.can(Capability::ManageClub(club_id)).check(pool).await?;
        }
        None => actor.can(Capability::Administer).check(pool).await?,
    }

    let mut tx = pool.begin().await?;

    let announcement =
        Announcement::create(title, content, club_id, actor.user_id, &mut *tx).await?;

    let template = NotificationTemplate::announcement(announcement.id, title, content);
    let notified = fan_out(Audience::for_announcement(club_id), &template, &mut *tx).await?;

    tx.commit().await?;

    info!(
        announcement_id = %announcement.id,
        club_id = ?club_id.map(|c| c.to_string()),
        notified,
        "Announcement created"
    );

    Announcement::find_with_author(announcement.id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Announcement not found"))
}
