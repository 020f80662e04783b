use sqlx::PgPool;
use tracing::info;

use crate::common::{Actor, AnnouncementId, AppError, AppResult, Capability, ClubId, Pagination};
use crate::domains::announcements::models::{Announcement, AnnouncementWithAuthor};

/// Admins see every announcement; everyone else sees global ones plus
/// those of clubs they belong to.
pub async fn list_announcements(
    actor: &Actor,
    page: Pagination,
    pool: &PgPool,
) -> AppResult<Vec<AnnouncementWithAuthor>> {
    let announcements = if actor.is_admin() {
        Announcement::find_all(page, pool).await?
    } else {
        Announcement::find_visible_to(actor.user_id, page, pool).await?
    };
    Ok(announcements)
}

pub async fn list_club_announcements(
    actor: &Actor,
    club_id: ClubId,
    pool: &PgPool,
) -> AppResult<Vec<AnnouncementWithAuthor>> {
    actor.can(Capability::ViewClub(club_id)).check(pool).await?;
    Ok(Announcement::find_for_club(club_id, pool).await?)
}

/// Only the author or an admin may delete.
pub async fn delete_announcement(
    actor: &Actor,
    id: AnnouncementId,
    pool: &PgPool,
) -> AppResult<()> {
    let announcement = Announcement::find_by_id(id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Announcement not found"))?;

    if announcement.created_by != actor.user_id && !actor.is_admin() {
        return Err(AppError::forbidden(
            "Not authorized to delete this announcement",
        ));
    }

    Announcement::delete(id, pool).await?;
    info!(announcement_id = %id, "Announcement deleted");
    Ok(())
}
