//! The caller's own notifications.
//!
//! Every query is scoped to `actor.user_id`; a notification belonging to
//! someone else is indistinguishable from one that does not exist.

use sqlx::PgPool;
use tracing::info;

use crate::common::{Actor, AppError, AppResult, NotificationId, Pagination};
use crate::domains::notifications::models::Notification;

pub async fn list_notifications(
    actor: &Actor,
    unread_only: bool,
    page: Pagination,
    pool: &PgPool,
) -> AppResult<Vec<Notification>> {
    Ok(Notification::find_for_user(actor.user_id, unread_only, page, pool).await?)
}

pub async fn unread_count(actor: &Actor, pool: &PgPool) -> AppResult<i64> {
    Ok(Notification::count_unread(actor.user_id, pool).await?)
}

pub async fn mark_read(
    actor: &Actor,
    id: NotificationId,
    pool: &PgPool,
) -> AppResult<Notification> {
    Notification::mark_read(id, actor.user_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Notification not found"))
}

pub async fn mark_all_read(actor: &Actor, pool: &PgPool) -> AppResult<u64> {
    let updated = Notification::mark_all_read(actor.user_id, pool).await?;
    info!(user_id = %actor.user_id, updated, "Marked all notifications read");
    Ok(updated)
}

pub async fn delete_notification(
    actor: &Actor,
    id: NotificationId,
    pool: &PgPool,
) -> AppResult<()> {
    if !Notification::delete(id, actor.user_id, pool).await? {
        return Err(AppError::not_found("Notification not found"));
    }
    Ok(())
}
