use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use uuid::Uuid;

use crate::common::{NotificationId, Pagination, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_type", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationType {
    Announcement,
    EventReminder,
    PointsAwarded,
}

/// What `related_id` points at.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "notification_subject", rename_all = "snake_case")]
#[serde(rename_all = "snake_case")]
pub enum NotificationSubject {
    Announcement,
    Event,
}

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Notification {
    pub id: NotificationId,
    pub user_id: UserId,
    #[sqlx(rename = "type")]
    #[serde(rename = "type")]
    pub kind: NotificationType,
    pub title: String,
    pub content: String,
    pub is_read: bool,
    pub related_id: Option<Uuid>,
    pub related_type: Option<NotificationSubject>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Everything about a notification except its recipient.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NotificationTemplate {
    pub kind: NotificationType,
    pub title: String,
    pub content: String,
    pub related_id: Option<Uuid>,
    pub related_type: Option<NotificationSubject>,
}

impl Notification {
    /// Insert one notification for one user.
    pub async fn create<'e>(
        user_id: UserId,
        template: &NotificationTemplate,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO notifications (id, user_id, type, title, content, related_id, related_type)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(NotificationId::new())
        .bind(user_id)
        .bind(template.kind)
        .bind(&template.title)
        .bind(&template.content)
        .bind(template.related_id)
        .bind(template.related_type)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Insert the same notification for many users in a single statement.
    ///
    /// Either every row lands or none does.
    pub async fn create_for_users<'e>(
        user_ids: &[UserId],
        template: &NotificationTemplate,
        executor: impl PgExecutor<'e>,
    ) -> Result<u64> {
        if user_ids.is_empty() {
            return Ok(0);
        }

        let ids: Vec<NotificationId> = user_ids.iter().map(|_| NotificationId::new()).collect();

        let result = sqlx::query(
            r#"
            INSERT INTO notifications (id, user_id, type, title, content, related_id, related_type)
            SELECT r.id, r.user_id, $3, $4, $5, $6, $7
            FROM UNNEST($1::uuid[], $2::uuid[]) AS r(id, user_id)
            "#,
        )
        .bind(&ids)
        .bind(user_ids)
        .bind(template.kind)
        .bind(&template.title)
        .bind(&template.content)
        .bind(template.related_id)
        .bind(template.related_type)
        .execute(executor)
        .await?;

        Ok(result.rows_affected())
    }

    /// Whether the user already has a notification of this type about `related_id`.
    pub async fn exists_for<'e>(
        user_id: UserId,
        kind: NotificationType,
        related_id: Uuid,
        executor: impl PgExecutor<'e>,
    ) -> Result<bool> {
        sqlx::query_scalar::<_, bool>(
            r#"
            SELECT EXISTS (
                SELECT 1 FROM notifications
                WHERE user_id = $1 AND type = $2 AND related_id = $3
            )
            "#,
        )
        .bind(user_id)
        .bind(kind)
        .bind(related_id)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Insert an event reminder unless one already exists for (user, event).
    ///
    /// Backed by a partial unique index, so two sweeps racing each other
    /// still produce a single row. Returns `None` when nothing was inserted.
    pub async fn create_reminder_if_absent<'e>(
        user_id: UserId,
        template: &NotificationTemplate,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<NotificationId>> {
        sqlx::query_scalar::<_, NotificationId>(
            r#"
            INSERT INTO notifications (id, user_id, type, title, content, related_id, related_type)
            VALUES ($1, $2, 'event_reminder', $3, $4, $5, $6)
            ON CONFLICT (user_id, related_id) WHERE type = 'event_reminder' DO NOTHING
            RETURNING id
            "#,
        )
        .bind(NotificationId::new())
        .bind(user_id)
        .bind(&template.title)
        .bind(&template.content)
        .bind(template.related_id)
        .bind(template.related_type)
        .fetch_optional(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_user(
        user_id: UserId,
        unread_only: bool,
        page: Pagination,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT * FROM notifications
            WHERE user_id = $1 AND ($2 = FALSE OR is_read = FALSE)
            ORDER BY created_at DESC, id DESC
            LIMIT $3 OFFSET $4
            "#,
        )
        .bind(user_id)
        .bind(unread_only)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_type_for_user(
        user_id: UserId,
        kind: NotificationType,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM notifications WHERE user_id = $1 AND type = $2 ORDER BY created_at ASC",
        )
        .bind(user_id)
        .bind(kind)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn count_unread(user_id: UserId, pool: &PgPool) -> Result<i64> {
        sqlx::query_scalar::<_, i64>(
            "SELECT COUNT(*) FROM notifications WHERE user_id = $1 AND is_read = FALSE",
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Mark one of the user's notifications read. `None` if it is not theirs.
    pub async fn mark_read(
        id: NotificationId,
        user_id: UserId,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE notifications SET is_read = TRUE, updated_at = NOW()
            WHERE id = $1 AND user_id = $2
            RETURNING *
            "#,
        )
        .bind(id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn mark_all_read(user_id: UserId, pool: &PgPool) -> Result<u64> {
        let result = sqlx::query(
            r#"
            UPDATE notifications SET is_read = TRUE, updated_at = NOW()
            WHERE user_id = $1 AND is_read = FALSE
            "#,
        )
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected())
    }

    pub async fn delete(id: NotificationId, user_id: UserId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM notifications WHERE id = $1 AND user_id = $2")
            .bind(id)
            .bind(user_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
