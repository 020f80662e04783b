use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{AnnouncementId, ClubId, Pagination, UserId};

/// A post to one club's members, or to everyone when `club_id` is `None`.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Announcement {
    pub id: AnnouncementId,
    pub title: String,
    pub content: String,
    pub club_id: Option<ClubId>,
    pub created_by: UserId,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Announcement joined with its author and (for club posts) the club name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AnnouncementWithAuthor {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub announcement: Announcement,
    pub author_name: String,
    pub author_email: String,
    pub club_name: Option<String>,
}

const WITH_AUTHOR: &str = r#"
    SELECT a.*, u.name AS author_name, u.email AS author_email, c.name AS club_name
    FROM announcements a
    INNER JOIN users u ON u.id = a.created_by
    LEFT JOIN clubs c ON c.id = a.club_id
"#;

impl Announcement {
    pub async fn create<'e>(
        title: &str,
        content: &str,
        club_id: Option<ClubId>,
        created_by: UserId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO announcements (id, title, content, club_id, created_by)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(AnnouncementId::new())
        .bind(title)
        .bind(content)
        .bind(club_id)
        .bind(created_by)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: AnnouncementId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM announcements WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_with_author(
        id: AnnouncementId,
        pool: &PgPool,
    ) -> Result<Option<AnnouncementWithAuthor>> {
        sqlx::query_as::<_, AnnouncementWithAuthor>(&format!("{} WHERE a.id = $1", WITH_AUTHOR))
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    /// Every announcement, newest first.
    pub async fn find_all(page: Pagination, pool: &PgPool) -> Result<Vec<AnnouncementWithAuthor>> {
        sqlx::query_as::<_, AnnouncementWithAuthor>(&format!(
            "{} ORDER BY a.created_at DESC LIMIT $1 OFFSET $2",
            WITH_AUTHOR
        ))
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Global announcements plus those of clubs the user has a membership row in.
    pub async fn find_visible_to(
        user_id: UserId,
        page: Pagination,
        pool: &PgPool,
    ) -> Result<Vec<AnnouncementWithAuthor>> {
        sqlx::query_as::<_, AnnouncementWithAuthor>(&format!(
            r#"{}
            WHERE a.club_id IS NULL
               OR a.club_id IN (SELECT club_id FROM memberships WHERE user_id = $1)
            ORDER BY a.created_at DESC
            LIMIT $2 OFFSET $3
            "#,
            WITH_AUTHOR
        ))
        .bind(user_id)
        .bind(page.limit())
        .bind(page.offset())
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_club(
        club_id: ClubId,
        pool: &PgPool,
    ) -> Result<Vec<AnnouncementWithAuthor>> {
        sqlx::query_as::<_, AnnouncementWithAuthor>(&format!(
            "{} WHERE a.club_id = $1 ORDER BY a.created_at DESC",
            WITH_AUTHOR
        ))
        .bind(club_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(id: AnnouncementId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM announcements WHERE id = $1")
            .bind(id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }
}
