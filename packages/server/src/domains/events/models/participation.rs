use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use std::fmt;
use std::str::FromStr;

use crate::common::{AppError, EventId, ParticipationId, UserId};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "participation_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum ParticipationStatus {
    Registered,
    Absent,
    Attended,
}

impl ParticipationStatus {
    pub const ALL: [Self; 3] = [Self::Registered, Self::Absent, Self::Attended];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Registered => "registered",
            Self::Absent => "absent",
            Self::Attended => "attended",
        }
    }
}

impl fmt::Display for ParticipationStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ParticipationStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "registered" => Ok(Self::Registered),
            "absent" => Ok(Self::Absent),
            "attended" => Ok(Self::Attended),
            other => Err(AppError::invalid(format!(
                "Invalid status: {} (expected registered, absent or attended)",
                other
            ))),
        }
    }
}

/// A user's place on an event roster. Unique per (event, user).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Participation {
    pub id: ParticipationId,
    pub event_id: EventId,
    pub user_id: UserId,
    pub status: ParticipationStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Roster row joined with the participant's name, email and points.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub participation: Participation,
    pub user_name: String,
    pub user_email: String,
    pub user_points: i32,
}

impl Participation {
    pub async fn register(event_id: EventId, user_id: UserId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO participations (id, event_id, user_id, status)
            VALUES ($1, $2, $3, 'registered')
            RETURNING *
            "#,
        )
        .bind(ParticipationId::new())
        .bind(event_id)
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find(event_id: EventId, user_id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM participations WHERE event_id = $1 AND user_id = $2",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Read the roster row and lock it until the surrounding transaction ends.
    pub async fn find_for_update<'e>(
        event_id: EventId,
        user_id: UserId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM participations WHERE event_id = $1 AND user_id = $2 FOR UPDATE",
        )
        .bind(event_id)
        .bind(user_id)
        .fetch_optional(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn set_status<'e>(
        id: ParticipationId,
        status: ParticipationStatus,
        executor: impl PgExecutor<'e>,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            "UPDATE participations SET status = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(status)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    /// Remove a registration, but only while it is still `registered`.
    ///
    /// Returns false if the row is missing or has already been marked.
    pub async fn delete_if_registered(
        event_id: EventId,
        user_id: UserId,
        pool: &PgPool,
    ) -> Result<bool> {
        let result = sqlx::query(
            r#"
            DELETE FROM participations
            WHERE event_id = $1 AND user_id = $2 AND status = 'registered'
            "#,
        )
        .bind(event_id)
        .bind(user_id)
        .execute(pool)
        .await?;
        Ok(result.rows_affected() > 0)
    }

    pub async fn find_for_event_with_users(
        event_id: EventId,
        pool: &PgPool,
    ) -> Result<Vec<ParticipantWithUser>> {
        sqlx::query_as::<_, ParticipantWithUser>(
            r#"
            SELECT p.*, u.name AS user_name, u.email AS user_email, u.points AS user_points
            FROM participations p
            INNER JOIN users u ON u.id = p.user_id
            WHERE p.event_id = $1
            ORDER BY u.name ASC
            "#,
        )
        .bind(event_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Users still in `registered` state for an event (reminder audience).
    pub async fn registered_user_ids(event_id: EventId, pool: &PgPool) -> Result<Vec<UserId>> {
        sqlx::query_scalar::<_, UserId>(
            r#"
            SELECT user_id FROM participations
            WHERE event_id = $1 AND status = 'registered'
            ORDER BY user_id
            "#,
        )
        .bind(event_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
