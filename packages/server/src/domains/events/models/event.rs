use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};

use crate::common::{ClubId, EventId};

/// Points awarded for attending an event when none are specified.
pub const DEFAULT_EVENT_POINTS: i32 = 10;

/// Upper bound on an event's award; the `events.points` check enforces it too.
pub const MAX_EVENT_POINTS: i32 = 10_000;

#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Event {
    pub id: EventId,
    pub club_id: ClubId,
    pub title: String,
    pub description: Option<String>,
    pub venue: String,
    pub date: DateTime<Utc>,
    pub points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Event joined with the owning club's name.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct EventWithClub {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub event: Event,
    pub club_name: String,
}

/// Input for a new event.
#[derive(Debug, Clone)]
pub struct CreateEvent {
    pub club_id: ClubId,
    pub title: String,
    pub description: Option<String>,
    pub venue: String,
    pub date: DateTime<Utc>,
    pub points: i32,
}

impl Event {
    pub async fn create<'e>(input: &CreateEvent, executor: impl PgExecutor<'e>) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO events (id, club_id, title, description, venue, date, points)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(EventId::new())
        .bind(input.club_id)
        .bind(&input.title)
        .bind(&input.description)
        .bind(&input.venue)
        .bind(input.date)
        .bind(input.points)
        .fetch_one(executor)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: EventId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM events WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all_with_club(pool: &PgPool) -> Result<Vec<EventWithClub>> {
        sqlx::query_as::<_, EventWithClub>(
            r#"
            SELECT e.*, c.name AS club_name
            FROM events e
            INNER JOIN clubs c ON c.id = e.club_id
            ORDER BY e.date ASC
            "#,
        )
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Events whose date falls inside `[start, end]`.
    pub async fn find_between(
        start: DateTime<Utc>,
        end: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>(
            "SELECT * FROM events WHERE date BETWEEN $1 AND $2 ORDER BY date ASC",
        )
        .bind(start)
        .bind(end)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
