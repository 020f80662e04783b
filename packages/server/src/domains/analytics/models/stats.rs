//! Aggregate queries behind the analytics reports.
//!
//! Each count struct is filled by a single round trip; the lists
//! (top clubs, growth, recent events) are separate queries.

use anyhow::Result;
use chrono::{DateTime, Duration, Utc};
use sqlx::PgPool;

use crate::common::{ClubId, EventId, UserId};
use crate::domains::analytics::data::{
    ActiveMember, AttendedEvent, ClubMemberCount, ClubSummary, MonthlyCount, MonthlyPoints,
};

/// How far back "recent" activity reaches.
pub const RECENT_DAYS: i64 = 30;

/// Number of calendar months in growth and points histories, current month included.
pub const HISTORY_MONTHS: i32 = 6;

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct SystemCounts {
    pub total_users: i64,
    pub total_clubs: i64,
    pub total_events: i64,
    pub total_active_members: i64,
    pub recent_events: i64,
    pub recent_memberships: i64,
    pub total_participations: i64,
    pub attended_participations: i64,
}

impl SystemCounts {
    pub async fn load(now: DateTime<Utc>, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM users WHERE role <> 'admin') AS total_users,
                (SELECT COUNT(*) FROM clubs) AS total_clubs,
                (SELECT COUNT(*) FROM events) AS total_events,
                (SELECT COUNT(DISTINCT user_id) FROM memberships WHERE status = 'approved')
                    AS total_active_members,
                (SELECT COUNT(*) FROM events WHERE created_at >= $1) AS recent_events,
                (SELECT COUNT(*) FROM memberships WHERE status = 'approved' AND created_at >= $1)
                    AS recent_memberships,
                (SELECT COUNT(*) FROM participations) AS total_participations,
                (SELECT COUNT(*) FROM participations WHERE status = 'attended')
                    AS attended_participations
            "#,
        )
        .bind(now - Duration::days(RECENT_DAYS))
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Clubs ranked by approved member count.
    pub async fn top_clubs(limit: i64, pool: &PgPool) -> Result<Vec<ClubMemberCount>> {
        sqlx::query_as::<_, ClubMemberCount>(
            r#"
            SELECT c.id, c.name, COUNT(m.id) AS member_count
            FROM clubs c
            LEFT JOIN memberships m ON m.club_id = c.id AND m.status = 'approved'
            GROUP BY c.id, c.name
            ORDER BY member_count DESC, c.name ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct ClubCounts {
    pub total_members: i64,
    pub board_members: i64,
    pub pending_requests: i64,
    pub total_events: i64,
    pub total_participations: i64,
    pub attended_participations: i64,
}

impl ClubCounts {
    pub async fn load(club_id: ClubId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM memberships WHERE club_id = $1 AND status = 'approved')
                    AS total_members,
                (SELECT COUNT(*) FROM memberships
                    WHERE club_id = $1 AND status = 'approved' AND role = 'board')
                    AS board_members,
                (SELECT COUNT(*) FROM memberships WHERE club_id = $1 AND status = 'pending')
                    AS pending_requests,
                (SELECT COUNT(*) FROM events WHERE club_id = $1) AS total_events,
                (SELECT COUNT(*) FROM participations p
                    INNER JOIN events e ON e.id = p.event_id
                    WHERE e.club_id = $1) AS total_participations,
                (SELECT COUNT(*) FROM participations p
                    INNER JOIN events e ON e.id = p.event_id
                    WHERE e.club_id = $1 AND p.status = 'attended') AS attended_participations
            "#,
        )
        .bind(club_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Approved member count at the end of each of the last few months.
    pub async fn member_growth(
        club_id: ClubId,
        now: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Vec<MonthlyCount>> {
        sqlx::query_as::<_, MonthlyCount>(
            r#"
            SELECT
                to_char(months.start, 'Mon YYYY') AS month,
                (SELECT COUNT(*) FROM memberships
                    WHERE club_id = $1 AND status = 'approved'
                      AND created_at < months.start + INTERVAL '1 month') AS count
            FROM generate_series(
                date_trunc('month', $2::timestamptz) - make_interval(months => $3 - 1),
                date_trunc('month', $2::timestamptz),
                INTERVAL '1 month'
            ) AS months(start)
            ORDER BY months.start
            "#,
        )
        .bind(club_id)
        .bind(now)
        .bind(HISTORY_MONTHS)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Approved members ranked by events of this club they attended.
    pub async fn most_active_members(
        club_id: ClubId,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<ActiveMember>> {
        sqlx::query_as::<_, ActiveMember>(
            r#"
            SELECT u.id, u.name, u.email, COUNT(e.id) AS events_attended
            FROM memberships m
            INNER JOIN users u ON u.id = m.user_id
            LEFT JOIN participations p ON p.user_id = m.user_id AND p.status = 'attended'
            LEFT JOIN events e ON e.id = p.event_id AND e.club_id = $1
            WHERE m.club_id = $1 AND m.status = 'approved'
            GROUP BY u.id, u.name, u.email
            ORDER BY events_attended DESC, u.name ASC
            LIMIT $2
            "#,
        )
        .bind(club_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

#[derive(Debug, Clone, Copy, Default, sqlx::FromRow)]
pub struct ParticipationCounts {
    pub total: i64,
    pub registered: i64,
    pub absent: i64,
    pub attended: i64,
}

impl ParticipationCounts {
    pub async fn for_event(event_id: EventId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT
                COUNT(*) AS total,
                COUNT(*) FILTER (WHERE status = 'registered') AS registered,
                COUNT(*) FILTER (WHERE status = 'absent') AS absent,
                COUNT(*) FILTER (WHERE status = 'attended') AS attended
            FROM participations
            WHERE event_id = $1
            "#,
        )
        .bind(event_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }
}

#[derive(Debug, Clone, sqlx::FromRow)]
pub struct MemberCounts {
    pub total_clubs: i64,
    pub total_events_registered: i64,
    pub total_events_attended: i64,
}

impl MemberCounts {
    pub async fn load(user_id: UserId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            SELECT
                (SELECT COUNT(*) FROM memberships WHERE user_id = $1 AND status = 'approved')
                    AS total_clubs,
                (SELECT COUNT(*) FROM participations WHERE user_id = $1)
                    AS total_events_registered,
                (SELECT COUNT(*) FROM participations WHERE user_id = $1 AND status = 'attended')
                    AS total_events_attended
            "#,
        )
        .bind(user_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Points from attendance marked in each of the last few months.
    pub async fn points_history(
        user_id: UserId,
        now: DateTime<Utc>,
        pool: &PgPool,
    ) -> Result<Vec<MonthlyPoints>> {
        sqlx::query_as::<_, MonthlyPoints>(
            r#"
            SELECT
                to_char(months.start, 'Mon') AS month,
                COALESCE((
                    SELECT SUM(e.points) FROM participations p
                    INNER JOIN events e ON e.id = p.event_id
                    WHERE p.user_id = $1 AND p.status = 'attended'
                      AND p.updated_at >= months.start
                      AND p.updated_at < months.start + INTERVAL '1 month'
                ), 0)::BIGINT AS points
            FROM generate_series(
                date_trunc('month', $2::timestamptz) - make_interval(months => $3 - 1),
                date_trunc('month', $2::timestamptz),
                INTERVAL '1 month'
            ) AS months(start)
            ORDER BY months.start
            "#,
        )
        .bind(user_id)
        .bind(now)
        .bind(HISTORY_MONTHS)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn approved_clubs(user_id: UserId, pool: &PgPool) -> Result<Vec<ClubSummary>> {
        sqlx::query_as::<_, ClubSummary>(
            r#"
            SELECT c.id, c.name
            FROM memberships m
            INNER JOIN clubs c ON c.id = m.club_id
            WHERE m.user_id = $1 AND m.status = 'approved'
            ORDER BY c.name ASC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    /// Most recently marked attended events.
    pub async fn recent_attended(
        user_id: UserId,
        limit: i64,
        pool: &PgPool,
    ) -> Result<Vec<AttendedEvent>> {
        sqlx::query_as::<_, AttendedEvent>(
            r#"
            SELECT e.id, e.title, e.date, e.points, c.name AS club_name
            FROM participations p
            INNER JOIN events e ON e.id = p.event_id
            INNER JOIN clubs c ON c.id = e.club_id
            WHERE p.user_id = $1 AND p.status = 'attended'
            ORDER BY p.updated_at DESC
            LIMIT $2
            "#,
        )
        .bind(user_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}
