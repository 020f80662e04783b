use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use std::fmt;
use std::str::FromStr;

use crate::common::{AppError, UserId};

/// Site-wide role. Club-level roles live on the membership.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "user_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserRole {
    Admin,
    Member,
}

impl UserRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Admin => "admin",
            Self::Member => "member",
        }
    }
}

impl fmt::Display for UserRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for UserRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "admin" => Ok(Self::Admin),
            "member" => Ok(Self::Member),
            other => Err(AppError::invalid(format!("Invalid role: {}", other))),
        }
    }
}

/// User model - SQL persistence layer
///
/// `points` is only ever changed by the attendance reconciler.
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub role: UserRole,
    pub points: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One row of the points leaderboard.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub rank: i64,
    pub id: UserId,
    pub name: String,
    pub points: i32,
}

impl User {
    pub async fn create(name: &str, email: &str, role: UserRole, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO users (id, name, email, role)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(UserId::new())
        .bind(name)
        .bind(email)
        .bind(role)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_by_id(id: UserId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE id = $1")
            .bind(id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_by_email(email: &str, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users WHERE email = $1")
            .bind(email)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_all(pool: &PgPool) -> Result<Vec<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM users ORDER BY name ASC")
            .fetch_all(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn update_role(id: UserId, role: UserRole, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            "UPDATE users SET role = $2, updated_at = NOW() WHERE id = $1 RETURNING *",
        )
        .bind(id)
        .bind(role)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    /// Ids of every user who is not a site admin (global announcement audience).
    pub async fn find_non_admin_ids<'e>(executor: impl PgExecutor<'e>) -> Result<Vec<UserId>> {
        sqlx::query_scalar::<_, UserId>("SELECT id FROM users WHERE role <> 'admin' ORDER BY id")
            .fetch_all(executor)
            .await
            .map_err(Into::into)
    }

    /// Add `delta` (possibly negative) to the user's points, clamped to
    /// `0..=i32::MAX`.
    ///
    /// Single statement, so concurrent adjustments for the same user do not
    /// lose updates. Returns the new balance, or `None` if the user is gone.
    pub async fn adjust_points<'e>(
        id: UserId,
        delta: i32,
        executor: impl PgExecutor<'e>,
    ) -> Result<Option<i32>> {
        sqlx::query_scalar::<_, i32>(
            r#"
            UPDATE users
            SET points = LEAST(GREATEST(points::BIGINT + $2, 0), 2147483647)::INTEGER,
                updated_at = NOW()
            WHERE id = $1
            RETURNING points
            "#,
        )
        .bind(id)
        .bind(delta)
        .fetch_optional(executor)
        .await
        .map_err(Into::into)
    }

    /// Non-admin users ranked by points (ties share a rank).
    pub async fn leaderboard(limit: i64, pool: &PgPool) -> Result<Vec<LeaderboardEntry>> {
        sqlx::query_as::<_, LeaderboardEntry>(
            r#"
            SELECT RANK() OVER (ORDER BY points DESC) AS rank, id, name, points
            FROM users
            WHERE role <> 'admin'
            ORDER BY points DESC, name ASC
            LIMIT $1
            "#,
        )
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("admin".parse::<UserRole>().unwrap(), UserRole::Admin);
        assert_eq!("member".parse::<UserRole>().unwrap(), UserRole::Member);
        assert!(matches!(
            "club_head".parse::<UserRole>(),
            Err(AppError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_user_serializes_camel_case() {
        let user = User {
            id: UserId::new(),
            name: "Ada".into(),
            email: "ada@example.edu".into(),
            role: UserRole::Member,
            points: 20,
            created_at: Utc::now(),
            updated_at: Utc::now(),
        };
        let json = serde_json::to_value(&user).unwrap();
        assert_eq!(json["role"], "member");
        assert_eq!(json["points"], 20);
        assert!(json.get("createdAt").is_some());
    }
}
