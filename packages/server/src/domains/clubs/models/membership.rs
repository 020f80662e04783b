use anyhow::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{PgExecutor, PgPool};
use std::str::FromStr;

use crate::common::{AppError, ClubId, MembershipId, UserId};

/// Role inside a club. Board members manage the club.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "membership_role", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipRole {
    Member,
    Board,
}

impl FromStr for MembershipRole {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "member" => Ok(Self::Member),
            "board" => Ok(Self::Board),
            other => Err(AppError::invalid(format!("Invalid club role: {}", other))),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "membership_status", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum MembershipStatus {
    Pending,
    Approved,
    Rejected,
}

impl FromStr for MembershipStatus {
    type Err = AppError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "approved" => Ok(Self::Approved),
            "rejected" => Ok(Self::Rejected),
            other => Err(AppError::invalid(format!(
                "Invalid membership status: {}",
                other
            ))),
        }
    }
}

/// A user's relationship to a club. Unique per (user, club).
#[derive(Debug, Clone, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Membership {
    pub id: MembershipId,
    pub user_id: UserId,
    pub club_id: ClubId,
    pub role: MembershipRole,
    pub status: MembershipStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Membership joined with the member's name and email.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MembershipWithUser {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub membership: Membership,
    pub user_name: String,
    pub user_email: String,
}

/// Membership joined with the club it belongs to.
#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MembershipWithClub {
    #[sqlx(flatten)]
    #[serde(flatten)]
    pub membership: Membership,
    pub club_name: String,
    pub club_description: Option<String>,
}

impl Membership {
    /// Create a join request. Fails with a unique violation if the user
    /// already has a membership row for this club.
    pub async fn create_pending(user_id: UserId, club_id: ClubId, pool: &PgPool) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO memberships (id, user_id, club_id, role, status)
            VALUES ($1, $2, $3, 'member', 'pending')
            RETURNING *
            "#,
        )
        .bind(MembershipId::new())
        .bind(user_id)
        .bind(club_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    /// Assign a club role directly, approving the membership.
    pub async fn upsert_approved(
        user_id: UserId,
        club_id: ClubId,
        role: MembershipRole,
        pool: &PgPool,
    ) -> Result<Self> {
        sqlx::query_as::<_, Self>(
            r#"
            INSERT INTO memberships (id, user_id, club_id, role, status)
            VALUES ($1, $2, $3, $4, 'approved')
            ON CONFLICT (user_id, club_id)
            DO UPDATE SET role = EXCLUDED.role, status = 'approved', updated_at = NOW()
            RETURNING *
            "#,
        )
        .bind(MembershipId::new())
        .bind(user_id)
        .bind(club_id)
        .bind(role)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find(user_id: UserId, club_id: ClubId, pool: &PgPool) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>("SELECT * FROM memberships WHERE user_id = $1 AND club_id = $2")
            .bind(user_id)
            .bind(club_id)
            .fetch_optional(pool)
            .await
            .map_err(Into::into)
    }

    pub async fn find_for_club_with_users(
        club_id: ClubId,
        status: MembershipStatus,
        pool: &PgPool,
    ) -> Result<Vec<MembershipWithUser>> {
        sqlx::query_as::<_, MembershipWithUser>(
            r#"
            SELECT m.*, u.name AS user_name, u.email AS user_email
            FROM memberships m
            INNER JOIN users u ON u.id = m.user_id
            WHERE m.club_id = $1 AND m.status = $2
            ORDER BY m.role DESC, u.name ASC
            "#,
        )
        .bind(club_id)
        .bind(status)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn find_for_user_with_clubs(
        user_id: UserId,
        pool: &PgPool,
    ) -> Result<Vec<MembershipWithClub>> {
        sqlx::query_as::<_, MembershipWithClub>(
            r#"
            SELECT m.*, c.name AS club_name, c.description AS club_description
            FROM memberships m
            INNER JOIN clubs c ON c.id = m.club_id
            WHERE m.user_id = $1
            ORDER BY m.created_at DESC
            "#,
        )
        .bind(user_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update_status(
        user_id: UserId,
        club_id: ClubId,
        status: MembershipStatus,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE memberships SET status = $3, updated_at = NOW()
            WHERE user_id = $1 AND club_id = $2
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(club_id)
        .bind(status)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn update_role(
        user_id: UserId,
        club_id: ClubId,
        role: MembershipRole,
        pool: &PgPool,
    ) -> Result<Option<Self>> {
        sqlx::query_as::<_, Self>(
            r#"
            UPDATE memberships SET role = $3, updated_at = NOW()
            WHERE user_id = $1 AND club_id = $2
            RETURNING *
            "#,
        )
        .bind(user_id)
        .bind(club_id)
        .bind(role)
        .fetch_optional(pool)
        .await
        .map_err(Into::into)
    }

    pub async fn delete(user_id: UserId, club_id: ClubId, pool: &PgPool) -> Result<bool> {
        let result = sqlx::query("DELETE FROM memberships WHERE user_id = $1 AND club_id = $2")
            .bind(user_id)
            .bind(club_id)
            .execute(pool)
            .await?;
        Ok(result.rows_affected() > 0)
    }

    /// Every user holding a membership row in the club, whatever its status.
    pub async fn user_ids_for_club<'e>(
        club_id: ClubId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<UserId>> {
        sqlx::query_scalar::<_, UserId>(
            "SELECT user_id FROM memberships WHERE club_id = $1 ORDER BY user_id",
        )
        .bind(club_id)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }

    /// Users with an approved membership in the club.
    pub async fn approved_user_ids_for_club<'e>(
        club_id: ClubId,
        executor: impl PgExecutor<'e>,
    ) -> Result<Vec<UserId>> {
        sqlx::query_scalar::<_, UserId>(
            r#"
            SELECT user_id FROM memberships
            WHERE club_id = $1 AND status = 'approved'
            ORDER BY user_id
            "#,
        )
        .bind(club_id)
        .fetch_all(executor)
        .await
        .map_err(Into::into)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_role_and_status() {
        assert_eq!("board".parse::<MembershipRole>().unwrap(), MembershipRole::Board);
        assert_eq!(
            "rejected".parse::<MembershipStatus>().unwrap(),
            MembershipStatus::Rejected
        );
        assert!("president".parse::<MembershipRole>().is_err());
        assert!("APPROVED".parse::<MembershipStatus>().is_err());
    }

    #[test]
    fn test_flattened_membership_json() {
        let row = MembershipWithUser {
            membership: Membership {
                id: MembershipId::new(),
                user_id: UserId::new(),
                club_id: ClubId::new(),
                role: MembershipRole::Board,
                status: MembershipStatus::Approved,
                created_at: Utc::now(),
                updated_at: Utc::now(),
            },
            user_name: "Grace".into(),
            user_email: "grace@example.edu".into(),
        };
        let json = serde_json::to_value(&row).unwrap();
        assert_eq!(json["role"], "board");
        assert_eq!(json["status"], "approved");
        assert_eq!(json["userName"], "Grace");
        assert!(json.get("clubId").is_some());
    }
}
