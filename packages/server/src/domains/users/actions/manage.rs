use sqlx::PgPool;
use tracing::info;

use crate::common::{Actor, AppError, AppResult, Capability, ClubId, UserId};
use crate::domains::clubs::models::{Club, Membership, MembershipRole, MembershipWithClub};
use crate::domains::users::models::{User, UserRole};

/// The caller's own user row.
pub async fn current_user(actor: &Actor, pool: &PgPool) -> AppResult<User> {
    User::find_by_id(actor.user_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))
}

pub async fn list_users(actor: &Actor, pool: &PgPool) -> AppResult<Vec<User>> {
    actor.can(Capability::Administer).check(pool).await?;
    Ok(User::find_all(pool).await?)
}

pub async fn update_user_role(
    actor: &Actor,
    user_id: UserId,
    role: &str,
    pool: &PgPool,
) -> AppResult<User> {
    actor.can(Capability::Administer).check(pool).await?;
    let role: UserRole = role.parse()?;

    let user = User::update_role(user_id, role, pool)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    info!(user_id = %user_id, %role, "User role updated");
    Ok(user)
}

pub async fn user_memberships(
    actor: &Actor,
    user_id: UserId,
    pool: &PgPool,
) -> AppResult<Vec<MembershipWithClub>> {
    actor.can(Capability::Administer).check(pool).await?;
    User::find_by_id(user_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Ok(Membership::find_for_user_with_clubs(user_id, pool).await?)
}

/// Give a user a club role directly, creating or approving the membership.
pub async fn assign_club_role(
    actor: &Actor,
    user_id: UserId,
    club_id: ClubId,
    role: &str,
    pool: &PgPool,
) -> AppResult<Membership> {
    actor.can(Capability::Administer).check(pool).await?;
    let role: MembershipRole = role.parse()?;

    User::find_by_id(user_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;
    Club::find_by_id(club_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Club not found"))?;

    let membership = Membership::upsert_approved(user_id, club_id, role, pool).await?;
    info!(user_id = %user_id, club_id = %club_id, ?role, "Club role assigned");
    Ok(membership)
}
