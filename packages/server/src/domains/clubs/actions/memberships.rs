//! Membership workflow.
//!
//! Joining creates a `pending` row; board members or admins then approve,
//! reject, promote or remove. At most one row exists per (user, club).

use sqlx::PgPool;
use tracing::info;

use crate::common::{Actor, AppError, AppResult, Capability, ClubId, UserId};
use crate::domains::clubs::models::{
    Club, Membership, MembershipRole, MembershipStatus, MembershipWithClub, MembershipWithUser,
};

/// Clubs the caller has a membership row in, with its status.
pub async fn my_clubs(actor: &Actor, pool: &PgPool) -> AppResult<Vec<MembershipWithClub>> {
    Ok(Membership::find_for_user_with_clubs(actor.user_id, pool).await?)
}

/// Request to join a club. A second request for the same club is a conflict.
pub async fn join_club(actor: &Actor, club_id: ClubId, pool: &PgPool) -> AppResult<Membership> {
    Club::find_by_id(club_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Club not found"))?;

    let membership = Membership::create_pending(actor.user_id, club_id, pool).await?;
    info!(club_id = %club_id, user_id = %actor.user_id, "Join request created");
    Ok(membership)
}

pub async fn pending_requests(
    actor: &Actor,
    club_id: ClubId,
    pool: &PgPool,
) -> AppResult<Vec<MembershipWithUser>> {
    actor.can(Capability::ManageClub(club_id)).check(pool).await?;
    Ok(Membership::find_for_club_with_users(club_id, MembershipStatus::Pending, pool).await?)
}

pub async fn set_membership_status(
    actor: &Actor,
    club_id: ClubId,
    user_id: UserId,
    status: &str,
    pool: &PgPool,
) -> AppResult<Membership> {
    let status: MembershipStatus = status.parse()?;
    actor.can(Capability::ManageClub(club_id)).check(pool).await?;

    let membership = Membership::update_status(user_id, club_id, status, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Membership not found"))?;

    info!(club_id = %club_id, user_id = %user_id, ?status, "Membership status updated");
    Ok(membership)
}

/// Approved members of a club; visible to anyone with a membership row.
pub async fn list_members(
    actor: &Actor,
    club_id: ClubId,
    pool: &PgPool,
) -> AppResult<Vec<MembershipWithUser>> {
    actor.can(Capability::ViewClub(club_id)).check(pool).await?;
    Ok(Membership::find_for_club_with_users(club_id, MembershipStatus::Approved, pool).await?)
}

pub async fn set_member_role(
    actor: &Actor,
    club_id: ClubId,
    user_id: UserId,
    role: &str,
    pool: &PgPool,
) -> AppResult<Membership> {
    let role: MembershipRole = role.parse()?;
    actor.can(Capability::ManageClub(club_id)).check(pool).await?;

    let membership = Membership::update_role(user_id, club_id, role, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Membership not found"))?;

    info!(club_id = %club_id, user_id = %user_id, ?role, "Member role updated");
    Ok(membership)
}

pub async fn remove_member(
    actor: &Actor,
    club_id: ClubId,
    user_id: UserId,
    pool: &PgPool,
) -> AppResult<()> {
    actor.can(Capability::ManageClub(club_id)).check(pool).await?;

    if !Membership::delete(user_id, club_id, pool).await? {
        return Err(AppError::not_found("Membership not found"));
    }
    info!(club_id = %club_id, user_id = %user_id, "Member removed");
    Ok(())
}
