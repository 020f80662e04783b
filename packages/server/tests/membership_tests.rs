//! Membership workflow: join, approve, promote, remove.

mod common;

use crate::common::fixtures;
use crate::common::TestHarness;
use clubhive_core::common::{AppError, ClubId};
use clubhive_core::domains::clubs::actions::{
    join_club, list_members, pending_requests, remove_member, set_member_role,
    set_membership_status,
};
use clubhive_core::domains::clubs::models::{MembershipRole, MembershipStatus};
use clubhive_core::domains::users::actions::assign_club_role;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn join_then_board_approves(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let club = fixtures::club(pool).await;
    let board = fixtures::board_member(pool, &club).await;
    let applicant = fixtures::member(pool).await;

    let joined = join_club(&fixtures::actor(&applicant), club.id, pool)
        .await
        .unwrap();
    assert_eq!(joined.status, MembershipStatus::Pending);
    assert_eq!(joined.role, MembershipRole::Member);

    let err = join_club(&fixtures::actor(&applicant), club.id, pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Conflict(_)));

    let pending = pending_requests(&fixtures::actor(&board), club.id, pool)
        .await
        .unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].membership.user_id, applicant.id);

    // Pending applicants may look but not manage.
    let members = list_members(&fixtures::actor(&applicant), club.id, pool)
        .await
        .unwrap();
    assert_eq!(members.len(), 1);
    let err = pending_requests(&fixtures::actor(&applicant), club.id, pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let approved = set_membership_status(&fixtures::actor(&board), club.id, applicant.id, "approved", pool)
        .await
        .unwrap();
    assert_eq!(approved.status, MembershipStatus::Approved);

    let members = list_members(&fixtures::actor(&board), club.id, pool)
        .await
        .unwrap();
    assert_eq!(members.len(), 2);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn joining_unknown_club_is_not_found(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let user = fixtures::member(pool).await;

    let err = join_club(&fixtures::actor(&user), ClubId::new(), pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn bad_status_or_role_is_invalid(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let club = fixtures::club(pool).await;
    let board = fixtures::board_member(pool, &club).await;
    let user = fixtures::approved_member(pool, &club).await;

    let err = set_membership_status(&fixtures::actor(&board), club.id, user.id, "maybe", pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));

    let err = set_member_role(&fixtures::actor(&board), club.id, user.id, "president", pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn promoted_member_can_manage(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let club = fixtures::club(pool).await;
    let board = fixtures::board_member(pool, &club).await;
    let user = fixtures::approved_member(pool, &club).await;
    let other = fixtures::approved_member(pool, &club).await;

    let err = remove_member(&fixtures::actor(&user), club.id, other.id, pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let promoted = set_member_role(&fixtures::actor(&board), club.id, user.id, "board", pool)
        .await
        .unwrap();
    assert_eq!(promoted.role, MembershipRole::Board);

    remove_member(&fixtures::actor(&user), club.id, other.id, pool)
        .await
        .unwrap();
    let err = remove_member(&fixtures::actor(&user), club.id, other.id, pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn admin_assignment_approves_pending_row(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let admin = fixtures::admin(pool).await;
    let club = fixtures::club(pool).await;
    let user = fixtures::member(pool).await;
    join_club(&fixtures::actor(&user), club.id, pool)
        .await
        .unwrap();

    let membership = assign_club_role(&fixtures::actor(&admin), user.id, club.id, "board", pool)
        .await
        .unwrap();
    assert_eq!(membership.role, MembershipRole::Board);
    assert_eq!(membership.status, MembershipStatus::Approved);

    let err = assign_club_role(&fixtures::actor(&user), user.id, club.id, "member", pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}
