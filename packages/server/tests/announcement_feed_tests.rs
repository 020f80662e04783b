//! Who sees which announcements in the feed, and in what order.

mod common;

use std::time::Duration;

use crate::common::fixtures;
use crate::common::TestHarness;
use clubhive_core::common::{AnnouncementId, AppError, ClubId, Pagination};
use clubhive_core::domains::announcements::actions::{
    create_announcement, list_announcements, list_club_announcements,
};
use clubhive_core::domains::clubs::models::{MembershipRole, MembershipStatus};
use clubhive_core::domains::users::models::User;
use sqlx::PgPool;
use test_context::test_context;

/// Ids from `user`'s feed that are among `ours`, in feed order.
async fn feed(user: &User, ours: &[AnnouncementId], pool: &PgPool) -> Vec<AnnouncementId> {
    list_announcements(&fixtures::actor(user), Pagination::new(100, 0), pool)
        .await
        .unwrap()
        .into_iter()
        .map(|a| a.announcement.id)
        .filter(|id| ours.contains(id))
        .collect()
}

/// Post with a short pause after, so creation times are strictly ordered.
async fn post(pool: &PgPool, author: &User, title: &str, club: Option<ClubId>) -> AnnouncementId {
    let created = create_announcement(&fixtures::actor(author), title, "details", club, pool)
        .await
        .unwrap();
    tokio::time::sleep(Duration::from_millis(5)).await;
    created.announcement.id
}

#[test_context(TestHarness)]
#[tokio::test]
async fn feed_is_scoped_by_membership_and_newest_first(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let admin = fixtures::admin(pool).await;
    let chess = fixtures::club(pool).await;
    let rowing = fixtures::club(pool).await;
    let chess_board = fixtures::board_member(pool, &chess).await;
    let rowing_board = fixtures::board_member(pool, &rowing).await;
    let chess_member = fixtures::approved_member(pool, &chess).await;
    let chess_applicant = fixtures::member(pool).await;
    fixtures::join(
        pool,
        &chess_applicant,
        &chess,
        MembershipRole::Member,
        MembershipStatus::Pending,
    )
    .await;
    let outsider = fixtures::member(pool).await;

    let chess_post = post(pool, &chess_board, "Chess", Some(chess.id)).await;
    let rowing_post = post(pool, &rowing_board, "Rowing", Some(rowing.id)).await;
    let global_post = post(pool, &admin, "Campus", None).await;
    let ours = [chess_post, rowing_post, global_post];

    assert_eq!(
        feed(&admin, &ours, pool).await,
        vec![global_post, rowing_post, chess_post]
    );
    assert_eq!(feed(&chess_member, &ours, pool).await, vec![global_post, chess_post]);
    assert_eq!(feed(&chess_applicant, &ours, pool).await, vec![global_post, chess_post]);
    assert_eq!(feed(&rowing_board, &ours, pool).await, vec![global_post, rowing_post]);
    assert_eq!(feed(&outsider, &ours, pool).await, vec![global_post]);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn club_board_requires_membership(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let admin = fixtures::admin(pool).await;
    let club = fixtures::club(pool).await;
    let board = fixtures::board_member(pool, &club).await;
    let member = fixtures::approved_member(pool, &club).await;
    let outsider = fixtures::member(pool).await;

    let created = create_announcement(
        &fixtures::actor(&board),
        "Meeting",
        "Tuesday",
        Some(club.id),
        pool,
    )
    .await
    .unwrap();

    for viewer in [&member, &admin] {
        let listed = list_club_announcements(&fixtures::actor(viewer), club.id, pool)
            .await
            .unwrap();
        assert_eq!(listed.len(), 1);
        assert_eq!(listed[0].announcement.id, created.announcement.id);
        assert_eq!(listed[0].author_name, board.name);
        assert_eq!(listed[0].club_name.as_deref(), Some(club.name.as_str()));
    }

    let err = list_club_announcements(&fixtures::actor(&outsider), club.id, pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));
}
