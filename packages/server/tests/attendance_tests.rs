//! Attendance reconciler tests: points move only on transitions into or
//! out of `attended`, never drop below zero, and an award notifies once.

mod common;

use crate::common::fixtures;
use crate::common::TestHarness;
use clubhive_core::common::{AppError, EventId};
use clubhive_core::domains::clubs::models::{MembershipRole, MembershipStatus};
use clubhive_core::domains::events::actions::mark_attendance;
use clubhive_core::domains::events::models::{
    Participation, ParticipationStatus, MAX_EVENT_POINTS,
};
use clubhive_core::domains::notifications::models::{Notification, NotificationType};
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn attend_then_absent_returns_points_to_zero(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let admin = fixtures::admin(pool).await;
    let club = fixtures::club(pool).await;
    let user = fixtures::approved_member(pool, &club).await;
    let event = fixtures::event(pool, &club, 10).await;
    fixtures::register(pool, &event, &user).await;

    let outcome = mark_attendance(&fixtures::actor(&admin), event.id, user.id, "attended", pool)
        .await
        .unwrap();
    assert_eq!(outcome.previous_status, ParticipationStatus::Registered);
    assert_eq!(outcome.participation.status, ParticipationStatus::Attended);
    assert_eq!(outcome.points_delta, 10);
    assert_eq!(outcome.user_points, Some(10));
    assert_eq!(fixtures::reload(pool, &user).await.points, 10);

    let outcome = mark_attendance(&fixtures::actor(&admin), event.id, user.id, "absent", pool)
        .await
        .unwrap();
    assert_eq!(outcome.previous_status, ParticipationStatus::Attended);
    assert_eq!(outcome.points_delta, -10);
    assert_eq!(outcome.user_points, Some(0));
    assert_eq!(fixtures::reload(pool, &user).await.points, 0);

    let awarded = Notification::find_by_type_for_user(user.id, NotificationType::PointsAwarded, pool)
        .await
        .unwrap();
    assert_eq!(awarded.len(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn marking_attended_twice_awards_once(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let club = fixtures::club(pool).await;
    let board = fixtures::board_member(pool, &club).await;
    let user = fixtures::approved_member(pool, &club).await;
    let event = fixtures::event(pool, &club, 15).await;
    fixtures::register(pool, &event, &user).await;

    let actor = fixtures::actor(&board);
    mark_attendance(&actor, event.id, user.id, "attended", pool)
        .await
        .unwrap();
    let second = mark_attendance(&actor, event.id, user.id, "attended", pool)
        .await
        .unwrap();

    assert_eq!(second.points_delta, 0);
    assert_eq!(second.user_points, None);
    assert_eq!(fixtures::reload(pool, &user).await.points, 15);

    let awarded = Notification::find_by_type_for_user(user.id, NotificationType::PointsAwarded, pool)
        .await
        .unwrap();
    assert_eq!(awarded.len(), 1);
    assert_eq!(awarded[0].related_id, Some(event.id.into_uuid()));
    assert!(awarded[0].content.contains("15 points"));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn revoke_never_goes_below_zero(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let admin = fixtures::admin(pool).await;
    let club = fixtures::club(pool).await;
    let user = fixtures::approved_member(pool, &club).await;
    let event = fixtures::event(pool, &club, 10).await;
    fixtures::register(pool, &event, &user).await;

    let actor = fixtures::actor(&admin);
    mark_attendance(&actor, event.id, user.id, "attended", pool)
        .await
        .unwrap();

    // Balance drifted below the event's value since the award.
    sqlx::query("UPDATE users SET points = 5 WHERE id = $1")
        .bind(user.id)
        .execute(pool)
        .await
        .unwrap();

    let outcome = mark_attendance(&actor, event.id, user.id, "registered", pool)
        .await
        .unwrap();
    assert_eq!(outcome.user_points, Some(0));
    assert_eq!(fixtures::reload(pool, &user).await.points, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn registered_to_absent_leaves_points_alone(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let admin = fixtures::admin(pool).await;
    let club = fixtures::club(pool).await;
    let user = fixtures::approved_member(pool, &club).await;
    let event = fixtures::event(pool, &club, 10).await;
    fixtures::register(pool, &event, &user).await;

    let outcome = mark_attendance(&fixtures::actor(&admin), event.id, user.id, "absent", pool)
        .await
        .unwrap();
    assert_eq!(outcome.points_delta, 0);
    assert_eq!(outcome.participation.status, ParticipationStatus::Absent);
    assert_eq!(fixtures::reload(pool, &user).await.points, 0);

    let awarded = Notification::find_by_type_for_user(user.id, NotificationType::PointsAwarded, pool)
        .await
        .unwrap();
    assert!(awarded.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn invalid_status_is_rejected_before_lookup(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let admin = fixtures::admin(pool).await;

    let err = mark_attendance(
        &fixtures::actor(&admin),
        EventId::new(),
        admin.id,
        "present",
        pool,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::InvalidArgument(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unknown_event_is_not_found(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let admin = fixtures::admin(pool).await;

    let err = mark_attendance(
        &fixtures::actor(&admin),
        EventId::new(),
        admin.id,
        "attended",
        pool,
    )
    .await
    .unwrap_err();
    assert!(matches!(err, AppError::NotFound(_)));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn unregistered_user_is_not_found(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let admin = fixtures::admin(pool).await;
    let club = fixtures::club(pool).await;
    let user = fixtures::approved_member(pool, &club).await;
    let event = fixtures::event(pool, &club, 10).await;

    let err = mark_attendance(&fixtures::actor(&admin), event.id, user.id, "attended", pool)
        .await
        .unwrap_err();
    assert!(matches!(err, AppError::NotFound(msg) if msg == "Participation not found"));
    assert_eq!(fixtures::reload(pool, &user).await.points, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn only_approved_board_or_admin_may_mark(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let club = fixtures::club(pool).await;
    let other_club = fixtures::club(pool).await;
    let user = fixtures::approved_member(pool, &club).await;
    let event = fixtures::event(pool, &club, 10).await;
    fixtures::register(pool, &event, &user).await;

    let plain_member = fixtures::approved_member(pool, &club).await;
    let pending_board = fixtures::member(pool).await;
    fixtures::join(
        pool,
        &pending_board,
        &club,
        MembershipRole::Board,
        MembershipStatus::Pending,
    )
    .await;
    let foreign_board = fixtures::board_member(pool, &other_club).await;

    for outsider in [&plain_member, &pending_board, &foreign_board] {
        let err = mark_attendance(
            &fixtures::actor(outsider),
            event.id,
            user.id,
            "attended",
            pool,
        )
        .await
        .unwrap_err();
        assert!(matches!(err, AppError::Forbidden(_)));
    }

    let participation = Participation::find(event.id, user.id, pool)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(participation.status, ParticipationStatus::Registered);
    assert_eq!(fixtures::reload(pool, &user).await.points, 0);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn award_saturates_at_the_integer_ceiling(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let admin = fixtures::admin(pool).await;
    let club = fixtures::club(pool).await;
    let user = fixtures::approved_member(pool, &club).await;
    let event = fixtures::event(pool, &club, MAX_EVENT_POINTS).await;
    fixtures::register(pool, &event, &user).await;

    sqlx::query("UPDATE users SET points = $2 WHERE id = $1")
        .bind(user.id)
        .bind(i32::MAX - 1)
        .execute(pool)
        .await
        .unwrap();

    let actor = fixtures::actor(&admin);
    let outcome = mark_attendance(&actor, event.id, user.id, "attended", pool)
        .await
        .unwrap();
    assert_eq!(outcome.user_points, Some(i32::MAX));

    let outcome = mark_attendance(&actor, event.id, user.id, "absent", pool)
        .await
        .unwrap();
    assert_eq!(outcome.user_points, Some(i32::MAX - MAX_EVENT_POINTS));
}

#[test_context(TestHarness)]
#[tokio::test]
async fn event_points_above_the_cap_are_refused_by_the_store(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let club = fixtures::club(pool).await;
    let event = fixtures::event(pool, &club, MAX_EVENT_POINTS).await;

    let result = sqlx::query("UPDATE events SET points = $2 WHERE id = $1")
        .bind(event.id)
        .bind(MAX_EVENT_POINTS + 1)
        .execute(pool)
        .await;
    assert!(result.is_err());
}
