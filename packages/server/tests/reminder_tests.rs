//! Event reminder sweep tests.
//!
//! Other tests share the database and may have events inside the window,
//! so assertions look at this test's own users rather than sweep totals.

mod common;

use crate::common::fixtures;
use crate::common::TestHarness;
use chrono::{Duration, Utc};
use clubhive_core::common::UserId;
use clubhive_core::domains::events::models::{Participation, ParticipationStatus};
use clubhive_core::domains::notifications::actions::send_event_reminders_at;
use clubhive_core::domains::notifications::models::{Notification, NotificationType};
use sqlx::PgPool;
use test_context::test_context;

async fn reminders_for(user_id: UserId, pool: &PgPool) -> Vec<Notification> {
    Notification::find_by_type_for_user(user_id, NotificationType::EventReminder, pool)
        .await
        .unwrap()
}

#[test_context(TestHarness)]
#[tokio::test]
async fn registered_participants_get_one_reminder(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let now = Utc::now();
    let club = fixtures::club(pool).await;
    let event = fixtures::event_at(pool, &club, 10, now + Duration::hours(12)).await;
    let alice = fixtures::approved_member(pool, &club).await;
    let bob = fixtures::approved_member(pool, &club).await;
    fixtures::register(pool, &event, &alice).await;
    fixtures::register(pool, &event, &bob).await;

    let report = send_event_reminders_at(now, pool).await.unwrap();
    assert!(report.events_scanned >= 1);
    assert!(report.reminders_created >= 2);

    for user in [&alice, &bob] {
        let reminders = reminders_for(user.id, pool).await;
        assert_eq!(reminders.len(), 1);
        assert_eq!(reminders[0].related_id, Some(event.id.into_uuid()));
        assert!(reminders[0].content.contains(&event.title));
        assert!(!reminders[0].is_read);
    }
}

#[test_context(TestHarness)]
#[tokio::test]
async fn second_sweep_creates_no_duplicates(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let now = Utc::now();
    let club = fixtures::club(pool).await;
    let event = fixtures::event_at(pool, &club, 10, now + Duration::hours(3)).await;
    let user = fixtures::approved_member(pool, &club).await;
    fixtures::register(pool, &event, &user).await;

    send_event_reminders_at(now, pool).await.unwrap();
    send_event_reminders_at(now + Duration::minutes(30), pool)
        .await
        .unwrap();

    assert_eq!(reminders_for(user.id, pool).await.len(), 1);
}

#[test_context(TestHarness)]
#[tokio::test]
async fn marked_participants_are_skipped(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let now = Utc::now();
    let club = fixtures::club(pool).await;
    let event = fixtures::event_at(pool, &club, 10, now + Duration::hours(6)).await;
    let absent = fixtures::approved_member(pool, &club).await;
    let participation = fixtures::register(pool, &event, &absent).await;
    Participation::set_status(participation.id, ParticipationStatus::Absent, pool)
        .await
        .unwrap();

    send_event_reminders_at(now, pool).await.unwrap();

    assert!(reminders_for(absent.id, pool).await.is_empty());
}

#[test_context(TestHarness)]
#[tokio::test]
async fn events_outside_the_window_are_ignored(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let now = Utc::now();
    let club = fixtures::club(pool).await;
    let later = fixtures::event_at(pool, &club, 10, now + Duration::hours(30)).await;
    let past = fixtures::event_at(pool, &club, 10, now - Duration::hours(2)).await;
    let user = fixtures::approved_member(pool, &club).await;
    fixtures::register(pool, &later, &user).await;
    fixtures::register(pool, &past, &user).await;

    send_event_reminders_at(now, pool).await.unwrap();

    assert!(reminders_for(user.id, pool).await.is_empty());
}
