//! Site-wide totals. This binary holds a single test so the database it
//! counts contains nothing but what the test creates.

mod common;

use crate::common::fixtures;
use crate::common::TestHarness;
use clubhive_core::common::AppError;
use clubhive_core::domains::analytics::actions::system_analytics;
use clubhive_core::domains::clubs::models::{MembershipRole, MembershipStatus};
use clubhive_core::domains::events::actions::mark_attendance;
use test_context::test_context;

#[test_context(TestHarness)]
#[tokio::test]
async fn system_report_counts_everything_but_admins(ctx: &TestHarness) {
    let pool = &ctx.db_pool;
    let admin = fixtures::admin(pool).await;
    let debate = fixtures::club(pool).await;
    let hiking = fixtures::club(pool).await;

    let ada = fixtures::approved_member(pool, &debate).await;
    let ben = fixtures::approved_member(pool, &debate).await;
    fixtures::join(pool, &ben, &hiking, MembershipRole::Member, MembershipStatus::Approved).await;
    let cal = fixtures::member(pool).await;
    fixtures::join(pool, &cal, &hiking, MembershipRole::Member, MembershipStatus::Pending).await;

    let debate_night = fixtures::event(pool, &debate, 10).await;
    let hike = fixtures::event(pool, &hiking, 10).await;
    fixtures::register(pool, &debate_night, &ada).await;
    fixtures::register(pool, &debate_night, &ben).await;
    fixtures::register(pool, &hike, &ben).await;
    mark_attendance(&fixtures::actor(&admin), debate_night.id, ada.id, "attended", pool)
        .await
        .unwrap();

    // Age one event and one approved membership past the recent window.
    sqlx::query("UPDATE events SET created_at = NOW() - INTERVAL '60 days' WHERE id = $1")
        .bind(hike.id)
        .execute(pool)
        .await
        .unwrap();
    sqlx::query(
        "UPDATE memberships SET created_at = NOW() - INTERVAL '60 days' WHERE user_id = $1 AND club_id = $2",
    )
    .bind(ben.id)
    .bind(hiking.id)
    .execute(pool)
    .await
    .unwrap();

    let err = system_analytics(&fixtures::actor(&ada), pool).await.unwrap_err();
    assert!(matches!(err, AppError::Forbidden(_)));

    let report = system_analytics(&fixtures::actor(&admin), pool).await.unwrap();
    assert_eq!(report.total_users, 3);
    assert_eq!(report.total_clubs, 2);
    assert_eq!(report.total_events, 2);
    assert_eq!(report.total_active_members, 2);
    assert_eq!(report.recent_events, 1);
    assert_eq!(report.recent_memberships, 2);
    assert_eq!(report.attendance_rate, 33.3);

    let top: Vec<_> = report
        .top_clubs
        .iter()
        .map(|c| (c.id, c.member_count))
        .collect();
    assert_eq!(top, vec![(debate.id, 2), (hiking.id, 1)]);
}
