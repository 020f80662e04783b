//! Test fixtures for creating test data.
//!
//! These fixtures use the model methods directly. Names and emails carry a
//! random suffix so tests sharing the database never collide.

use chrono::{DateTime, Duration, Utc};
use clubhive_core::common::Actor;
use clubhive_core::domains::clubs::models::{Club, Membership, MembershipRole, MembershipStatus};
use clubhive_core::domains::events::models::{CreateEvent, Event, Participation};
use clubhive_core::domains::users::models::{User, UserRole};
use sqlx::PgPool;
use uuid::Uuid;

fn suffix() -> String {
    Uuid::new_v4().simple().to_string()
}

pub async fn user_with_role(pool: &PgPool, role: UserRole) -> User {
    let tag = suffix();
    User::create(
        &format!("User {}", &tag[..8]),
        &format!("user-{}@campus.test", tag),
        role,
        pool,
    )
    .await
    .expect("Failed to create user")
}

pub async fn admin(pool: &PgPool) -> User {
    user_with_role(pool, UserRole::Admin).await
}

pub async fn member(pool: &PgPool) -> User {
    user_with_role(pool, UserRole::Member).await
}

pub fn actor(user: &User) -> Actor {
    Actor::new(user.id, user.role)
}

pub async fn club(pool: &PgPool) -> Club {
    Club::create(
        &format!("Club {}", suffix()),
        Some("A club for testing"),
        pool,
    )
    .await
    .expect("Failed to create club")
}

/// Put `user` in `club` with the given role and status.
pub async fn join(
    pool: &PgPool,
    user: &User,
    club: &Club,
    role: MembershipRole,
    status: MembershipStatus,
) -> Membership {
    Membership::upsert_approved(user.id, club.id, role, pool)
        .await
        .expect("Failed to create membership");
    Membership::update_status(user.id, club.id, status, pool)
        .await
        .expect("Failed to set membership status")
        .expect("Membership vanished")
}

pub async fn board_member(pool: &PgPool, club: &Club) -> User {
    let user = member(pool).await;
    join(pool, &user, club, MembershipRole::Board, MembershipStatus::Approved).await;
    user
}

pub async fn approved_member(pool: &PgPool, club: &Club) -> User {
    let user = member(pool).await;
    join(pool, &user, club, MembershipRole::Member, MembershipStatus::Approved).await;
    user
}

pub async fn event_at(pool: &PgPool, club: &Club, points: i32, date: DateTime<Utc>) -> Event {
    Event::create(
        &CreateEvent {
            club_id: club.id,
            title: format!("Event {}", &suffix()[..8]),
            description: None,
            venue: "Student Union".to_string(),
            date,
            points,
        },
        pool,
    )
    .await
    .expect("Failed to create event")
}

pub async fn event(pool: &PgPool, club: &Club, points: i32) -> Event {
    event_at(pool, club, points, Utc::now() + Duration::days(7)).await
}

pub async fn register(pool: &PgPool, event: &Event, user: &User) -> Participation {
    Participation::register(event.id, user.id, pool)
        .await
        .expect("Failed to register")
}

pub async fn reload(pool: &PgPool, user: &User) -> User {
    User::find_by_id(user.id, pool)
        .await
        .expect("Failed to load user")
        .expect("User vanished")
}
