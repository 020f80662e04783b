use chrono::Utc;
use sqlx::PgPool;

use crate::common::{Actor, AppError, AppResult, Capability, ClubId, EventId, UserId};
use crate::domains::analytics::data::{
    percentage, ClubAnalytics, ClubSummary, EventAnalytics, EventSummary, MemberAnalytics,
    MemberSummary, SystemAnalytics,
};
use crate::domains::analytics::models::{
    ClubCounts, MemberCounts, ParticipationCounts, SystemCounts,
};
use crate::domains::clubs::models::Club;
use crate::domains::events::models::Event;
use crate::domains::users::models::User;

const TOP_CLUBS: i64 = 5;
const ACTIVE_MEMBERS: i64 = 10;
const RECENT_ATTENDED: i64 = 5;

/// Site-wide totals. Admin only.
pub async fn system_analytics(actor: &Actor, pool: &PgPool) -> AppResult<SystemAnalytics> {
    actor.can(Capability::Administer).check(pool).await?;

    let counts = SystemCounts::load(Utc::now(), pool).await?;
    let top_clubs = SystemCounts::top_clubs(TOP_CLUBS, pool).await?;

    Ok(SystemAnalytics {
        total_users: counts.total_users,
        total_clubs: counts.total_clubs,
        total_events: counts.total_events,
        total_active_members: counts.total_active_members,
        recent_events: counts.recent_events,
        recent_memberships: counts.recent_memberships,
        attendance_rate: percentage(counts.attended_participations, counts.total_participations),
        top_clubs,
    })
}

/// Per-club report for admins and the club's approved board.
pub async fn club_analytics(
    actor: &Actor,
    club_id: ClubId,
    pool: &PgPool,
) -> AppResult<ClubAnalytics> {
    actor.can(Capability::ManageClub(club_id)).check(pool).await?;

    let club = Club::find_by_id(club_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Club not found"))?;

    let counts = ClubCounts::load(club_id, pool).await?;
    let member_growth = ClubCounts::member_growth(club_id, Utc::now(), pool).await?;
    let active_members = ClubCounts::most_active_members(club_id, ACTIVE_MEMBERS, pool).await?;

    Ok(ClubAnalytics {
        club: ClubSummary {
            id: club.id,
            name: club.name,
        },
        total_members: counts.total_members,
        board_members: counts.board_members,
        pending_requests: counts.pending_requests,
        total_events: counts.total_events,
        attendance_rate: percentage(counts.attended_participations, counts.total_participations),
        member_growth,
        active_members,
    })
}

/// Per-event registration breakdown for admins and the owning club's board.
pub async fn event_analytics(
    actor: &Actor,
    event_id: EventId,
    pool: &PgPool,
) -> AppResult<EventAnalytics> {
    let event = Event::find_by_id(event_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Event not found"))?;

    actor
        .can(Capability::ManageClub(event.club_id))
        .check(pool)
        .await?;

    let club = Club::find_by_id(event.club_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Club not found"))?;
    let counts = ParticipationCounts::for_event(event_id, pool).await?;

    Ok(EventAnalytics {
        event: EventSummary {
            id: event.id,
            title: event.title,
            date: event.date,
            venue: event.venue,
            points: event.points,
            club: ClubSummary {
                id: club.id,
                name: club.name,
            },
        },
        total_registrations: counts.total,
        attended: counts.attended,
        absent: counts.absent,
        registered: counts.registered,
        attendance_rate: percentage(counts.attended, counts.total),
        no_show_rate: percentage(counts.absent, counts.total),
    })
}

/// A member's own activity. Members may only view themselves; admins anyone.
pub async fn member_analytics(
    actor: &Actor,
    user_id: UserId,
    pool: &PgPool,
) -> AppResult<MemberAnalytics> {
    if actor.user_id != user_id && !actor.is_admin() {
        return Err(AppError::forbidden(
            "Not authorized to view this member analytics",
        ));
    }

    let user = User::find_by_id(user_id, pool)
        .await?
        .ok_or_else(|| AppError::not_found("User not found"))?;

    let counts = MemberCounts::load(user_id, pool).await?;
    let points_history = MemberCounts::points_history(user_id, Utc::now(), pool).await?;
    let clubs = MemberCounts::approved_clubs(user_id, pool).await?;
    let recent_events = MemberCounts::recent_attended(user_id, RECENT_ATTENDED, pool).await?;

    Ok(MemberAnalytics {
        user: MemberSummary {
            id: user.id,
            name: user.name,
            email: user.email,
            total_points: user.points,
        },
        total_clubs: counts.total_clubs,
        total_events_registered: counts.total_events_registered,
        total_events_attended: counts.total_events_attended,
        attendance_rate: percentage(
            counts.total_events_attended,
            counts.total_events_registered,
        ),
        points_history,
        clubs,
        recent_events,
    })
}
