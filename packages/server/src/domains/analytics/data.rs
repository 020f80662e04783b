//! Response shapes for the analytics endpoints.

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::common::{ClubId, EventId, UserId};

/// Share of `part` in `total` as a percentage with one decimal, 0 when empty.
pub fn percentage(part: i64, total: i64) -> f64 {
    if total <= 0 {
        return 0.0;
    }
    (part as f64 / total as f64 * 1000.0).round() / 10.0
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClubSummary {
    pub id: ClubId,
    pub name: String,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ClubMemberCount {
    pub id: ClubId,
    pub name: String,
    pub member_count: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyCount {
    pub month: String,
    pub count: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyPoints {
    pub month: String,
    pub points: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ActiveMember {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub events_attended: i64,
}

#[derive(Debug, Clone, Serialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct AttendedEvent {
    pub id: EventId,
    pub title: String,
    pub date: DateTime<Utc>,
    pub points: i32,
    pub club_name: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SystemAnalytics {
    pub total_users: i64,
    pub total_clubs: i64,
    pub total_events: i64,
    pub total_active_members: i64,
    pub recent_events: i64,
    pub recent_memberships: i64,
    pub attendance_rate: f64,
    pub top_clubs: Vec<ClubMemberCount>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClubAnalytics {
    pub club: ClubSummary,
    pub total_members: i64,
    pub board_members: i64,
    pub pending_requests: i64,
    pub total_events: i64,
    pub attendance_rate: f64,
    pub member_growth: Vec<MonthlyCount>,
    pub active_members: Vec<ActiveMember>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventSummary {
    pub id: EventId,
    pub title: String,
    pub date: DateTime<Utc>,
    pub venue: String,
    pub points: i32,
    pub club: ClubSummary,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventAnalytics {
    pub event: EventSummary,
    pub total_registrations: i64,
    pub attended: i64,
    pub absent: i64,
    pub registered: i64,
    pub attendance_rate: f64,
    pub no_show_rate: f64,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberSummary {
    pub id: UserId,
    pub name: String,
    pub email: String,
    pub total_points: i32,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MemberAnalytics {
    pub user: MemberSummary,
    pub total_clubs: i64,
    pub total_events_registered: i64,
    pub total_events_attended: i64,
    pub attendance_rate: f64,
    pub points_history: Vec<MonthlyPoints>,
    pub clubs: Vec<ClubSummary>,
    pub recent_events: Vec<AttendedEvent>,
}
