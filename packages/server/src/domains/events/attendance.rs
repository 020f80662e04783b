//! Points rule for attendance changes.
//!
//! Only a move into or out of `attended` touches the points balance:
//!
//! | previous   | new        | effect                     |
//! |------------|------------|----------------------------|
//! | ≠ attended | attended   | award event points         |
//! | attended   | ≠ attended | revoke event points (≥ 0)  |
//! | anything else           | none                       |
//!
//! Marking `attended` twice awards once, because the second call sees
//! `previous == attended`.

use super::models::ParticipationStatus;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PointsEffect {
    Award(i32),
    Revoke(i32),
    None,
}

impl PointsEffect {
    /// Signed delta to apply to the balance before flooring.
    pub fn delta(&self) -> i32 {
        match self {
            Self::Award(p) => *p,
            Self::Revoke(p) => -*p,
            Self::None => 0,
        }
    }

    /// Balance after applying this effect, floored at zero.
    pub fn apply(&self, balance: i32) -> i32 {
        balance.saturating_add(self.delta()).max(0)
    }

    /// Whether the user gets a `points_awarded` notification.
    pub fn notifies(&self) -> bool {
        matches!(self, Self::Award(_))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AttendanceTransition {
    pub previous: ParticipationStatus,
    pub next: ParticipationStatus,
}

impl AttendanceTransition {
    pub fn new(previous: ParticipationStatus, next: ParticipationStatus) -> Self {
        Self { previous, next }
    }

    pub fn points_effect(&self, event_points: i32) -> PointsEffect {
        use ParticipationStatus::Attended;

        match (self.previous == Attended, self.next == Attended) {
            (false, true) => PointsEffect::Award(event_points),
            (true, false) => PointsEffect::Revoke(event_points),
            _ => PointsEffect::None,
        }
    }
}
