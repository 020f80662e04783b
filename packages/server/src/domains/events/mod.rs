//! Events domain - club events, the per-user roster and attendance points

pub mod actions;
pub mod attendance;
pub mod models;

pub use attendance::{AttendanceTransition, PointsEffect};
pub use models::{Event, Participation, ParticipationStatus};
