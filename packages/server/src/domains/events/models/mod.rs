pub mod event;
pub mod participation;

pub use event::{CreateEvent, Event, EventWithClub, DEFAULT_EVENT_POINTS, MAX_EVENT_POINTS};
pub use participation::{ParticipantWithUser, Participation, ParticipationStatus};
