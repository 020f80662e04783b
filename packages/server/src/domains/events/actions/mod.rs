//! Event actions - creation with member notification, RSVP, roster and attendance

mod create_event;
mod mark_attendance;
mod queries;
mod registration;

pub use create_event::{create_event, event_announcement_content};
pub use mark_attendance::{mark_attendance, AttendanceOutcome};
pub use queries::{list_events, list_participants};
pub use registration::{my_registration, register_for_event, unregister_from_event, RegistrationStatus};
