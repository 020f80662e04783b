//! Announcement actions - posting (with notification fan-out), listing, deleting

mod create_announcement;
mod queries;

pub use create_announcement::create_announcement;
pub use queries::{delete_announcement, list_announcements, list_club_announcements};
