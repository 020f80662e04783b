//! Announcements domain - club and site-wide posts that fan out to inboxes

pub mod actions;
pub mod models;

pub use models::{Announcement, AnnouncementWithAuthor};
