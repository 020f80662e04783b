pub mod announcement;

pub use announcement::{Announcement, AnnouncementWithAuthor};
