//! Notifications domain - per-user inbox rows, fan-out and event reminders

pub mod actions;
pub mod fanout;
pub mod models;

pub use fanout::{fan_out, Audience};
pub use models::{Notification, NotificationSubject, NotificationTemplate, NotificationType};
