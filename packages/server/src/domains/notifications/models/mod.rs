pub mod notification;

pub use notification::{Notification, NotificationSubject, NotificationTemplate, NotificationType};
