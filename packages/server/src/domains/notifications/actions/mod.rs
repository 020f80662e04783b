//! Notification actions - inbox queries for the caller and the reminder sweep

mod inbox;
mod send_reminders;

pub use inbox::{
    delete_notification, list_notifications, mark_all_read, mark_read, unread_count,
};
pub use send_reminders::{
    reminder_window, send_event_reminders, send_event_reminders_at, ReminderSweepReport,
    REMINDER_LOOKAHEAD_HOURS,
};
