// Business domains
pub mod analytics;
pub mod announcements;
pub mod auth;
pub mod clubs;
pub mod events;
pub mod notifications;
pub mod users;
