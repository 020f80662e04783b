//! Analytics actions - permission checks plus report assembly

mod reports;

pub use reports::{club_analytics, event_analytics, member_analytics, system_analytics};
