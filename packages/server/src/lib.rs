// Club Hive - API Core
//
// Backend for campus club management: memberships, event RSVP and
// attendance, announcements, notifications and a points leaderboard.
// Architecture follows domain-driven design: models own their SQL,
// actions hold the business rules and permission checks.

pub mod common;
pub mod config;
pub mod domains;
pub mod kernel;
pub mod server;

pub use config::*;
