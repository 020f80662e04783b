//! Users domain - site roles, the points balance and the leaderboard

pub mod actions;
pub mod models;

pub use models::{User, UserRole};
