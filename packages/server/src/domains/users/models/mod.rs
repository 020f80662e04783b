pub mod user;

pub use user::{LeaderboardEntry, User, UserRole};
