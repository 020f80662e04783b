//! Clubs domain - clubs and the membership registry

pub mod actions;
pub mod models;

pub use models::{Club, Membership, MembershipRole, MembershipStatus};
