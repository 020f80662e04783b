//! Analytics domain - read-only aggregates over clubs, events and members

pub mod actions;
pub mod data;
pub mod models;

pub use data::{ClubAnalytics, EventAnalytics, MemberAnalytics, SystemAnalytics};
