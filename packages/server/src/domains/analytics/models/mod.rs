pub mod stats;

pub use stats::{ClubCounts, MemberCounts, ParticipationCounts, SystemCounts};
