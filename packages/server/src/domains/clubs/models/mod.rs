pub mod club;
pub mod membership;

pub use club::{Club, ClubStatus};
pub use membership::{
    Membership, MembershipRole, MembershipStatus, MembershipWithClub, MembershipWithUser,
};
