//! Club actions - club CRUD and the membership workflow (join, approve, roles)

mod clubs;
mod memberships;

pub use clubs::{create_club, delete_club, list_clubs, update_club, ClubChanges};
pub use memberships::{
    join_club, list_members, my_clubs, pending_requests, remove_member, set_member_role,
    set_membership_status,
};
