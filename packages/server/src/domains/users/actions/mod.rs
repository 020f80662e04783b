//! User actions - admin user management, the caller's profile and the leaderboard

mod leaderboard;
mod manage;

pub use leaderboard::leaderboard;
pub use manage::{assign_club_role, current_user, list_users, update_user_role, user_memberships};
