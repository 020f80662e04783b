//! Authorization for club management.
//!
//! Permission checks are plain role comparisons: site admins may do
//! anything, approved board members may manage their own club, and any
//! membership row grants read access to club-internal data.
//!
//! ```rust,ignore
//! use crate::common::auth::{Actor, Capability};
//!
//! actor.can(Capability::ManageClub(club_id)).check(pool).await?;
//! ```

mod builder;
mod capability;
mod errors;

pub use builder::{Actor, CapabilityBuilder};
pub use capability::Capability;
pub use errors::AuthError;
