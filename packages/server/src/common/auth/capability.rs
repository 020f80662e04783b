use crate::common::ClubId;

/// What an actor is trying to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Capability {
    /// Site-wide administration (club CRUD, user roles, global announcements)
    Administer,

    /// Manage a single club: approve members, run events, mark attendance,
    /// post club announcements. Granted to site admins and to approved
    /// board members of that club.
    ManageClub(ClubId),

    /// Read club-internal data (member list, club announcements). Granted
    /// to site admins and to anyone holding a membership row in the club.
    ViewClub(ClubId),
}

impl Capability {
    /// Returns the club this capability is scoped to, if any.
    pub fn club_id(&self) -> Option<ClubId> {
        match self {
            Self::Administer => None,
            Self::ManageClub(id) | Self::ViewClub(id) => Some(*id),
        }
    }
}
