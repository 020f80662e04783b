use sqlx::PgPool;

use super::{AuthError, Capability};
use crate::common::UserId;
use crate::domains::clubs::models::{Membership, MembershipRole, MembershipStatus};
use crate::domains::users::models::UserRole;

/// The authenticated caller of an action.
///
/// Resolved from the bearer token by the HTTP middleware and passed explicitly
/// into every action that needs an identity.
///
/// ```rust,ignore
/// actor
///     .can(Capability::ManageClub(event.club_id))
///     .check(pool)
///     .await?;
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Actor {
    pub user_id: UserId,
    pub role: UserRole,
}

impl Actor {
    pub fn new(user_id: UserId, role: UserRole) -> Self {
        Self { user_id, role }
    }

    pub fn is_admin(&self) -> bool {
        self.role == UserRole::Admin
    }

    /// Specify what capability the actor needs
    pub fn can(self, capability: Capability) -> CapabilityBuilder {
        CapabilityBuilder {
            actor: self,
            capability,
        }
    }
}

/// Builder after specifying capability
pub struct CapabilityBuilder {
    actor: Actor,
    capability: Capability,
}

impl CapabilityBuilder {
    /// Perform the authorization check.
    ///
    /// Site admins short-circuit without touching the store.
    pub async fn check(self, pool: &PgPool) -> Result<(), AuthError> {
        if self.actor.is_admin() {
            return Ok(());
        }
        let membership = match self.capability.club_id() {
            Some(club_id) => Membership::find(self.actor.user_id, club_id, pool).await?,
            None => None,
        };
        decide(&self.actor, self.capability, membership.as_ref())
    }
}

/// Pure permission rule, given the actor's membership in the capability's club.
pub(crate) fn decide(
    actor: &Actor,
    capability: Capability,
    membership: Option<&Membership>,
) -> Result<(), AuthError> {
    if actor.is_admin() {
        return Ok(());
    }

    match capability {
        Capability::Administer => Err(AuthError::AdminRequired),
        Capability::ManageClub(_) => match membership {
            Some(m)
                if m.role == MembershipRole::Board && m.status == MembershipStatus::Approved =>
            {
                Ok(())
            }
            _ => Err(AuthError::PermissionDenied(
                "approved board membership of this club required".into(),
            )),
        },
        Capability::ViewClub(_) => match membership {
            Some(_) => Ok(()),
            None => Err(AuthError::PermissionDenied(
                "not a member of this club".into(),
            )),
        },
    }
}
