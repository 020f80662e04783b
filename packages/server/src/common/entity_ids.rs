//! One marker type and one `Id` alias per table.

pub use super::id::Id;

macro_rules! entity_ids {
    ($($marker:ident => $alias:ident),* $(,)?) => {
        $(
            #[derive(Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
            pub struct $marker;

            pub type $alias = Id<$marker>;
        )*
    };
}

entity_ids! {
    User => UserId,
    Club => ClubId,
    Membership => MembershipId,
    Event => EventId,
    Participation => ParticipationId,
    Announcement => AnnouncementId,
    Notification => NotificationId,
}
