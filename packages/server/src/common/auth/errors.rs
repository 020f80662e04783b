use thiserror::Error;

/// Why a capability check failed.
///
/// Authentication itself is not checked here; an action only ever sees an
/// already-resolved [`Actor`](super::Actor).
#[derive(Error, Debug)]
pub enum AuthError {
    #[error("Admin access required")]
    AdminRequired,

    #[error("Permission denied: {0}")]
    PermissionDenied(String),

    #[error("membership lookup failed: {0}")]
    Store(#[from] anyhow::Error),
}
