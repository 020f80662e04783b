use thiserror::Error;

use super::auth::AuthError;

/// Errors returned by domain actions.
///
/// Every variant is reported synchronously to the caller; nothing is retried.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    Forbidden(String),

    #[error("{0}")]
    InvalidArgument(String),

    #[error("Authentication required")]
    Unauthenticated,

    #[error("{0}")]
    Conflict(String),

    #[error("Internal error: {0}")]
    Internal(anyhow::Error),
}

pub type AppResult<T> = Result<T, AppError>;

impl AppError {
    pub fn not_found(what: impl Into<String>) -> Self {
        Self::NotFound(what.into())
    }

    pub fn forbidden(why: impl Into<String>) -> Self {
        Self::Forbidden(why.into())
    }

    pub fn invalid(why: impl Into<String>) -> Self {
        Self::InvalidArgument(why.into())
    }
}

impl From<anyhow::Error> for AppError {
    fn from(err: anyhow::Error) -> Self {
        if let Some(sqlx::Error::Database(db)) = err.downcast_ref::<sqlx::Error>() {
            if db.is_unique_violation() {
                return Self::Conflict(conflict_message(db.constraint()));
            }
        }
        Self::Internal(err)
    }
}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        Self::from(anyhow::Error::from(err))
    }
}

impl From<AuthError> for AppError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::AdminRequired | AuthError::PermissionDenied(_) => {
                Self::Forbidden(err.to_string())
            }
            AuthError::Store(e) => Self::from(e),
        }
    }
}

fn conflict_message(constraint: Option<&str>) -> String {
    match constraint {
        Some("memberships_user_club_unique") => "Membership already exists for this club".into(),
        Some("participations_event_user_unique") => "Already registered for this event".into(),
        Some("clubs_name_key") => "A club with this name already exists".into(),
        Some("users_email_key") => "A user with this email already exists".into(),
        Some(other) => format!("Duplicate value violates {}", other),
        None => "Duplicate value".into(),
    }
}
