//! Account bootstrap for operators.
//!
//! There is no sign-up flow; the `seed_admin` binary uses this to make sure
//! an account exists and to mint a token for it.

use anyhow::{Context, Result};
use sqlx::PgPool;
use tracing::info;

use super::JwtService;
use crate::domains::users::models::{User, UserRole};

/// Find the user with `email`, creating it if missing. When `role` is
/// `Admin` an existing member is promoted; an existing admin is never demoted.
pub async fn ensure_user(name: &str, email: &str, role: UserRole, pool: &PgPool) -> Result<User> {
    let email = email.trim().to_lowercase();

    let user = match User::find_by_email(&email, pool).await? {
        Some(user) => user,
        None => {
            let user = User::create(name, &email, role, pool).await?;
            info!(user_id = %user.id, %email, %role, "Created user");
            return Ok(user);
        }
    };

    if role == UserRole::Admin && user.role != UserRole::Admin {
        let promoted = User::update_role(user.id, UserRole::Admin, pool)
            .await?
            .context("user disappeared while promoting")?;
        info!(user_id = %promoted.id, %email, "Promoted user to admin");
        return Ok(promoted);
    }

    Ok(user)
}

/// Mint a bearer token for `user`.
pub fn issue_token(jwt: &JwtService, user: &User) -> Result<String> {
    jwt.create_token(user.id, user.role)
}
