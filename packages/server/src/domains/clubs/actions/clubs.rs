use sqlx::PgPool;
use tracing::info;

use crate::common::{Actor, AppError, AppResult, Capability, ClubId};
use crate::domains::clubs::models::{Club, ClubStatus};

/// Fields of a club update; `None` leaves the field unchanged.
#[derive(Debug, Clone, Default)]
pub struct ClubChanges {
    pub name: Option<String>,
    pub description: Option<String>,
    pub status: Option<String>,
}

pub async fn list_clubs(pool: &PgPool) -> AppResult<Vec<Club>> {
    Ok(Club::find_all(pool).await?)
}

pub async fn create_club(
    actor: &Actor,
    name: &str,
    description: Option<&str>,
    pool: &PgPool,
) -> AppResult<Club> {
    actor.can(Capability::Administer).check(pool).await?;

    let name = name.trim();
    if name.is_empty() {
        return Err(AppError::invalid("Club name is required"));
    }

    let club = Club::create(name, description, pool).await?;
    info!(club_id = %club.id, name = %club.name, "Club created");
    Ok(club)
}

pub async fn update_club(
    actor: &Actor,
    club_id: ClubId,
    changes: ClubChanges,
    pool: &PgPool,
) -> AppResult<Club> {
    actor.can(Capability::Administer).check(pool).await?;

    let name = changes.name.as_deref().map(str::trim);
    if name == Some("") {
        return Err(AppError::invalid("Club name cannot be empty"));
    }
    let status = changes
        .status
        .as_deref()
        .map(str::parse::<ClubStatus>)
        .transpose()?;

    let club = Club::update(club_id, name, changes.description.as_deref(), status, pool)
        .await?
        .ok_or_else(|| AppError::not_found("Club not found"))?;

    info!(club_id = %club_id, "Club updated");
    Ok(club)
}

/// Delete a club together with its memberships, events and announcements.
pub async fn delete_club(actor: &Actor, club_id: ClubId, pool: &PgPool) -> AppResult<()> {
    actor.can(Capability::Administer).check(pool).await?;

    if !Club::delete(club_id, pool).await? {
        return Err(AppError::not_found("Club not found"));
    }
    info!(club_id = %club_id, "Club deleted");
    Ok(())
}
