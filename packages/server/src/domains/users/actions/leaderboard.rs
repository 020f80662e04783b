use sqlx::PgPool;

use crate::common::{AppResult, Pagination};
use crate::domains::users::models::{LeaderboardEntry, User};

/// Non-admin users by points, highest first. Only `page.limit` is honoured.
pub async fn leaderboard(page: Pagination, pool: &PgPool) -> AppResult<Vec<LeaderboardEntry>> {
    Ok(User::leaderboard(page.limit(), pool).await?)
}
