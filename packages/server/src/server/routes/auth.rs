use axum::{extract::Extension, routing::get, Json, Router};

use crate::common::{Actor, AppResult};
use crate::domains::users::actions;
use crate::domains::users::models::User;
use crate::server::app::AppState;

pub fn router() -> Router {
    Router::new().route("/me", get(me))
}

/// The caller's own account.
async fn me(Extension(state): Extension<AppState>, actor: Actor) -> AppResult<Json<User>> {
    Ok(Json(actions::current_user(&actor, &state.db_pool).await?))
}
