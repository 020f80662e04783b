//! Bearer-token authentication.
//!
//! The middleware never rejects: it attaches an [`Actor`] when the token
//! verifies and passes the request on either way. Handlers that need a
//! caller take `Actor` as an extractor, which answers 401 when it is absent.

use std::sync::Arc;

use axum::{
    extract::{FromRequestParts, Request},
    http::{header::AUTHORIZATION, request::Parts, HeaderMap},
    middleware::Next,
    response::Response,
};
use tracing::debug;

use crate::common::{Actor, AppError};
use crate::domains::auth::JwtService;

pub async fn jwt_auth_middleware(
    jwt_service: Arc<JwtService>,
    mut request: Request,
    next: Next,
) -> Response {
    match actor_from_headers(request.headers(), &jwt_service) {
        Some(actor) => {
            debug!(user_id = %actor.user_id, role = %actor.role, "Authenticated request");
            request.extensions_mut().insert(actor);
        }
        None => debug!("Anonymous request"),
    }

    next.run(request).await
}

/// `Authorization: Bearer <jwt>`; a bare `<jwt>` is accepted too.
fn actor_from_headers(headers: &HeaderMap, jwt_service: &JwtService) -> Option<Actor> {
    let value = headers.get(AUTHORIZATION)?.to_str().ok()?.trim();
    let token = value.strip_prefix("Bearer ").unwrap_or(value);

    let claims = jwt_service.verify_token(token).ok()?;
    Some(Actor::new(claims.sub, claims.role))
}

#[axum::async_trait]
impl<S> FromRequestParts<S> for Actor
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<Actor>()
            .copied()
            .ok_or(AppError::Unauthenticated)
    }
}
