//! Current session endpoint
//!
//! Sign-in itself happens against the hosted auth provider; this server only
//! verifies the bearer token it issues.

use axum::Json;

use crate::models::profile::Session;

use super::AuthenticatedUser;

/// Current user with resolved capabilities
#[utoipa::path(
    get,
    path = "/auth/me",
    tag = "auth",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Current session", body = Session),
        (status = 401, description = "Missing or invalid token", body = crate::error::ErrorResponse)
    )
)]
pub async fn me(AuthenticatedUser(session): AuthenticatedUser) -> Json<Session> {
    Json(session)
}
