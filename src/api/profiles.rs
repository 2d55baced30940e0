//! Staff administration endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        policy::{Action, Resource},
        profile::{Profile, UpdateRole},
    },
};

use super::AuthenticatedUser;

/// List staff profiles
#[utoipa::path(
    get,
    path = "/profiles",
    tag = "profiles",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Profiles list", body = Vec<Profile>)
    )
)]
pub async fn list_profiles(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> AppResult<Json<Vec<Profile>>> {
    session.require(Resource::Users, Action::View)?;
    let profiles = state.services.profiles.list().await?;
    Ok(Json(profiles))
}

/// Get profile by ID
#[utoipa::path(
    get,
    path = "/profiles/{id}",
    tag = "profiles",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    responses(
        (status = 200, description = "Profile", body = Profile)
    )
)]
pub async fn get_profile(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<Profile>> {
    session.require(Resource::Users, Action::View)?;
    let profile = state.services.profiles.get_by_id(id).await?;
    Ok(Json(profile))
}

/// Change a staff member's role
#[utoipa::path(
    put,
    path = "/profiles/{id}/role",
    tag = "profiles",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "User ID")),
    request_body = UpdateRole,
    responses(
        (status = 200, description = "Role updated", body = Profile),
        (status = 403, description = "Missing user administration capability", body = crate::error::ErrorResponse)
    )
)]
pub async fn update_role(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(data): Json<UpdateRole>,
) -> AppResult<Json<Profile>> {
    session.require(Resource::Users, Action::Edit)?;
    let profile = state.services.profiles.update_role(id, data.role, &session).await?;
    Ok(Json(profile))
}
