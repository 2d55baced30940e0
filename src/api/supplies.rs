//! Supplies API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::{
    error::AppResult,
    models::{
        policy::{Action, Resource},
        supply::{CreateSupply, Supply, UpdateSupply},
    },
};

use super::AuthenticatedUser;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SuppliesQuery {
    /// Include deactivated supplies
    #[serde(default)]
    pub include_inactive: bool,
}

/// List supplies by category
#[utoipa::path(
    get,
    path = "/supplies",
    tag = "supplies",
    security(("bearer_auth" = [])),
    params(SuppliesQuery),
    responses(
        (status = 200, description = "Supplies list", body = Vec<Supply>)
    )
)]
pub async fn list_supplies(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Query(query): Query<SuppliesQuery>,
) -> AppResult<Json<Vec<Supply>>> {
    session.require(Resource::Supplies, Action::View)?;
    let supplies = state.services.supplies.list(query.include_inactive).await?;
    Ok(Json(supplies))
}

/// Get supply by ID
#[utoipa::path(
    get,
    path = "/supplies/{id}",
    tag = "supplies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Supply ID")),
    responses(
        (status = 200, description = "Supply details", body = Supply)
    )
)]
pub async fn get_supply(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Supply>> {
    session.require(Resource::Supplies, Action::View)?;
    let supply = state.services.supplies.get_by_id(id).await?;
    Ok(Json(supply))
}

/// Create a supply
#[utoipa::path(
    post,
    path = "/supplies",
    tag = "supplies",
    security(("bearer_auth" = [])),
    request_body = CreateSupply,
    responses(
        (status = 201, description = "Supply created", body = Supply)
    )
)]
pub async fn create_supply(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(data): Json<CreateSupply>,
) -> AppResult<(StatusCode, Json<Supply>)> {
    session.require(Resource::Supplies, Action::Create)?;
    let supply = state.services.supplies.create(&data, &session).await?;
    Ok((StatusCode::CREATED, Json(supply)))
}

/// Update a supply
#[utoipa::path(
    put,
    path = "/supplies/{id}",
    tag = "supplies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Supply ID")),
    request_body = UpdateSupply,
    responses(
        (status = 200, description = "Supply updated", body = Supply)
    )
)]
pub async fn update_supply(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateSupply>,
) -> AppResult<Json<Supply>> {
    session.require(Resource::Supplies, Action::Edit)?;
    let supply = state.services.supplies.update(id, &data, &session).await?;
    Ok(Json(supply))
}

/// Delete a supply
#[utoipa::path(
    delete,
    path = "/supplies/{id}",
    tag = "supplies",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Supply ID")),
    responses(
        (status = 204, description = "Supply deleted")
    )
)]
pub async fn delete_supply(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    session.require(Resource::Supplies, Action::Delete)?;
    state.services.supplies.delete(id, &session).await?;
    Ok(StatusCode::NO_CONTENT)
}
