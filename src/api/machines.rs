//! Machine catalog API endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};
use serde::Deserialize;
use utoipa::IntoParams;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        machine::{CreateMachine, Machine, MachineSpecs, UpdateMachine, VariantInput},
        policy::{Action, Resource},
    },
};

use super::AuthenticatedUser;

#[derive(Debug, Deserialize, IntoParams)]
pub struct SpecsQuery {
    /// Variant whose overrides should be applied
    pub variant_id: Option<Uuid>,
}

/// List catalog machines
#[utoipa::path(
    get,
    path = "/machines",
    tag = "machines",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Machines list", body = Vec<Machine>)
    )
)]
pub async fn list_machines(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> AppResult<Json<Vec<Machine>>> {
    session.require(Resource::Machines, Action::View)?;
    let machines = state.services.machines.list().await?;
    Ok(Json(machines))
}

/// Get machine by ID
#[utoipa::path(
    get,
    path = "/machines/{id}",
    tag = "machines",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Machine ID")),
    responses(
        (status = 200, description = "Machine details", body = Machine),
        (status = 404, description = "Machine not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_machine(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Machine>> {
    session.require(Resource::Machines, Action::View)?;
    let machine = state.services.machines.get_by_id(id).await?;
    Ok(Json(machine))
}

/// Resolved specs of a machine, optionally for one of its variants
#[utoipa::path(
    get,
    path = "/machines/{id}/specs",
    tag = "machines",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Machine ID"), SpecsQuery),
    responses(
        (status = 200, description = "Resolved specs", body = MachineSpecs),
        (status = 404, description = "Machine or variant not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_machine_specs(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(query): Query<SpecsQuery>,
) -> AppResult<Json<MachineSpecs>> {
    session.require(Resource::Machines, Action::View)?;
    let specs = state.services.machines.specs(id, query.variant_id).await?;
    Ok(Json(specs))
}

/// Create a machine
#[utoipa::path(
    post,
    path = "/machines",
    tag = "machines",
    security(("bearer_auth" = [])),
    request_body = CreateMachine,
    responses(
        (status = 201, description = "Machine created", body = Machine),
        (status = 400, description = "Invalid input", body = crate::error::ErrorResponse)
    )
)]
pub async fn create_machine(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(data): Json<CreateMachine>,
) -> AppResult<(StatusCode, Json<Machine>)> {
    session.require(Resource::Machines, Action::Create)?;
    let machine = state.services.machines.create(&data, &session).await?;
    Ok((StatusCode::CREATED, Json(machine)))
}

/// Update a machine
#[utoipa::path(
    put,
    path = "/machines/{id}",
    tag = "machines",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Machine ID")),
    request_body = UpdateMachine,
    responses(
        (status = 200, description = "Machine updated", body = Machine)
    )
)]
pub async fn update_machine(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateMachine>,
) -> AppResult<Json<Machine>> {
    session.require(Resource::Machines, Action::Edit)?;
    let machine = state.services.machines.update(id, &data, &session).await?;
    Ok(Json(machine))
}

/// Delete a machine
#[utoipa::path(
    delete,
    path = "/machines/{id}",
    tag = "machines",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Machine ID")),
    responses(
        (status = 204, description = "Machine deleted"),
        (status = 409, description = "Machine still referenced by checklists", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_machine(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    session.require(Resource::Machines, Action::Delete)?;
    state.services.machines.delete(id, &session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Add a model variant
#[utoipa::path(
    post,
    path = "/machines/{id}/variants",
    tag = "machines",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Machine ID")),
    request_body = VariantInput,
    responses(
        (status = 201, description = "Variant added", body = Machine)
    )
)]
pub async fn add_variant(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<VariantInput>,
) -> AppResult<(StatusCode, Json<Machine>)> {
    session.require(Resource::Machines, Action::Edit)?;
    let machine = state.services.machines.add_variant(id, data, &session).await?;
    Ok((StatusCode::CREATED, Json(machine)))
}

/// Replace a model variant
#[utoipa::path(
    put,
    path = "/machines/{id}/variants/{variant_id}",
    tag = "machines",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Machine ID"),
        ("variant_id" = Uuid, Path, description = "Variant ID")
    ),
    request_body = VariantInput,
    responses(
        (status = 200, description = "Variant updated", body = Machine)
    )
)]
pub async fn update_variant(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path((id, variant_id)): Path<(i32, Uuid)>,
    Json(data): Json<VariantInput>,
) -> AppResult<Json<Machine>> {
    session.require(Resource::Machines, Action::Edit)?;
    let machine = state.services.machines.update_variant(id, variant_id, data, &session).await?;
    Ok(Json(machine))
}

/// Remove a model variant
#[utoipa::path(
    delete,
    path = "/machines/{id}/variants/{variant_id}",
    tag = "machines",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Machine ID"),
        ("variant_id" = Uuid, Path, description = "Variant ID")
    ),
    responses(
        (status = 200, description = "Variant removed", body = Machine)
    )
)]
pub async fn remove_variant(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path((id, variant_id)): Path<(i32, Uuid)>,
) -> AppResult<Json<Machine>> {
    session.require(Resource::Machines, Action::Edit)?;
    let machine = state.services.machines.remove_variant(id, variant_id, &session).await?;
    Ok(Json(machine))
}
