//! Persisted checklist endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    documents::Document,
    error::AppResult,
    models::{
        checklist::{Checklist, ChecklistQuery, ChecklistShort},
        policy::{Action, Resource},
    },
};

use super::{
    documents::{respond, DocumentQuery},
    AuthenticatedUser,
};

/// Paginated checklists response
#[derive(Serialize, ToSchema)]
pub struct ChecklistsListResponse {
    pub checklists: Vec<ChecklistShort>,
    pub total: i64,
}

/// List checklists, newest first
#[utoipa::path(
    get,
    path = "/checklists",
    tag = "checklists",
    security(("bearer_auth" = [])),
    params(ChecklistQuery),
    responses(
        (status = 200, description = "Checklists list", body = ChecklistsListResponse)
    )
)]
pub async fn list_checklists(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Query(query): Query<ChecklistQuery>,
) -> AppResult<Json<ChecklistsListResponse>> {
    session.require(Resource::Checklists, Action::View)?;
    let (checklists, total) = state.services.checklists.list(&query).await?;
    Ok(Json(ChecklistsListResponse { checklists, total }))
}

/// Get checklist by ID
#[utoipa::path(
    get,
    path = "/checklists/{id}",
    tag = "checklists",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Checklist ID")),
    responses(
        (status = 200, description = "Checklist details", body = Checklist),
        (status = 404, description = "Checklist not found", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_checklist(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Checklist>> {
    session.require(Resource::Checklists, Action::View)?;
    let checklist = state.services.checklists.get_by_id(id).await?;
    Ok(Json(checklist))
}

/// Cancel a checklist
#[utoipa::path(
    post,
    path = "/checklists/{id}/cancel",
    tag = "checklists",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Checklist ID")),
    responses(
        (status = 200, description = "Checklist cancelled", body = Checklist),
        (status = 409, description = "Already cancelled", body = crate::error::ErrorResponse)
    )
)]
pub async fn cancel_checklist(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Checklist>> {
    session.require(Resource::Checklists, Action::Edit)?;
    let checklist = state.services.checklists.cancel(id, &session).await?;
    Ok(Json(checklist))
}

/// Delete a checklist
#[utoipa::path(
    delete,
    path = "/checklists/{id}",
    tag = "checklists",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Checklist ID")),
    responses(
        (status = 204, description = "Checklist deleted"),
        (status = 403, description = "Missing delete capability", body = crate::error::ErrorResponse)
    )
)]
pub async fn delete_checklist(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    session.require(Resource::Checklists, Action::Delete)?;
    state.services.checklists.delete(id, &session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Printable report of a filled checklist
#[utoipa::path(
    get,
    path = "/checklists/{id}/document",
    tag = "checklists",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Checklist ID"),
        DocumentQuery
    ),
    responses(
        (status = 200, description = "Document tree, or plain text with format=text", body = Document)
    )
)]
pub async fn checklist_document(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(query): Query<DocumentQuery>,
) -> AppResult<Response> {
    session.require(Resource::Checklists, Action::View)?;
    let document = state.services.checklists.report(id).await?;
    Ok(respond(document, query.format))
}
