//! Checklist wizard endpoints.
//!
//! A draft lives in the draft cache until it is submitted; every field edit
//! is a tagged [`DraftCommand`] applied by the server.

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::{
        enums::SubmitStatus,
        policy::{Action, Resource},
    },
    services::checklists::NextOutcome,
    wizard::{DraftCommand, DraftView},
};

use super::AuthenticatedUser;

#[derive(Debug, Deserialize, ToSchema)]
pub struct SubmitRequest {
    /// "Rascunho" or "Finalizado"
    pub status: SubmitStatus,
}

#[derive(Serialize, ToSchema)]
pub struct SubmitResponse {
    pub id: i32,
}

/// Outcome of confirming a step
#[derive(Serialize, ToSchema)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum NextResponse {
    /// The wizard moved to the next step
    Moved { draft: DraftView },
    /// The last step was confirmed and the checklist was finalized
    Submitted { id: i32 },
}

/// Open a new wizard draft
#[utoipa::path(
    post,
    path = "/drafts",
    tag = "drafts",
    security(("bearer_auth" = [])),
    responses(
        (status = 201, description = "Draft created", body = DraftView)
    )
)]
pub async fn start_draft(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> AppResult<(StatusCode, Json<DraftView>)> {
    session.require(Resource::Checklists, Action::Create)?;
    let draft = state.services.checklists.start_draft(&session).await?;
    Ok((StatusCode::CREATED, Json(DraftView::try_from(draft)?)))
}

/// Get a draft
#[utoipa::path(
    get,
    path = "/drafts/{id}",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Draft ID")),
    responses(
        (status = 200, description = "Draft state", body = DraftView),
        (status = 404, description = "Draft not found or expired", body = crate::error::ErrorResponse)
    )
)]
pub async fn get_draft(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DraftView>> {
    session.require(Resource::Checklists, Action::Create)?;
    let draft = state.services.checklists.get_draft(id, &session).await?;
    Ok(Json(DraftView::try_from(draft)?))
}

/// Discard a draft without saving
#[utoipa::path(
    delete,
    path = "/drafts/{id}",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Draft ID")),
    responses(
        (status = 204, description = "Draft discarded")
    )
)]
pub async fn discard_draft(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<StatusCode> {
    session.require(Resource::Checklists, Action::Create)?;
    state.services.checklists.discard_draft(id, &session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Apply a field command to a draft
#[utoipa::path(
    post,
    path = "/drafts/{id}/commands",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Draft ID")),
    request_body = DraftCommand,
    responses(
        (status = 200, description = "Updated draft", body = DraftView)
    )
)]
pub async fn dispatch(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(command): Json<DraftCommand>,
) -> AppResult<Json<DraftView>> {
    session.require(Resource::Checklists, Action::Create)?;
    let draft = state.services.checklists.dispatch(id, command, &session).await?;
    Ok(Json(DraftView::try_from(draft)?))
}

/// Confirm the current step; on the last step this finalizes the checklist
#[utoipa::path(
    post,
    path = "/drafts/{id}/next",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Draft ID")),
    responses(
        (status = 200, description = "Moved or finalized", body = NextResponse),
        (status = 400, description = "Step guard failed", body = crate::error::ErrorResponse)
    )
)]
pub async fn next_step(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<NextResponse>> {
    session.require(Resource::Checklists, Action::Create)?;
    let response = match state.services.checklists.next(id, &session).await? {
        NextOutcome::Moved(draft) => NextResponse::Moved {
            draft: DraftView::try_from(draft)?,
        },
        NextOutcome::Submitted(id) => NextResponse::Submitted { id },
    };
    Ok(Json(response))
}

/// Go back one step
#[utoipa::path(
    post,
    path = "/drafts/{id}/prev",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Draft ID")),
    responses(
        (status = 200, description = "Draft state", body = DraftView)
    )
)]
pub async fn prev_step(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<Uuid>,
) -> AppResult<Json<DraftView>> {
    session.require(Resource::Checklists, Action::Create)?;
    let draft = state.services.checklists.prev(id, &session).await?;
    Ok(Json(DraftView::try_from(draft)?))
}

/// Save the draft as a checklist
#[utoipa::path(
    post,
    path = "/drafts/{id}/submit",
    tag = "drafts",
    security(("bearer_auth" = [])),
    params(("id" = Uuid, Path, description = "Draft ID")),
    request_body = SubmitRequest,
    responses(
        (status = 201, description = "Checklist saved", body = SubmitResponse),
        (status = 400, description = "Contract number missing", body = crate::error::ErrorResponse)
    )
)]
pub async fn submit_draft(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<Uuid>,
    Json(request): Json<SubmitRequest>,
) -> AppResult<(StatusCode, Json<SubmitResponse>)> {
    session.require(Resource::Checklists, Action::Create)?;
    let id = state.services.checklists.submit(id, request.status, &session).await?;
    Ok((StatusCode::CREATED, Json(SubmitResponse { id })))
}
