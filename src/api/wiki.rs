//! Maintenance wiki endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        policy::{Action, Resource},
        wiki::{CreateWikiSolution, UpdateWikiSolution, WikiQuery, WikiSolution},
    },
};

use super::AuthenticatedUser;

/// Search solutions
#[utoipa::path(
    get,
    path = "/wiki",
    tag = "wiki",
    security(("bearer_auth" = [])),
    params(WikiQuery),
    responses(
        (status = 200, description = "Matching solutions", body = Vec<WikiSolution>)
    )
)]
pub async fn search_solutions(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Query(query): Query<WikiQuery>,
) -> AppResult<Json<Vec<WikiSolution>>> {
    session.require(Resource::Wiki, Action::View)?;
    let solutions = state.services.wiki.search(&query).await?;
    Ok(Json(solutions))
}

/// Get solution by ID
#[utoipa::path(
    get,
    path = "/wiki/{id}",
    tag = "wiki",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Solution ID")),
    responses(
        (status = 200, description = "Solution details", body = WikiSolution)
    )
)]
pub async fn get_solution(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<WikiSolution>> {
    session.require(Resource::Wiki, Action::View)?;
    let solution = state.services.wiki.get_by_id(id).await?;
    Ok(Json(solution))
}

/// Create a solution
#[utoipa::path(
    post,
    path = "/wiki",
    tag = "wiki",
    security(("bearer_auth" = [])),
    request_body = CreateWikiSolution,
    responses(
        (status = 201, description = "Solution created", body = WikiSolution)
    )
)]
pub async fn create_solution(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(data): Json<CreateWikiSolution>,
) -> AppResult<(StatusCode, Json<WikiSolution>)> {
    session.require(Resource::Wiki, Action::Create)?;
    let solution = state.services.wiki.create(data, &session).await?;
    Ok((StatusCode::CREATED, Json(solution)))
}

/// Update a solution
#[utoipa::path(
    put,
    path = "/wiki/{id}",
    tag = "wiki",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Solution ID")),
    request_body = UpdateWikiSolution,
    responses(
        (status = 200, description = "Solution updated", body = WikiSolution)
    )
)]
pub async fn update_solution(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateWikiSolution>,
) -> AppResult<Json<WikiSolution>> {
    session.require(Resource::Wiki, Action::Edit)?;
    let solution = state.services.wiki.update(id, data, &session).await?;
    Ok(Json(solution))
}

/// Delete a solution
#[utoipa::path(
    delete,
    path = "/wiki/{id}",
    tag = "wiki",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Solution ID")),
    responses(
        (status = 204, description = "Solution deleted")
    )
)]
pub async fn delete_solution(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    session.require(Resource::Wiki, Action::Delete)?;
    state.services.wiki.delete(id, &session).await?;
    Ok(StatusCode::NO_CONTENT)
}
