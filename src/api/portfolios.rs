//! Portfolio (sales proposal) endpoints

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::Response,
    Json,
};

use crate::{
    documents::Document,
    error::AppResult,
    models::{
        policy::{Action, Resource},
        portfolio::{CreatePortfolio, PortfolioView, UpdatePortfolio},
    },
};

use super::{
    documents::{respond, DocumentQuery},
    AuthenticatedUser,
};

/// List proposals with computed totals
#[utoipa::path(
    get,
    path = "/portfolios",
    tag = "portfolios",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Proposals list", body = Vec<PortfolioView>)
    )
)]
pub async fn list_portfolios(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> AppResult<Json<Vec<PortfolioView>>> {
    session.require(Resource::Portfolios, Action::View)?;
    let portfolios = state.services.portfolios.list().await?;
    let views = portfolios
        .into_iter()
        .map(PortfolioView::try_from)
        .collect::<AppResult<Vec<_>>>()?;
    Ok(Json(views))
}

/// Get proposal by ID
#[utoipa::path(
    get,
    path = "/portfolios/{id}",
    tag = "portfolios",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Portfolio ID")),
    responses(
        (status = 200, description = "Proposal details", body = PortfolioView)
    )
)]
pub async fn get_portfolio(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<PortfolioView>> {
    session.require(Resource::Portfolios, Action::View)?;
    let portfolio = state.services.portfolios.get_by_id(id).await?;
    Ok(Json(PortfolioView::try_from(portfolio)?))
}

/// Create a proposal
#[utoipa::path(
    post,
    path = "/portfolios",
    tag = "portfolios",
    security(("bearer_auth" = [])),
    request_body = CreatePortfolio,
    responses(
        (status = 201, description = "Proposal created", body = PortfolioView)
    )
)]
pub async fn create_portfolio(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(data): Json<CreatePortfolio>,
) -> AppResult<(StatusCode, Json<PortfolioView>)> {
    session.require(Resource::Portfolios, Action::Create)?;
    let portfolio = state.services.portfolios.create(&data, &session).await?;
    Ok((StatusCode::CREATED, Json(PortfolioView::try_from(portfolio)?)))
}

/// Update a proposal
#[utoipa::path(
    put,
    path = "/portfolios/{id}",
    tag = "portfolios",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Portfolio ID")),
    request_body = UpdatePortfolio,
    responses(
        (status = 200, description = "Proposal updated", body = PortfolioView)
    )
)]
pub async fn update_portfolio(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdatePortfolio>,
) -> AppResult<Json<PortfolioView>> {
    session.require(Resource::Portfolios, Action::Edit)?;
    let portfolio = state.services.portfolios.update(id, &data, &session).await?;
    Ok(Json(PortfolioView::try_from(portfolio)?))
}

/// Delete a proposal
#[utoipa::path(
    delete,
    path = "/portfolios/{id}",
    tag = "portfolios",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Portfolio ID")),
    responses(
        (status = 204, description = "Proposal deleted")
    )
)]
pub async fn delete_portfolio(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    session.require(Resource::Portfolios, Action::Delete)?;
    state.services.portfolios.delete(id, &session).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Printable proposal
#[utoipa::path(
    get,
    path = "/portfolios/{id}/document",
    tag = "portfolios",
    security(("bearer_auth" = [])),
    params(
        ("id" = i32, Path, description = "Portfolio ID"),
        DocumentQuery
    ),
    responses(
        (status = 200, description = "Document tree, or plain text with format=text", body = Document)
    )
)]
pub async fn portfolio_document(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Query(query): Query<DocumentQuery>,
) -> AppResult<Response> {
    session.require(Resource::Portfolios, Action::View)?;
    let document = state.services.portfolios.proposal(id).await?;
    Ok(respond(document, query.format))
}
