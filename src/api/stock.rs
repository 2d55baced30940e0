//! Stock count endpoints

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::{
    error::AppResult,
    models::{
        policy::{Action, Resource},
        stock::{CreateStockItem, StockCount, StockItemView, UpdateStockItem},
    },
};

use super::AuthenticatedUser;

/// List stock items with their below-minimum flag
#[utoipa::path(
    get,
    path = "/stock",
    tag = "stock",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Stock list", body = Vec<StockItemView>)
    )
)]
pub async fn list_stock(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> AppResult<Json<Vec<StockItemView>>> {
    session.require(Resource::Stock, Action::View)?;
    let items = state.services.stock.list().await?;
    Ok(Json(items.into_iter().map(StockItemView::from).collect()))
}

/// Get stock item by ID
#[utoipa::path(
    get,
    path = "/stock/{id}",
    tag = "stock",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Stock item ID")),
    responses(
        (status = 200, description = "Stock item", body = StockItemView)
    )
)]
pub async fn get_stock_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<StockItemView>> {
    session.require(Resource::Stock, Action::View)?;
    let item = state.services.stock.get_by_id(id).await?;
    Ok(Json(item.into()))
}

/// Create a stock item
#[utoipa::path(
    post,
    path = "/stock",
    tag = "stock",
    security(("bearer_auth" = [])),
    request_body = CreateStockItem,
    responses(
        (status = 201, description = "Stock item created", body = StockItemView)
    )
)]
pub async fn create_stock_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(data): Json<CreateStockItem>,
) -> AppResult<(StatusCode, Json<StockItemView>)> {
    session.require(Resource::Stock, Action::Create)?;
    let item = state.services.stock.create(&data, &session).await?;
    Ok((StatusCode::CREATED, Json(item.into())))
}

/// Update a stock item
#[utoipa::path(
    put,
    path = "/stock/{id}",
    tag = "stock",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Stock item ID")),
    request_body = UpdateStockItem,
    responses(
        (status = 200, description = "Stock item updated", body = StockItemView)
    )
)]
pub async fn update_stock_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateStockItem>,
) -> AppResult<Json<StockItemView>> {
    session.require(Resource::Stock, Action::Edit)?;
    let item = state.services.stock.update(id, &data, &session).await?;
    Ok(Json(item.into()))
}

/// Record a physical count
#[utoipa::path(
    post,
    path = "/stock/{id}/count",
    tag = "stock",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Stock item ID")),
    request_body = StockCount,
    responses(
        (status = 200, description = "Count recorded", body = StockItemView)
    )
)]
pub async fn count_stock_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<StockCount>,
) -> AppResult<Json<StockItemView>> {
    session.require(Resource::Stock, Action::Edit)?;
    let item = state.services.stock.count(id, &data, &session).await?;
    Ok(Json(item.into()))
}

/// Delete a stock item
#[utoipa::path(
    delete,
    path = "/stock/{id}",
    tag = "stock",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Stock item ID")),
    responses(
        (status = 204, description = "Stock item deleted")
    )
)]
pub async fn delete_stock_item(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    session.require(Resource::Stock, Action::Delete)?;
    state.services.stock.delete(id, &session).await?;
    Ok(StatusCode::NO_CONTENT)
}
