//! Recipes API endpoints

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
        recipe::{CreateRecipe, Recipe, UpdateRecipe},
    },
};

use super::AuthenticatedUser;

#[derive(Debug, Deserialize, IntoParams)]
pub struct RecipesQuery {
    /// Only recipes for this machine
    pub machine_id: Option<i32>,
}

/// List recipes
#[utoipa::path(
    get,
    path = "/recipes",
    tag = "recipes",
    security(("bearer_auth" = [])),
    params(RecipesQuery),
    responses(
        (status = 200, description = "Recipes list", body = Vec<Recipe>)
    )
)]
pub async fn list_recipes(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Query(query): Query<RecipesQuery>,
) -> AppResult<Json<Vec<Recipe>>> {
    session.require(Resource::Recipes, Action::View)?;
    let recipes = state.services.recipes.list(query.machine_id).await?;
    Ok(Json(recipes))
}

/// Get recipe by ID
#[utoipa::path(
    get,
    path = "/recipes/{id}",
    tag = "recipes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 200, description = "Recipe details", body = Recipe)
    )
)]
pub async fn get_recipe(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<Json<Recipe>> {
    session.require(Resource::Recipes, Action::View)?;
    let recipe = state.services.recipes.get_by_id(id).await?;
    Ok(Json(recipe))
}

/// Create a recipe
#[utoipa::path(
    post,
    path = "/recipes",
    tag = "recipes",
    security(("bearer_auth" = [])),
    request_body = CreateRecipe,
    responses(
        (status = 201, description = "Recipe created", body = Recipe)
    )
)]
pub async fn create_recipe(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Json(data): Json<CreateRecipe>,
) -> AppResult<(StatusCode, Json<Recipe>)> {
    session.require(Resource::Recipes, Action::Create)?;
    let recipe = state.services.recipes.create(&data, &session).await?;
    Ok((StatusCode::CREATED, Json(recipe)))
}

/// Update a recipe
#[utoipa::path(
    put,
    path = "/recipes/{id}",
    tag = "recipes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Recipe ID")),
    request_body = UpdateRecipe,
    responses(
        (status = 200, description = "Recipe updated", body = Recipe)
    )
)]
pub async fn update_recipe(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
    Json(data): Json<UpdateRecipe>,
) -> AppResult<Json<Recipe>> {
    session.require(Resource::Recipes, Action::Edit)?;
    let recipe = state.services.recipes.update(id, &data, &session).await?;
    Ok(Json(recipe))
}

/// Delete a recipe
#[utoipa::path(
    delete,
    path = "/recipes/{id}",
    tag = "recipes",
    security(("bearer_auth" = [])),
    params(("id" = i32, Path, description = "Recipe ID")),
    responses(
        (status = 204, description = "Recipe deleted")
    )
)]
pub async fn delete_recipe(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Path(id): Path<i32>,
) -> AppResult<StatusCode> {
    session.require(Resource::Recipes, Action::Delete)?;
    state.services.recipes.delete(id, &session).await?;
    Ok(StatusCode::NO_CONTENT)
}
