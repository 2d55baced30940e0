//! Recipes service

use serde_json::json;
use validator::Validate;

use super::history::HistoryService;
use crate::{
    error::AppResult,
    models::{
        profile::Session,
        recipe::{CreateRecipe, Recipe, UpdateRecipe},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct RecipesService {
    repository: Repository,
    history: HistoryService,
}

impl RecipesService {
    pub fn new(repository: Repository, history: HistoryService) -> Self {
        Self { repository, history }
    }

    pub async fn list(&self, machine_id: Option<i32>) -> AppResult<Vec<Recipe>> {
        self.repository.recipes.list(machine_id).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Recipe> {
        self.repository.recipes.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateRecipe, session: &Session) -> AppResult<Recipe> {
        data.validate()?;
        let recipe = self.repository.recipes.create(data).await?;
        self.history
            .note(session, "create", "recipes", recipe.id, json!({ "name": recipe.name }))
            .await;
        Ok(recipe)
    }

    pub async fn update(&self, id: i32, data: &UpdateRecipe, session: &Session) -> AppResult<Recipe> {
        let recipe = self.repository.recipes.update(id, data).await?;
        self.history
            .note(session, "update", "recipes", id, json!({ "name": recipe.name }))
            .await;
        Ok(recipe)
    }

    pub async fn delete(&self, id: i32, session: &Session) -> AppResult<()> {
        self.repository.recipes.delete(id).await?;
        self.history.note(session, "delete", "recipes", id, json!({})).await;
        Ok(())
    }
}
