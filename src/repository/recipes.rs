//! Recipes repository

use sqlx::{types::Json, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::recipe::{CreateRecipe, Recipe, RecipeRow, UpdateRecipe},
};

#[derive(Clone)]
pub struct RecipesRepository {
    pool: Pool<Postgres>,
}

impl RecipesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List recipes, optionally only those for one machine
    pub async fn list(&self, machine_id: Option<i32>) -> AppResult<Vec<Recipe>> {
        let rows = sqlx::query_as::<_, RecipeRow>(
            "SELECT * FROM recipes WHERE $1::int IS NULL OR machine_id = $1 ORDER BY name",
        )
        .bind(machine_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Recipe::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Recipe> {
        sqlx::query_as::<_, RecipeRow>("SELECT * FROM recipes WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Recipe::from)
            .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))
    }

    pub async fn create(&self, data: &CreateRecipe) -> AppResult<Recipe> {
        let row = sqlx::query_as::<_, RecipeRow>(
            r#"
            INSERT INTO recipes (name, machine_id, category, ingredients, preparation)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(data.machine_id)
        .bind(&data.category)
        .bind(Json(&data.ingredients))
        .bind(&data.preparation)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    pub async fn update(&self, id: i32, data: &UpdateRecipe) -> AppResult<Recipe> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.machine_id, "machine_id");
        add_field!(data.category, "category");
        add_field!(data.ingredients, "ingredients");
        add_field!(data.preparation, "preparation");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!("UPDATE recipes SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);
        let mut builder = sqlx::query_as::<_, RecipeRow>(&query);

        if let Some(ref name) = data.name { builder = builder.bind(name); }
        if let Some(machine_id) = data.machine_id { builder = builder.bind(machine_id); }
        if let Some(ref category) = data.category { builder = builder.bind(category); }
        if let Some(ref ingredients) = data.ingredients { builder = builder.bind(Json(ingredients)); }
        if let Some(ref preparation) = data.preparation { builder = builder.bind(preparation); }

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Recipe::from)
            .ok_or_else(|| AppError::NotFound(format!("Recipe {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM recipes WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Recipe {} not found", id)));
        }
        Ok(())
    }
}
