//! Drink recipe model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Ingredient {
    pub name: String,
    /// Free-form amount (e.g. "18g", "150ml")
    pub amount: String,
}

/// Internal row structure for recipe queries
#[derive(Debug, Clone, FromRow)]
pub struct RecipeRow {
    id: i32,
    name: String,
    machine_id: Option<i32>,
    category: Option<String>,
    ingredients: Json<Vec<Ingredient>>,
    preparation: Option<String>,
    created_at: Option<DateTime<Utc>>,
}

impl From<RecipeRow> for Recipe {
    fn from(row: RecipeRow) -> Self {
        Recipe {
            id: row.id,
            name: row.name,
            machine_id: row.machine_id,
            category: row.category,
            ingredients: row.ingredients.0,
            preparation: row.preparation,
            created_at: row.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Recipe {
    pub id: i32,
    pub name: String,
    pub machine_id: Option<i32>,
    pub category: Option<String>,
    pub ingredients: Vec<Ingredient>,
    pub preparation: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateRecipe {
    #[validate(length(min = 1, message = "Recipe name is required"))]
    pub name: String,
    pub machine_id: Option<i32>,
    pub category: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
    pub preparation: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateRecipe {
    pub name: Option<String>,
    pub machine_id: Option<i32>,
    pub category: Option<String>,
    pub ingredients: Option<Vec<Ingredient>>,
    pub preparation: Option<String>,
}
