//! Maintenance wiki model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};
use validator::Validate;

/// Known problem and its fix
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct WikiSolution {
    pub id: i32,
    pub title: String,
    pub machine_id: Option<i32>,
    pub problem: String,
    pub solution: String,
    pub tags: Vec<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateWikiSolution {
    #[validate(length(min = 1, message = "Title is required"))]
    pub title: String,
    pub machine_id: Option<i32>,
    #[validate(length(min = 1, message = "Problem description is required"))]
    pub problem: String,
    #[validate(length(min = 1, message = "Solution is required"))]
    pub solution: String,
    #[serde(default)]
    pub tags: Vec<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateWikiSolution {
    pub title: Option<String>,
    pub machine_id: Option<i32>,
    pub problem: Option<String>,
    pub solution: Option<String>,
    pub tags: Option<Vec<String>>,
}

/// Wiki search parameters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct WikiQuery {
    /// Case-insensitive match on title, problem or solution
    pub q: Option<String>,
    pub machine_id: Option<i32>,
}
