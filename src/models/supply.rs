//! Supply (consumable) catalog model

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

/// Supply record
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct Supply {
    pub id: i32,
    pub name: String,
    /// Grouping used by the checklist supplies step (e.g. "Cafés", "Descartáveis")
    pub category: String,
    /// Sales unit (e.g. "kg", "pacote")
    pub unit: Option<String>,
    #[serde(with = "rust_decimal::serde::float_option")]
    pub unit_price: Option<Decimal>,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
}

/// Create supply request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateSupply {
    #[validate(length(min = 1, message = "Supply name is required"))]
    pub name: String,
    #[validate(length(min = 1, message = "Supply category is required"))]
    pub category: String,
    pub unit: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub unit_price: Option<Decimal>,
}

/// Update supply request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateSupply {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub unit_price: Option<Decimal>,
    pub active: Option<bool>,
}
