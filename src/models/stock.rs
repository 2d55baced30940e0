//! Stock count model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::ToSchema;
use validator::Validate;

#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct StockItem {
    pub id: i32,
    pub name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub quantity: i32,
    pub min_quantity: i32,
    pub counted_at: Option<DateTime<Utc>>,
    pub created_at: Option<DateTime<Utc>>,
}

impl StockItem {
    pub fn below_minimum(&self) -> bool {
        self.quantity < self.min_quantity
    }
}

/// Stock item with derived flags, as returned by the API
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct StockItemView {
    #[serde(flatten)]
    pub item: StockItem,
    pub below_minimum: bool,
}

impl From<StockItem> for StockItemView {
    fn from(item: StockItem) -> Self {
        let below_minimum = item.below_minimum();
        Self { item, below_minimum }
    }
}

#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateStockItem {
    #[validate(length(min = 1, message = "Item name is required"))]
    pub name: String,
    pub category: Option<String>,
    pub unit: Option<String>,
    #[validate(range(min = 0, message = "Quantity cannot be negative"))]
    #[serde(default)]
    pub quantity: i32,
    #[validate(range(min = 0, message = "Minimum cannot be negative"))]
    #[serde(default)]
    pub min_quantity: i32,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateStockItem {
    pub name: Option<String>,
    pub category: Option<String>,
    pub unit: Option<String>,
    pub min_quantity: Option<i32>,
}

/// Record a new physical count
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct StockCount {
    #[validate(range(min = 0, message = "Counted quantity cannot be negative"))]
    pub quantity: i32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_below_minimum_flag() {
        let item = StockItem {
            id: 1,
            name: "Copo 180ml".into(),
            category: None,
            unit: Some("pacote".into()),
            quantity: 3,
            min_quantity: 5,
            counted_at: None,
            created_at: None,
        };
        let view = StockItemView::from(item);
        assert!(view.below_minimum);
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["below_minimum"], true);
        assert_eq!(json["name"], "Copo 180ml");
    }
}
