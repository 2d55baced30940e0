//! Stock repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::stock::{CreateStockItem, StockItem, UpdateStockItem},
};

#[derive(Clone)]
pub struct StockRepository {
    pool: Pool<Postgres>,
}

impl StockRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<StockItem>> {
        let rows = sqlx::query_as::<_, StockItem>(
            "SELECT * FROM stock_items ORDER BY category NULLS LAST, name",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<StockItem> {
        sqlx::query_as::<_, StockItem>("SELECT * FROM stock_items WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Stock item {} not found", id)))
    }

    pub async fn create(&self, data: &CreateStockItem) -> AppResult<StockItem> {
        let row = sqlx::query_as::<_, StockItem>(
            r#"
            INSERT INTO stock_items (name, category, unit, quantity, min_quantity, counted_at)
            VALUES ($1, $2, $3, $4, $5, NOW())
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.category)
        .bind(&data.unit)
        .bind(data.quantity)
        .bind(data.min_quantity)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateStockItem) -> AppResult<StockItem> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.category, "category");
        add_field!(data.unit, "unit");
        add_field!(data.min_quantity, "min_quantity");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!("UPDATE stock_items SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);
        let mut builder = sqlx::query_as::<_, StockItem>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field { builder = builder.bind(val); }
            };
        }

        bind_field!(data.name);
        bind_field!(data.category);
        bind_field!(data.unit);
        bind_field!(data.min_quantity);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Stock item {} not found", id)))
    }

    /// Record a physical count, stamping the count time
    pub async fn record_count(&self, id: i32, quantity: i32) -> AppResult<StockItem> {
        sqlx::query_as::<_, StockItem>(
            "UPDATE stock_items SET quantity = $1, counted_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(quantity)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Stock item {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM stock_items WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Stock item {} not found", id)));
        }
        Ok(())
    }
}
