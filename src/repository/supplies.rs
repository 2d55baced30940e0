//! Supplies repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::supply::{CreateSupply, Supply, UpdateSupply},
};

#[derive(Clone)]
pub struct SuppliesRepository {
    pool: Pool<Postgres>,
}

impl SuppliesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List supplies grouped by category; inactive ones only on request
    pub async fn list(&self, include_inactive: bool) -> AppResult<Vec<Supply>> {
        let rows = sqlx::query_as::<_, Supply>(
            "SELECT * FROM supplies WHERE active OR $1 ORDER BY category, name",
        )
        .bind(include_inactive)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Supply> {
        sqlx::query_as::<_, Supply>("SELECT * FROM supplies WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Supply {} not found", id)))
    }

    pub async fn create(&self, data: &CreateSupply) -> AppResult<Supply> {
        let row = sqlx::query_as::<_, Supply>(
            r#"
            INSERT INTO supplies (name, category, unit, unit_price)
            VALUES ($1, $2, $3, $4)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.category)
        .bind(&data.unit)
        .bind(data.unit_price)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateSupply) -> AppResult<Supply> {
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
        add_field!(data.unit_price, "unit_price");
        add_field!(data.active, "active");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!("UPDATE supplies SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);
        let mut builder = sqlx::query_as::<_, Supply>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field { builder = builder.bind(val); }
            };
        }

        bind_field!(data.name);
        bind_field!(data.category);
        bind_field!(data.unit);
        bind_field!(data.unit_price);
        bind_field!(data.active);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Supply {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM supplies WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Supply {} not found", id)));
        }
        Ok(())
    }
}
