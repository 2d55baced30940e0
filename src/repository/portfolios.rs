//! Portfolios repository

use rust_decimal::Decimal;
use sqlx::{types::Json, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::portfolio::{CreatePortfolio, Portfolio, PortfolioRow, UpdatePortfolio},
};

#[derive(Clone)]
pub struct PortfoliosRepository {
    pool: Pool<Postgres>,
}

impl PortfoliosRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn list(&self) -> AppResult<Vec<Portfolio>> {
        let rows = sqlx::query_as::<_, PortfolioRow>(
            "SELECT * FROM portfolios ORDER BY created_at DESC, id DESC",
        )
        .fetch_all(&self.pool)
        .await?;
        Ok(rows.into_iter().map(Portfolio::from).collect())
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Portfolio> {
        sqlx::query_as::<_, PortfolioRow>("SELECT * FROM portfolios WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Portfolio::from)
            .ok_or_else(|| AppError::NotFound(format!("Portfolio {} not found", id)))
    }

    pub async fn create(&self, data: &CreatePortfolio) -> AppResult<Portfolio> {
        let row = sqlx::query_as::<_, PortfolioRow>(
            r#"
            INSERT INTO portfolios (client_name, contact, machine_id, lines, discount, valid_until, notes)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING *
            "#,
        )
        .bind(&data.client_name)
        .bind(&data.contact)
        .bind(data.machine_id)
        .bind(Json(&data.lines))
        .bind(data.discount.unwrap_or(Decimal::ZERO))
        .bind(data.valid_until)
        .bind(&data.notes)
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    pub async fn update(&self, id: i32, data: &UpdatePortfolio) -> AppResult<Portfolio> {
        let mut sets: Vec<String> = Vec::new();
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_field!(data.client_name, "client_name");
        add_field!(data.contact, "contact");
        add_field!(data.machine_id, "machine_id");
        add_field!(data.lines, "lines");
        add_field!(data.discount, "discount");
        add_field!(data.valid_until, "valid_until");
        add_field!(data.notes, "notes");
        add_field!(data.status, "status");

        if sets.is_empty() {
            return self.get_by_id(id).await;
        }

        let query = format!("UPDATE portfolios SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);
        let mut builder = sqlx::query_as::<_, PortfolioRow>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field { builder = builder.bind(val); }
            };
        }

        bind_field!(data.client_name);
        bind_field!(data.contact);
        bind_field!(data.machine_id);
        if let Some(ref lines) = data.lines { builder = builder.bind(Json(lines)); }
        bind_field!(data.discount);
        bind_field!(data.valid_until);
        bind_field!(data.notes);
        bind_field!(data.status);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Portfolio::from)
            .ok_or_else(|| AppError::NotFound(format!("Portfolio {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM portfolios WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Portfolio {} not found", id)));
        }
        Ok(())
    }
}
