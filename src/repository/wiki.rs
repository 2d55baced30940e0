//! Maintenance wiki repository

use sqlx::{Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::wiki::{CreateWikiSolution, UpdateWikiSolution, WikiQuery, WikiSolution},
};

#[derive(Clone)]
pub struct WikiRepository {
    pool: Pool<Postgres>,
}

impl WikiRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// Search solutions by free text and/or machine
    pub async fn search(&self, query: &WikiQuery) -> AppResult<Vec<WikiSolution>> {
        let pattern = query
            .q
            .as_deref()
            .map(str::trim)
            .filter(|q| !q.is_empty())
            .map(|q| format!("%{}%", q.replace('%', "\\%").replace('_', "\\_")));

        let rows = sqlx::query_as::<_, WikiSolution>(
            r#"
            SELECT * FROM wiki_solutions
            WHERE ($1::text IS NULL
                   OR title ILIKE $1 OR problem ILIKE $1 OR solution ILIKE $1
                   OR $2 = ANY(tags))
              AND ($3::int IS NULL OR machine_id = $3)
            ORDER BY updated_at DESC NULLS LAST, id DESC
            "#,
        )
        .bind(&pattern)
        .bind(query.q.as_deref().map(str::trim))
        .bind(query.machine_id)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<WikiSolution> {
        sqlx::query_as::<_, WikiSolution>("SELECT * FROM wiki_solutions WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Wiki solution {} not found", id)))
    }

    pub async fn create(&self, data: &CreateWikiSolution) -> AppResult<WikiSolution> {
        let row = sqlx::query_as::<_, WikiSolution>(
            r#"
            INSERT INTO wiki_solutions (title, machine_id, problem, solution, tags)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&data.title)
        .bind(data.machine_id)
        .bind(&data.problem)
        .bind(&data.solution)
        .bind(&data.tags)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    pub async fn update(&self, id: i32, data: &UpdateWikiSolution) -> AppResult<WikiSolution> {
        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_field!(data.title, "title");
        add_field!(data.machine_id, "machine_id");
        add_field!(data.problem, "problem");
        add_field!(data.solution, "solution");
        add_field!(data.tags, "tags");

        let query = format!("UPDATE wiki_solutions SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);
        let mut builder = sqlx::query_as::<_, WikiSolution>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field { builder = builder.bind(val); }
            };
        }

        bind_field!(data.title);
        bind_field!(data.machine_id);
        bind_field!(data.problem);
        bind_field!(data.solution);
        bind_field!(data.tags);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Wiki solution {} not found", id)))
    }

    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM wiki_solutions WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Wiki solution {} not found", id)));
        }
        Ok(())
    }
}
