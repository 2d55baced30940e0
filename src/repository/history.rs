//! Audit history repository

use sqlx::{Pool, Postgres};

use crate::{
    error::AppResult,
    models::history::{HistoryEntry, HistoryQuery, NewHistoryEntry},
};

/// Default and maximum page size for history listings
const DEFAULT_LIMIT: i64 = 100;
const MAX_LIMIT: i64 = 500;

#[derive(Clone)]
pub struct HistoryRepository {
    pool: Pool<Postgres>,
}

impl HistoryRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    pub async fn insert(&self, entry: &NewHistoryEntry) -> AppResult<HistoryEntry> {
        let row = sqlx::query_as::<_, HistoryEntry>(
            r#"
            INSERT INTO app_history (actor, action, entity, entity_id, details)
            VALUES ($1, $2, $3, $4, $5)
            RETURNING *
            "#,
        )
        .bind(&entry.actor)
        .bind(entry.action)
        .bind(entry.entity)
        .bind(&entry.entity_id)
        .bind(&entry.details)
        .fetch_one(&self.pool)
        .await?;
        Ok(row)
    }

    /// Most recent entries first
    pub async fn list(&self, query: &HistoryQuery) -> AppResult<Vec<HistoryEntry>> {
        let limit = query.limit.unwrap_or(DEFAULT_LIMIT).clamp(1, MAX_LIMIT);
        let rows = sqlx::query_as::<_, HistoryEntry>(
            r#"
            SELECT * FROM app_history
            WHERE $1::text IS NULL OR entity = $1
            ORDER BY created_at DESC, id DESC
            LIMIT $2
            "#,
        )
        .bind(&query.entity)
        .bind(limit)
        .fetch_all(&self.pool)
        .await?;
        Ok(rows)
    }
}
