//! Checklists repository

use async_trait::async_trait;
use sqlx::{types::Json, Pool, Postgres};

use crate::{
    error::{AppError, AppResult},
    models::{
        checklist::{Checklist, ChecklistQuery, ChecklistRow, ChecklistShort, NewChecklist},
        enums::ChecklistStatus,
    },
    wizard::ChecklistSink,
};

/// LIMIT and OFFSET for a 1-based page; pages past the addressable range are rejected
fn page_window(page: Option<i64>, per_page: Option<i64>) -> AppResult<(i64, i64)> {
    let page = page.unwrap_or(1).max(1);
    let per_page = per_page.unwrap_or(50).clamp(1, 200);
    let offset = (page - 1)
        .checked_mul(per_page)
        .ok_or_else(|| AppError::BadRequest(format!("Page {} is out of range", page)))?;
    Ok((per_page, offset))
}

#[derive(Clone)]
pub struct ChecklistsRepository {
    pool: Pool<Postgres>,
}

impl ChecklistsRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List checklists, newest first, with optional status filter and pagination
    pub async fn list(&self, query: &ChecklistQuery) -> AppResult<(Vec<ChecklistShort>, i64)> {
        let (per_page, offset) = page_window(query.page, query.per_page)?;

        let where_clause = if query.status.is_some() {
            "WHERE status = $1"
        } else {
            ""
        };

        let count_q = format!("SELECT COUNT(*) FROM checklists {}", where_clause);
        let mut count_builder = sqlx::query_scalar::<_, i64>(&count_q);
        if let Some(status) = query.status { count_builder = count_builder.bind(status); }
        let total = count_builder.fetch_one(&self.pool).await?;

        let select_q = format!(
            r#"
            SELECT id, install_type, client_name, event_name, install_date,
                   machine_name, quantity, contract_num, status, created_at
            FROM checklists {}
            ORDER BY created_at DESC, id DESC
            LIMIT {} OFFSET {}
            "#,
            where_clause, per_page, offset
        );
        let mut builder = sqlx::query_as::<_, ChecklistShort>(&select_q);
        if let Some(status) = query.status { builder = builder.bind(status); }

        let rows = builder.fetch_all(&self.pool).await?;
        Ok((rows, total))
    }

    /// Get checklist by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Checklist> {
        sqlx::query_as::<_, ChecklistRow>("SELECT * FROM checklists WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Checklist::from)
            .ok_or_else(|| AppError::NotFound(format!("Checklist {} not found", id)))
    }

    /// Insert a composed checklist and return its id
    pub async fn create(&self, record: &NewChecklist) -> AppResult<i32> {
        let id = sqlx::query_scalar::<_, i32>(
            r#"
            INSERT INTO checklists (
                install_type, client_name, event_name, install_date, pickup_date,
                event_days, responsible, phone, address, quantity,
                machine_id, machine_name, water_install, sewage_install, steam_wand,
                payment_system, machine_units, tools_list, preparations, drinks_list,
                accessories_list, supplies_list, local_validation, financials, contract_num,
                notes, status, created_by
            ) VALUES (
                $1, $2, $3, $4, $5, $6, $7, $8, $9, $10,
                $11, $12, $13, $14, $15, $16, $17, $18, $19, $20,
                $21, $22, $23, $24, $25, $26, $27, $28
            )
            RETURNING id
            "#,
        )
        .bind(record.install_type)
        .bind(&record.client_name)
        .bind(&record.event_name)
        .bind(record.install_date)
        .bind(record.pickup_date)
        .bind(record.event_days)
        .bind(&record.responsible)
        .bind(&record.phone)
        .bind(&record.address)
        .bind(record.quantity)
        .bind(record.machine_id)
        .bind(&record.machine_name)
        .bind(record.water_install)
        .bind(record.sewage_install)
        .bind(record.steam_wand)
        .bind(record.payment_system)
        .bind(Json(&record.machine_units))
        .bind(Json(&record.tools_list))
        .bind(Json(&record.preparations))
        .bind(Json(&record.drinks_list))
        .bind(Json(&record.accessories_list))
        .bind(Json(&record.supplies_list))
        .bind(Json(&record.local_validation))
        .bind(Json(&record.financials))
        .bind(&record.contract_num)
        .bind(&record.notes)
        .bind(record.status)
        .bind(record.created_by)
        .fetch_one(&self.pool)
        .await?;
        Ok(id)
    }

    /// Set the status of a checklist
    pub async fn set_status(&self, id: i32, status: ChecklistStatus) -> AppResult<Checklist> {
        sqlx::query_as::<_, ChecklistRow>(
            "UPDATE checklists SET status = $1 WHERE id = $2 RETURNING *",
        )
        .bind(status)
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Checklist::from)
        .ok_or_else(|| AppError::NotFound(format!("Checklist {} not found", id)))
    }

    /// Delete a checklist
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM checklists WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Checklist {} not found", id)));
        }
        Ok(())
    }
}

#[async_trait]
impl ChecklistSink for ChecklistsRepository {
    async fn insert_checklist(&self, record: &NewChecklist) -> AppResult<i32> {
        self.create(record).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_page_window() {
        assert_eq!(page_window(None, None).unwrap(), (50, 0));
        assert_eq!(page_window(Some(3), Some(20)).unwrap(), (20, 40));
        assert_eq!(page_window(Some(-4), Some(0)).unwrap(), (1, 0));
        assert_eq!(page_window(Some(2), Some(10_000)).unwrap(), (200, 200));
    }

    #[test]
    fn test_huge_page_is_rejected() {
        let err = page_window(Some(i64::MAX), Some(50)).unwrap_err();
        assert!(matches!(err, AppError::BadRequest(_)));
    }
}
