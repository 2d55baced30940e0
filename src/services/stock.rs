//! Stock service

use serde_json::json;
use validator::Validate;

use super::history::HistoryService;
use crate::{
    error::AppResult,
    models::{
        profile::Session,
        stock::{CreateStockItem, StockCount, StockItem, UpdateStockItem},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct StockService {
    repository: Repository,
    history: HistoryService,
}

impl StockService {
    pub fn new(repository: Repository, history: HistoryService) -> Self {
        Self { repository, history }
    }

    pub async fn list(&self) -> AppResult<Vec<StockItem>> {
        self.repository.stock.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<StockItem> {
        self.repository.stock.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateStockItem, session: &Session) -> AppResult<StockItem> {
        data.validate()?;
        let item = self.repository.stock.create(data).await?;
        self.history
            .note(session, "create", "stock_items", item.id, json!({ "name": item.name }))
            .await;
        Ok(item)
    }

    pub async fn update(&self, id: i32, data: &UpdateStockItem, session: &Session) -> AppResult<StockItem> {
        let item = self.repository.stock.update(id, data).await?;
        self.history
            .note(session, "update", "stock_items", id, json!({ "name": item.name }))
            .await;
        Ok(item)
    }

    /// Record a physical count
    pub async fn count(&self, id: i32, data: &StockCount, session: &Session) -> AppResult<StockItem> {
        data.validate()?;
        let previous = self.repository.stock.get_by_id(id).await?;
        let item = self.repository.stock.record_count(id, data.quantity).await?;
        if item.below_minimum() {
            tracing::warn!(
                "Stock item {} ({}) below minimum: {} < {}",
                item.id,
                item.name,
                item.quantity,
                item.min_quantity
            );
        }
        self.history
            .note(
                session,
                "count",
                "stock_items",
                id,
                json!({ "from": previous.quantity, "to": item.quantity }),
            )
            .await;
        Ok(item)
    }

    pub async fn delete(&self, id: i32, session: &Session) -> AppResult<()> {
        self.repository.stock.delete(id).await?;
        self.history.note(session, "delete", "stock_items", id, json!({})).await;
        Ok(())
    }
}
