//! Supplies service

use serde_json::json;
use validator::Validate;

use super::history::HistoryService;
use crate::{
    error::AppResult,
    models::{
        profile::Session,
        supply::{CreateSupply, Supply, UpdateSupply},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct SuppliesService {
    repository: Repository,
    history: HistoryService,
}

impl SuppliesService {
    pub fn new(repository: Repository, history: HistoryService) -> Self {
        Self { repository, history }
    }

    pub async fn list(&self, include_inactive: bool) -> AppResult<Vec<Supply>> {
        self.repository.supplies.list(include_inactive).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Supply> {
        self.repository.supplies.get_by_id(id).await
    }

    pub async fn create(&self, data: &CreateSupply, session: &Session) -> AppResult<Supply> {
        data.validate()?;
        let supply = self.repository.supplies.create(data).await?;
        self.history
            .note(session, "create", "supplies", supply.id, json!({ "name": supply.name }))
            .await;
        Ok(supply)
    }

    pub async fn update(&self, id: i32, data: &UpdateSupply, session: &Session) -> AppResult<Supply> {
        let supply = self.repository.supplies.update(id, data).await?;
        self.history
            .note(session, "update", "supplies", id, json!({ "name": supply.name }))
            .await;
        Ok(supply)
    }

    pub async fn delete(&self, id: i32, session: &Session) -> AppResult<()> {
        self.repository.supplies.delete(id).await?;
        self.history.note(session, "delete", "supplies", id, json!({})).await;
        Ok(())
    }
}
