//! Machine catalog service

use serde_json::json;
use uuid::Uuid;
use validator::Validate;

use super::history::HistoryService;
use crate::{
    error::{AppError, AppResult},
    models::{
        machine::{CreateMachine, Machine, MachineSpecs, UpdateMachine, VariantInput},
        profile::Session,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct MachinesService {
    repository: Repository,
    history: HistoryService,
}

impl MachinesService {
    pub fn new(repository: Repository, history: HistoryService) -> Self {
        Self { repository, history }
    }

    pub async fn list(&self) -> AppResult<Vec<Machine>> {
        self.repository.machines.list().await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Machine> {
        self.repository.machines.get_by_id(id).await
    }

    /// Specs of a machine, with a variant's overrides applied when given
    pub async fn specs(&self, id: i32, variant_id: Option<Uuid>) -> AppResult<MachineSpecs> {
        let machine = self.repository.machines.get_by_id(id).await?;
        match variant_id {
            Some(variant_id) => machine
                .variant(variant_id)
                .map(|variant| machine.resolve(variant))
                .ok_or_else(|| AppError::NotFound(format!("Variant {} not found", variant_id))),
            None => Ok(machine.specs()),
        }
    }

    pub async fn create(&self, data: &CreateMachine, session: &Session) -> AppResult<Machine> {
        data.validate()?;
        let machine = self.repository.machines.create(data).await?;
        tracing::info!("Machine {} ({}) created", machine.id, machine.name);
        self.history
            .note(session, "create", "machines", machine.id, json!({ "name": machine.name }))
            .await;
        Ok(machine)
    }

    pub async fn update(&self, id: i32, data: &UpdateMachine, session: &Session) -> AppResult<Machine> {
        if matches!(data.name.as_deref(), Some(name) if name.trim().is_empty()) {
            return Err(AppError::Validation("Machine name cannot be empty".to_string()));
        }
        let machine = self.repository.machines.update(id, data).await?;
        self.history
            .note(session, "update", "machines", id, json!({ "name": machine.name }))
            .await;
        Ok(machine)
    }

    pub async fn delete(&self, id: i32, session: &Session) -> AppResult<()> {
        self.repository.machines.delete(id).await?;
        tracing::info!("Machine {} deleted", id);
        self.history.note(session, "delete", "machines", id, json!({})).await;
        Ok(())
    }

    pub async fn add_variant(&self, id: i32, data: VariantInput, session: &Session) -> AppResult<Machine> {
        data.validate()?;
        let name = data.name.clone();
        let machine = self.repository.machines.add_variant(id, data).await?;
        self.history
            .note(session, "add_variant", "machines", id, json!({ "variant": name }))
            .await;
        Ok(machine)
    }

    pub async fn update_variant(
        &self,
        id: i32,
        variant_id: Uuid,
        data: VariantInput,
        session: &Session,
    ) -> AppResult<Machine> {
        data.validate()?;
        let machine = self.repository.machines.update_variant(id, variant_id, data).await?;
        self.history
            .note(session, "update_variant", "machines", id, json!({ "variant_id": variant_id }))
            .await;
        Ok(machine)
    }

    pub async fn remove_variant(&self, id: i32, variant_id: Uuid, session: &Session) -> AppResult<Machine> {
        let machine = self.repository.machines.remove_variant(id, variant_id).await?;
        self.history
            .note(session, "remove_variant", "machines", id, json!({ "variant_id": variant_id }))
            .await;
        Ok(machine)
    }
}
