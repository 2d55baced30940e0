//! Machines repository

use sqlx::{types::Json, Pool, Postgres};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    models::machine::{CreateMachine, Machine, MachineRow, MachineVariant, UpdateMachine, VariantInput},
};

#[derive(Clone)]
pub struct MachinesRepository {
    pool: Pool<Postgres>,
}

impl MachinesRepository {
    pub fn new(pool: Pool<Postgres>) -> Self {
        Self { pool }
    }

    /// List all catalog machines by name
    pub async fn list(&self) -> AppResult<Vec<Machine>> {
        let rows = sqlx::query_as::<_, MachineRow>("SELECT * FROM machines ORDER BY name")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.into_iter().map(Machine::from).collect())
    }

    /// Get machine by ID
    pub async fn get_by_id(&self, id: i32) -> AppResult<Machine> {
        sqlx::query_as::<_, MachineRow>("SELECT * FROM machines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Machine::from)
            .ok_or_else(|| AppError::NotFound(format!("Machine {} not found", id)))
    }

    /// Get machine by ID, `None` when the id is unknown
    pub async fn find(&self, id: i32) -> AppResult<Option<Machine>> {
        let row = sqlx::query_as::<_, MachineRow>("SELECT * FROM machines WHERE id = $1")
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(Machine::from))
    }

    /// Create a machine; each variant gets a fresh id
    pub async fn create(&self, data: &CreateMachine) -> AppResult<Machine> {
        let variants: Vec<MachineVariant> = data
            .variants
            .iter()
            .cloned()
            .map(|v| v.into_variant(Uuid::new_v4()))
            .collect();

        let row = sqlx::query_as::<_, MachineRow>(
            r#"
            INSERT INTO machines (
                name, brand, machine_type, voltage, amperage, water_system,
                has_steamer, dimensions, weight, reservoir_capacity, notes,
                image_url, variants
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            RETURNING *
            "#,
        )
        .bind(&data.name)
        .bind(&data.brand)
        .bind(&data.machine_type)
        .bind(&data.voltage)
        .bind(&data.amperage)
        .bind(&data.water_system)
        .bind(data.has_steamer)
        .bind(&data.dimensions)
        .bind(&data.weight)
        .bind(&data.reservoir_capacity)
        .bind(&data.notes)
        .bind(&data.image_url)
        .bind(Json(&variants))
        .fetch_one(&self.pool)
        .await?;
        Ok(row.into())
    }

    /// Update a machine's base fields
    pub async fn update(&self, id: i32, data: &UpdateMachine) -> AppResult<Machine> {
        let mut sets = vec!["updated_at = NOW()".to_string()];
        let mut idx = 1;

        macro_rules! add_field {
            ($field:expr, $name:expr) => {
                if $field.is_some() { sets.push(format!("{} = ${}", $name, idx)); idx += 1; }
            };
        }

        add_field!(data.name, "name");
        add_field!(data.brand, "brand");
        add_field!(data.machine_type, "machine_type");
        add_field!(data.voltage, "voltage");
        add_field!(data.amperage, "amperage");
        add_field!(data.water_system, "water_system");
        add_field!(data.has_steamer, "has_steamer");
        add_field!(data.dimensions, "dimensions");
        add_field!(data.weight, "weight");
        add_field!(data.reservoir_capacity, "reservoir_capacity");
        add_field!(data.notes, "notes");
        add_field!(data.image_url, "image_url");

        let query = format!("UPDATE machines SET {} WHERE id = ${} RETURNING *", sets.join(", "), idx);
        let mut builder = sqlx::query_as::<_, MachineRow>(&query);

        macro_rules! bind_field {
            ($field:expr) => {
                if let Some(ref val) = $field { builder = builder.bind(val); }
            };
        }

        bind_field!(data.name);
        bind_field!(data.brand);
        bind_field!(data.machine_type);
        bind_field!(data.voltage);
        bind_field!(data.amperage);
        bind_field!(data.water_system);
        bind_field!(data.has_steamer);
        bind_field!(data.dimensions);
        bind_field!(data.weight);
        bind_field!(data.reservoir_capacity);
        bind_field!(data.notes);
        bind_field!(data.image_url);

        builder
            .bind(id)
            .fetch_optional(&self.pool)
            .await?
            .map(Machine::from)
            .ok_or_else(|| AppError::NotFound(format!("Machine {} not found", id)))
    }

    /// Replace the stored variant list
    async fn store_variants(&self, id: i32, variants: &[MachineVariant]) -> AppResult<Machine> {
        sqlx::query_as::<_, MachineRow>(
            "UPDATE machines SET variants = $1, updated_at = NOW() WHERE id = $2 RETURNING *",
        )
        .bind(Json(variants))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .map(Machine::from)
        .ok_or_else(|| AppError::NotFound(format!("Machine {} not found", id)))
    }

    /// Append a variant under a fresh id
    pub async fn add_variant(&self, id: i32, data: VariantInput) -> AppResult<Machine> {
        let mut machine = self.get_by_id(id).await?;
        machine.variants.push(data.into_variant(Uuid::new_v4()));
        self.store_variants(id, &machine.variants).await
    }

    /// Replace a variant in place, keeping its id
    pub async fn update_variant(&self, id: i32, variant_id: Uuid, data: VariantInput) -> AppResult<Machine> {
        let mut machine = self.get_by_id(id).await?;
        let slot = machine
            .variants
            .iter_mut()
            .find(|v| v.id == variant_id)
            .ok_or_else(|| AppError::NotFound(format!("Variant {} not found", variant_id)))?;
        *slot = data.into_variant(variant_id);
        self.store_variants(id, &machine.variants).await
    }

    pub async fn remove_variant(&self, id: i32, variant_id: Uuid) -> AppResult<Machine> {
        let mut machine = self.get_by_id(id).await?;
        let before = machine.variants.len();
        machine.variants.retain(|v| v.id != variant_id);
        if machine.variants.len() == before {
            return Err(AppError::NotFound(format!("Variant {} not found", variant_id)));
        }
        self.store_variants(id, &machine.variants).await
    }

    /// Delete a machine; fails with a foreign key error while checklists reference it
    pub async fn delete(&self, id: i32) -> AppResult<()> {
        let result = sqlx::query("DELETE FROM machines WHERE id = $1")
            .bind(id)
            .execute(&self.pool)
            .await?;
        if result.rows_affected() == 0 {
            return Err(AppError::NotFound(format!("Machine {} not found", id)));
        }
        Ok(())
    }
}
