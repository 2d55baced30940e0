//! Machine catalog model with sparse model variants

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

/// Water system label that implies a plumbed water installation
pub const WATER_SYSTEM_PLUMBED: &str = "Rede Hídrica";

/// Model variant of a catalog machine.
///
/// Every field except `id` and `name` is an override: a missing or blank value
/// inherits the parent machine's value.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MachineVariant {
    pub id: Uuid,
    pub name: String,
    pub voltage: Option<String>,
    pub amperage: Option<String>,
    pub water_system: Option<String>,
    pub dimensions: Option<String>,
    pub weight: Option<String>,
    pub reservoir_capacity: Option<String>,
    pub notes: Option<String>,
}

/// Internal row structure for machine queries
#[derive(Debug, Clone, FromRow)]
pub struct MachineRow {
    id: i32,
    name: String,
    brand: Option<String>,
    machine_type: Option<String>,
    voltage: Option<String>,
    amperage: Option<String>,
    water_system: Option<String>,
    has_steamer: bool,
    dimensions: Option<String>,
    weight: Option<String>,
    reservoir_capacity: Option<String>,
    notes: Option<String>,
    image_url: Option<String>,
    variants: Json<Vec<MachineVariant>>,
    created_at: Option<DateTime<Utc>>,
    updated_at: Option<DateTime<Utc>>,
}

impl From<MachineRow> for Machine {
    fn from(row: MachineRow) -> Self {
        Machine {
            id: row.id,
            name: row.name,
            brand: row.brand,
            machine_type: row.machine_type,
            voltage: row.voltage,
            amperage: row.amperage,
            water_system: row.water_system,
            has_steamer: row.has_steamer,
            dimensions: row.dimensions,
            weight: row.weight,
            reservoir_capacity: row.reservoir_capacity,
            notes: row.notes,
            image_url: row.image_url,
            variants: row.variants.0,
            created_at: row.created_at,
            updated_at: row.updated_at,
        }
    }
}

/// Catalog machine
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Machine {
    pub id: i32,
    pub name: String,
    pub brand: Option<String>,
    /// Free-form type (e.g. "Espresso", "Solúvel")
    pub machine_type: Option<String>,
    pub voltage: Option<String>,
    pub amperage: Option<String>,
    /// "Rede Hídrica" or "Reservatório"
    pub water_system: Option<String>,
    pub has_steamer: bool,
    pub dimensions: Option<String>,
    pub weight: Option<String>,
    pub reservoir_capacity: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    pub variants: Vec<MachineVariant>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Technical specs of a machine after applying a variant's overrides
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MachineSpecs {
    pub machine_id: i32,
    pub name: String,
    pub variant_id: Option<Uuid>,
    pub variant_name: Option<String>,
    pub brand: Option<String>,
    pub machine_type: Option<String>,
    pub voltage: Option<String>,
    pub amperage: Option<String>,
    pub water_system: Option<String>,
    pub has_steamer: bool,
    pub dimensions: Option<String>,
    pub weight: Option<String>,
    pub reservoir_capacity: Option<String>,
    pub notes: Option<String>,
}

/// Returns the override when it carries a non-blank value
fn inherit(parent: &Option<String>, child: &Option<String>) -> Option<String> {
    match child {
        Some(v) if !v.trim().is_empty() => Some(v.clone()),
        _ => parent.clone(),
    }
}

impl Machine {
    pub fn variant(&self, variant_id: Uuid) -> Option<&MachineVariant> {
        self.variants.iter().find(|v| v.id == variant_id)
    }

    /// Specs of the base machine, without any variant applied
    pub fn specs(&self) -> MachineSpecs {
        MachineSpecs {
            machine_id: self.id,
            name: self.name.clone(),
            variant_id: None,
            variant_name: None,
            brand: self.brand.clone(),
            machine_type: self.machine_type.clone(),
            voltage: self.voltage.clone(),
            amperage: self.amperage.clone(),
            water_system: self.water_system.clone(),
            has_steamer: self.has_steamer,
            dimensions: self.dimensions.clone(),
            weight: self.weight.clone(),
            reservoir_capacity: self.reservoir_capacity.clone(),
            notes: self.notes.clone(),
        }
    }

    /// Resolve specs for a variant; only non-blank variant fields replace the parent's
    pub fn resolve(&self, variant: &MachineVariant) -> MachineSpecs {
        MachineSpecs {
            variant_id: Some(variant.id),
            variant_name: Some(variant.name.clone()),
            voltage: inherit(&self.voltage, &variant.voltage),
            amperage: inherit(&self.amperage, &variant.amperage),
            water_system: inherit(&self.water_system, &variant.water_system),
            dimensions: inherit(&self.dimensions, &variant.dimensions),
            weight: inherit(&self.weight, &variant.weight),
            reservoir_capacity: inherit(&self.reservoir_capacity, &variant.reservoir_capacity),
            notes: inherit(&self.notes, &variant.notes),
            ..self.specs()
        }
    }
}

/// Variant payload (the id is assigned by the server)
#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
pub struct VariantInput {
    #[validate(length(min = 1, message = "Variant name is required"))]
    pub name: String,
    pub voltage: Option<String>,
    pub amperage: Option<String>,
    pub water_system: Option<String>,
    pub dimensions: Option<String>,
    pub weight: Option<String>,
    pub reservoir_capacity: Option<String>,
    pub notes: Option<String>,
}

impl VariantInput {
    pub fn into_variant(self, id: Uuid) -> MachineVariant {
        MachineVariant {
            id,
            name: self.name,
            voltage: self.voltage,
            amperage: self.amperage,
            water_system: self.water_system,
            dimensions: self.dimensions,
            weight: self.weight,
            reservoir_capacity: self.reservoir_capacity,
            notes: self.notes,
        }
    }
}

/// Create machine request
#[derive(Debug, Deserialize, Validate, ToSchema)]
pub struct CreateMachine {
    #[validate(length(min = 1, message = "Machine name is required"))]
    pub name: String,
    pub brand: Option<String>,
    pub machine_type: Option<String>,
    pub voltage: Option<String>,
    pub amperage: Option<String>,
    pub water_system: Option<String>,
    #[serde(default)]
    pub has_steamer: bool,
    pub dimensions: Option<String>,
    pub weight: Option<String>,
    pub reservoir_capacity: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
    #[serde(default)]
    #[validate(nested)]
    pub variants: Vec<VariantInput>,
}

/// Update machine request
#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateMachine {
    pub name: Option<String>,
    pub brand: Option<String>,
    pub machine_type: Option<String>,
    pub voltage: Option<String>,
    pub amperage: Option<String>,
    pub water_system: Option<String>,
    pub has_steamer: Option<bool>,
    pub dimensions: Option<String>,
    pub weight: Option<String>,
    pub reservoir_capacity: Option<String>,
    pub notes: Option<String>,
    pub image_url: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine() -> Machine {
        Machine {
            id: 7,
            name: "Saeco Aulika".to_string(),
            brand: Some("Saeco".to_string()),
            machine_type: Some("Espresso".to_string()),
            voltage: Some("220v".to_string()),
            amperage: Some("10A".to_string()),
            water_system: Some(WATER_SYSTEM_PLUMBED.to_string()),
            has_steamer: true,
            dimensions: Some("40x50x60".to_string()),
            weight: Some("30kg".to_string()),
            reservoir_capacity: None,
            notes: None,
            image_url: None,
            variants: vec![],
            created_at: None,
            updated_at: None,
        }
    }

    #[test]
    fn test_variant_overrides_only_non_blank_fields() {
        let variant = MachineVariant {
            id: Uuid::new_v4(),
            name: "Aulika 110".to_string(),
            voltage: Some("110v".to_string()),
            amperage: Some("   ".to_string()),
            water_system: None,
            reservoir_capacity: Some("4L".to_string()),
            ..Default::default()
        };
        let specs = machine().resolve(&variant);
        assert_eq!(specs.voltage.as_deref(), Some("110v"));
        assert_eq!(specs.amperage.as_deref(), Some("10A"));
        assert_eq!(specs.water_system.as_deref(), Some(WATER_SYSTEM_PLUMBED));
        assert_eq!(specs.reservoir_capacity.as_deref(), Some("4L"));
        assert_eq!(specs.brand.as_deref(), Some("Saeco"));
        assert_eq!(specs.variant_name.as_deref(), Some("Aulika 110"));
    }

    #[test]
    fn test_variant_lookup_is_by_id_not_position() {
        let mut m = machine();
        let a = MachineVariant { id: Uuid::new_v4(), name: "A".into(), ..Default::default() };
        let b = MachineVariant { id: Uuid::new_v4(), name: "B".into(), ..Default::default() };
        m.variants = vec![a.clone(), b.clone()];
        m.variants.reverse();
        assert_eq!(m.variant(a.id).map(|v| v.name.as_str()), Some("A"));
        assert_eq!(m.variant(b.id).map(|v| v.name.as_str()), Some("B"));
        assert!(m.variant(Uuid::new_v4()).is_none());
    }
}
