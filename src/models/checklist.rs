//! Installation checklist model (persisted service order)

use chrono::{DateTime, NaiveDate, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sqlx::{types::Json, FromRow};
use utoipa::{IntoParams, ToSchema};
use uuid::Uuid;

use super::enums::{ChecklistStatus, InstallType, YesNo};

/// Default voltage of a newly added machine unit
pub const DEFAULT_UNIT_VOLTAGE: &str = "220v";

/// One physical machine delivered under a checklist
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MachineUnit {
    pub voltage: String,
    pub serial: String,
    pub patrimony: String,
}

impl Default for MachineUnit {
    fn default() -> Self {
        Self {
            voltage: DEFAULT_UNIT_VOLTAGE.to_string(),
            serial: String::new(),
            patrimony: String::new(),
        }
    }
}

/// Item name -> value; presence of the key marks the item as selected
pub type Selection = IndexMap<String, String>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DrinksList {
    #[schema(value_type = Object)]
    pub standard: Selection,
    pub custom: Vec<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AccessoriesList {
    #[schema(value_type = Object)]
    pub standard: Selection,
    pub custom: Vec<String>,
    #[serde(rename = "noAccessories")]
    pub no_accessories: bool,
}

/// Per-item supply selection
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SupplySelection {
    pub active: bool,
    pub qty: String,
}

/// Category -> item -> selection
pub type SupplyCategories = IndexMap<String, IndexMap<String, SupplySelection>>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct SuppliesList {
    #[schema(value_type = Object)]
    pub standard: SupplyCategories,
    pub custom: Vec<String>,
    #[serde(rename = "noSupplies")]
    pub no_supplies: bool,
}

/// On-site conditions checked before installation
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct LocalValidation {
    pub power_outlet: YesNo,
    pub water_point: YesNo,
    pub space_ok: YesNo,
    pub access_notes: String,
    pub validated_by: String,
}

/// Financial summary as persisted; `total` is always the sum of the four parts
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct FinancialsRecord {
    #[serde(with = "rust_decimal::serde::float")]
    pub machine: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub supplies: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub services: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub extras: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub total: Decimal,
}

/// Insert payload composed from a wizard draft
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct NewChecklist {
    pub install_type: InstallType,
    pub client_name: Option<String>,
    pub event_name: Option<String>,
    pub install_date: Option<NaiveDate>,
    pub pickup_date: Option<NaiveDate>,
    pub event_days: Option<i32>,
    pub responsible: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub quantity: i32,
    pub machine_id: Option<i32>,
    pub machine_name: Option<String>,
    pub water_install: YesNo,
    pub sewage_install: YesNo,
    pub steam_wand: YesNo,
    pub payment_system: YesNo,
    pub machine_units: Vec<MachineUnit>,
    #[schema(value_type = Object)]
    pub tools_list: Selection,
    #[schema(value_type = Object)]
    pub preparations: Selection,
    pub drinks_list: DrinksList,
    pub accessories_list: AccessoriesList,
    pub supplies_list: SuppliesList,
    pub local_validation: LocalValidation,
    pub financials: FinancialsRecord,
    pub contract_num: Option<String>,
    pub notes: Option<String>,
    pub status: ChecklistStatus,
    pub created_by: Option<Uuid>,
}

/// Internal row structure for checklist queries
#[derive(Debug, Clone, FromRow)]
pub struct ChecklistRow {
    id: i32,
    install_type: InstallType,
    client_name: Option<String>,
    event_name: Option<String>,
    install_date: Option<NaiveDate>,
    pickup_date: Option<NaiveDate>,
    event_days: Option<i32>,
    responsible: Option<String>,
    phone: Option<String>,
    address: Option<String>,
    quantity: i32,
    machine_id: Option<i32>,
    machine_name: Option<String>,
    water_install: YesNo,
    sewage_install: YesNo,
    steam_wand: YesNo,
    payment_system: YesNo,
    machine_units: Json<Vec<MachineUnit>>,
    tools_list: Json<Selection>,
    preparations: Json<Selection>,
    drinks_list: Json<DrinksList>,
    accessories_list: Json<AccessoriesList>,
    supplies_list: Json<SuppliesList>,
    local_validation: Json<LocalValidation>,
    financials: Json<FinancialsRecord>,
    contract_num: Option<String>,
    notes: Option<String>,
    status: ChecklistStatus,
    created_by: Option<Uuid>,
    created_at: Option<DateTime<Utc>>,
}

impl From<ChecklistRow> for Checklist {
    fn from(row: ChecklistRow) -> Self {
        Checklist {
            id: row.id,
            install_type: row.install_type,
            client_name: row.client_name,
            event_name: row.event_name,
            install_date: row.install_date,
            pickup_date: row.pickup_date,
            event_days: row.event_days,
            responsible: row.responsible,
            phone: row.phone,
            address: row.address,
            quantity: row.quantity,
            machine_id: row.machine_id,
            machine_name: row.machine_name,
            water_install: row.water_install,
            sewage_install: row.sewage_install,
            steam_wand: row.steam_wand,
            payment_system: row.payment_system,
            machine_units: row.machine_units.0,
            tools_list: row.tools_list.0,
            preparations: row.preparations.0,
            drinks_list: row.drinks_list.0,
            accessories_list: row.accessories_list.0,
            supplies_list: row.supplies_list.0,
            local_validation: row.local_validation.0,
            financials: row.financials.0,
            contract_num: row.contract_num,
            notes: row.notes,
            status: row.status,
            created_by: row.created_by,
            created_at: row.created_at,
        }
    }
}

/// Persisted checklist
#[derive(Debug, Clone, Serialize, Deserialize, ToSchema)]
pub struct Checklist {
    pub id: i32,
    pub install_type: InstallType,
    pub client_name: Option<String>,
    pub event_name: Option<String>,
    pub install_date: Option<NaiveDate>,
    pub pickup_date: Option<NaiveDate>,
    pub event_days: Option<i32>,
    pub responsible: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    pub quantity: i32,
    pub machine_id: Option<i32>,
    pub machine_name: Option<String>,
    pub water_install: YesNo,
    pub sewage_install: YesNo,
    pub steam_wand: YesNo,
    pub payment_system: YesNo,
    pub machine_units: Vec<MachineUnit>,
    #[schema(value_type = Object)]
    pub tools_list: Selection,
    #[schema(value_type = Object)]
    pub preparations: Selection,
    pub drinks_list: DrinksList,
    pub accessories_list: AccessoriesList,
    pub supplies_list: SuppliesList,
    pub local_validation: LocalValidation,
    pub financials: FinancialsRecord,
    pub contract_num: Option<String>,
    pub notes: Option<String>,
    pub status: ChecklistStatus,
    pub created_by: Option<Uuid>,
    pub created_at: Option<DateTime<Utc>>,
}

impl Checklist {
    /// Client or event name, whichever applies to the install type
    pub fn display_name(&self) -> Option<&str> {
        match self.install_type {
            InstallType::Client => self.client_name.as_deref(),
            InstallType::Event => self.event_name.as_deref(),
        }
    }
}

/// Short checklist representation for lists
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct ChecklistShort {
    pub id: i32,
    pub install_type: InstallType,
    pub client_name: Option<String>,
    pub event_name: Option<String>,
    pub install_date: Option<NaiveDate>,
    pub machine_name: Option<String>,
    pub quantity: i32,
    pub contract_num: Option<String>,
    pub status: ChecklistStatus,
    pub created_at: Option<DateTime<Utc>>,
}

/// Checklist list filters
#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct ChecklistQuery {
    /// Filter by status ("Rascunho", "Finalizado", "Cancelado")
    pub status: Option<ChecklistStatus>,
    pub page: Option<i64>,
    pub per_page: Option<i64>,
}
