//! Checklist draft: typed field groups and the command reducer.
//!
//! A draft is an immutable value; every mutation goes through
//! [`ChecklistDraft::apply`] with a tagged [`DraftCommand`]. Cross-field
//! defaults (machine selection seeding the technical flags, quantity driving
//! the unit list) live in the reducer so no caller can forget them.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::{
        checklist::{AccessoriesList, DrinksList, LocalValidation, MachineUnit, Selection, SuppliesList, SupplySelection},
        enums::{InstallType, YesNo},
        machine::{Machine, WATER_SYSTEM_PLUMBED},
        money::{check_amount, checked_sum, is_valid_amount},
    },
};

/// Upper bound on units per checklist
pub const MAX_QUANTITY: u32 = 999;

/// Distinguishes an absent field (`None`) from an explicit `null` (`Some(None)`)
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<Option<T>>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    Option::<T>::deserialize(deserializer).map(Some)
}

// ---------------------------------------------------------------------------
// Field groups
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Identity {
    pub install_type: InstallType,
    pub client_name: String,
    pub event_name: String,
    pub install_date: Option<NaiveDate>,
    pub pickup_date: Option<NaiveDate>,
    pub event_days: Option<u32>,
    pub responsible: String,
    pub phone: String,
    pub address: String,
}

impl Identity {
    /// Name required for the selected install type
    pub fn required_name(&self) -> &str {
        match self.install_type {
            InstallType::Client => &self.client_name,
            InstallType::Event => &self.event_name,
        }
    }
}

/// Catalog attributes copied into the draft when a machine is selected
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct MachineSnapshot {
    pub id: i32,
    pub name: String,
    pub water_system: Option<String>,
    pub has_steamer: bool,
}

impl MachineSnapshot {
    pub fn is_plumbed(&self) -> bool {
        self.water_system.as_deref() == Some(WATER_SYSTEM_PLUMBED)
    }
}

impl From<&Machine> for MachineSnapshot {
    fn from(m: &Machine) -> Self {
        Self {
            id: m.id,
            name: m.name.clone(),
            water_system: m.water_system.clone(),
            has_steamer: m.has_steamer,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Equipment {
    pub machine_id: Option<i32>,
    pub machine: Option<MachineSnapshot>,
    pub quantity: u32,
    /// Always exactly `quantity` entries
    pub units: Vec<MachineUnit>,
}

impl Default for Equipment {
    fn default() -> Self {
        Self {
            machine_id: None,
            machine: None,
            quantity: 1,
            units: vec![MachineUnit::default()],
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Technical {
    pub water_install: YesNo,
    pub sewage_install: YesNo,
    pub steam_wand: YesNo,
    pub payment_system: YesNo,
    pub power_notes: String,
}

/// Money parts of the checklist; the total is never stored
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Financials {
    #[serde(with = "rust_decimal::serde::float")]
    pub machine: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub supplies: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub services: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    pub extras: Decimal,
}

impl Financials {
    pub fn total(&self) -> AppResult<Decimal> {
        checked_sum([self.machine, self.supplies, self.services, self.extras])
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Contract {
    pub contract_num: String,
    pub notes: String,
}

/// In-memory checklist under construction
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChecklistDraft {
    pub identity: Identity,
    pub equipment: Equipment,
    pub technical: Technical,
    #[schema(value_type = Object)]
    pub tools: Selection,
    #[schema(value_type = Object)]
    pub preparations: Selection,
    pub drinks: DrinksList,
    pub accessories: AccessoriesList,
    pub supplies: SuppliesList,
    pub local_validation: LocalValidation,
    pub financials: Financials,
    pub contract: Contract,
}

// ---------------------------------------------------------------------------
// Commands
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct IdentityPatch {
    pub install_type: Option<InstallType>,
    pub client_name: Option<String>,
    pub event_name: Option<String>,
    /// `null` clears the date
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub install_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, format = Date)]
    pub pickup_date: Option<Option<NaiveDate>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<u32>)]
    pub event_days: Option<Option<u32>>,
    pub responsible: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct UnitPatch {
    pub voltage: Option<String>,
    pub serial: Option<String>,
    pub patrimony: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct TechnicalPatch {
    pub water_install: Option<YesNo>,
    pub sewage_install: Option<YesNo>,
    pub steam_wand: Option<YesNo>,
    pub payment_system: Option<YesNo>,
    pub power_notes: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct LocalValidationPatch {
    pub power_outlet: Option<YesNo>,
    pub water_point: Option<YesNo>,
    pub space_ok: Option<YesNo>,
    pub access_notes: Option<String>,
    pub validated_by: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Deserialize, ToSchema)]
pub struct FinancialsPatch {
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub machine: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub supplies: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub services: Option<Decimal>,
    #[serde(default, with = "rust_decimal::serde::float_option")]
    pub extras: Option<Decimal>,
}

impl FinancialsPatch {
    fn fields(&self) -> [(&'static str, Option<&Decimal>); 4] {
        [
            ("machine", self.machine.as_ref()),
            ("supplies", self.supplies.as_ref()),
            ("services", self.services.as_ref()),
            ("extras", self.extras.as_ref()),
        ]
    }

    /// Every given amount must be within the accepted money range
    pub fn check(&self) -> AppResult<()> {
        for (label, value) in self.fields() {
            if let Some(value) = value {
                check_amount(label, value)?;
            }
        }
        Ok(())
    }
}

/// Quantity as typed by the operator: a number or raw text
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(untagged)]
pub enum QuantityInput {
    Number(i64),
    /// Fractional or out-of-range numbers, truncated toward zero
    Float(f64),
    Text(String),
}

impl QuantityInput {
    /// Integer prefix parse, falling back to 1 for zero or unparsable input,
    /// then clamped to `[1, MAX_QUANTITY]`
    pub fn resolve(&self) -> u32 {
        let parsed = match self {
            QuantityInput::Number(n) => Some(*n),
            QuantityInput::Float(f) if f.is_finite() => Some(f.trunc() as i64),
            QuantityInput::Float(_) => None,
            QuantityInput::Text(s) => parse_int_prefix(s),
        };
        match parsed {
            Some(n) if n != 0 => n.clamp(1, MAX_QUANTITY as i64) as u32,
            _ => 1,
        }
    }
}

/// Leading optional sign and digits, ignoring leading whitespace and any trailing text
fn parse_int_prefix(s: &str) -> Option<i64> {
    let s = s.trim_start();
    let (negative, rest) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let digits: String = rest.chars().take_while(|c| c.is_ascii_digit()).collect();
    if digits.is_empty() {
        return None;
    }
    let value = digits.parse::<i64>().unwrap_or(i64::MAX);
    Some(if negative { -value } else { value })
}

/// Selection maps keyed by item name
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum SelectionList {
    Tools,
    Preparations,
    Drinks,
    Accessories,
}

/// Free-form "other" lists
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CustomList {
    Drinks,
    Accessories,
    Supplies,
}

/// Tagged update message applied to a draft
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum DraftCommand {
    UpdateIdentity { patch: IdentityPatch },
    SelectMachine { machine_id: i32 },
    ChangeQuantity { quantity: QuantityInput },
    UpdateUnit { index: usize, patch: UnitPatch },
    UpdateTechnical { patch: TechnicalPatch },
    ToggleItem { list: SelectionList, key: String, default_value: String },
    SetItemValue { list: SelectionList, key: String, value: String },
    AddCustomItem { list: CustomList, name: String },
    RemoveCustomItem { list: CustomList, index: usize },
    SetNoAccessories { value: bool },
    SetNoSupplies { value: bool },
    ToggleSupply { category: String, key: String },
    UpdateSupplyQty { category: String, key: String, qty: String },
    UpdateLocalValidation { patch: LocalValidationPatch },
    UpdateFinancials { patch: FinancialsPatch },
    SetContract { contract_num: Option<String>, notes: Option<String> },
}

impl DraftCommand {
    /// Reject input the reducer would otherwise drop silently
    pub fn check(&self) -> AppResult<()> {
        match self {
            DraftCommand::UpdateFinancials { patch } => patch.check(),
            _ => Ok(()),
        }
    }

    /// Machine the reducer will need to look up, if any
    pub fn machine_lookup(&self) -> Option<i32> {
        match self {
            DraftCommand::SelectMachine { machine_id } => Some(*machine_id),
            _ => None,
        }
    }
}

// ---------------------------------------------------------------------------
// Reducer
// ---------------------------------------------------------------------------

macro_rules! patch {
    ($target:expr, $patch:expr, $($field:ident),+) => {
        $(if let Some(value) = $patch.$field {
            $target.$field = value;
        })+
    };
}

impl ChecklistDraft {
    /// Apply one command. `machines` is consulted only by `SelectMachine`.
    pub fn apply(mut self, command: DraftCommand, machines: &[MachineSnapshot]) -> Self {
        match command {
            DraftCommand::UpdateIdentity { patch } => {
                patch!(
                    self.identity, patch,
                    install_type, client_name, event_name, install_date,
                    pickup_date, event_days, responsible, phone, address
                );
            }
            DraftCommand::SelectMachine { machine_id } => {
                self.select_machine(machine_id, machines);
            }
            DraftCommand::ChangeQuantity { quantity } => {
                self.change_quantity(quantity.resolve());
            }
            DraftCommand::UpdateUnit { index, patch } => {
                if let Some(unit) = self.equipment.units.get_mut(index) {
                    patch!(unit, patch, voltage, serial, patrimony);
                }
            }
            DraftCommand::UpdateTechnical { patch } => {
                patch!(
                    self.technical, patch,
                    water_install, sewage_install, steam_wand, payment_system, power_notes
                );
            }
            DraftCommand::ToggleItem { list, key, default_value } => {
                toggle_item(self.selection_mut(list), key, default_value);
            }
            DraftCommand::SetItemValue { list, key, value } => {
                if let Some(current) = self.selection_mut(list).get_mut(&key) {
                    *current = value;
                }
            }
            DraftCommand::AddCustomItem { list, name } => {
                let name = name.trim();
                if !name.is_empty() {
                    self.custom_mut(list).push(name.to_string());
                }
            }
            DraftCommand::RemoveCustomItem { list, index } => {
                let items = self.custom_mut(list);
                if index < items.len() {
                    items.remove(index);
                }
            }
            DraftCommand::SetNoAccessories { value } => {
                self.accessories.no_accessories = value;
            }
            DraftCommand::SetNoSupplies { value } => {
                self.supplies.no_supplies = value;
            }
            DraftCommand::ToggleSupply { category, key } => {
                let selection = self.supply_entry(category, key);
                selection.active = !selection.active;
            }
            DraftCommand::UpdateSupplyQty { category, key, qty } => {
                self.supply_entry(category, key).qty = qty;
            }
            DraftCommand::UpdateLocalValidation { patch } => {
                patch!(
                    self.local_validation, patch,
                    power_outlet, water_point, space_ok, access_notes, validated_by
                );
            }
            DraftCommand::UpdateFinancials { patch } => {
                // Out-of-range amounts leave the field as it was
                let f = &mut self.financials;
                let slots = [
                    (&mut f.machine, patch.machine),
                    (&mut f.supplies, patch.supplies),
                    (&mut f.services, patch.services),
                    (&mut f.extras, patch.extras),
                ];
                for (slot, value) in slots {
                    if let Some(value) = value.filter(is_valid_amount) {
                        *slot = value;
                    }
                }
            }
            DraftCommand::SetContract { contract_num, notes } => {
                let contract = &mut self.contract;
                if let Some(num) = contract_num {
                    contract.contract_num = num;
                }
                if let Some(notes) = notes {
                    contract.notes = notes;
                }
            }
        }
        self
    }

    /// Selecting a machine seeds water and steam from the catalog and always
    /// resets the sewage acknowledgment so the operator has to re-confirm it.
    /// An unknown id only clears the selection.
    fn select_machine(&mut self, machine_id: i32, machines: &[MachineSnapshot]) {
        match machines.iter().find(|m| m.id == machine_id) {
            Some(machine) => {
                self.technical.water_install = YesNo::from(machine.is_plumbed());
                self.technical.steam_wand = YesNo::from(machine.has_steamer);
                self.technical.sewage_install = YesNo::No;
                self.equipment.machine_id = Some(machine.id);
                self.equipment.machine = Some(machine.clone());
            }
            None => {
                self.equipment.machine_id = None;
                self.equipment.machine = None;
            }
        }
    }

    /// Grow with default units or truncate from the tail; kept entries are untouched
    fn change_quantity(&mut self, quantity: u32) {
        self.equipment.quantity = quantity;
        self.equipment
            .units
            .resize_with(quantity as usize, MachineUnit::default);
    }

    fn selection_mut(&mut self, list: SelectionList) -> &mut Selection {
        match list {
            SelectionList::Tools => &mut self.tools,
            SelectionList::Preparations => &mut self.preparations,
            SelectionList::Drinks => &mut self.drinks.standard,
            SelectionList::Accessories => &mut self.accessories.standard,
        }
    }

    fn custom_mut(&mut self, list: CustomList) -> &mut Vec<String> {
        match list {
            CustomList::Drinks => &mut self.drinks.custom,
            CustomList::Accessories => &mut self.accessories.custom,
            CustomList::Supplies => &mut self.supplies.custom,
        }
    }

    fn supply_entry(&mut self, category: String, key: String) -> &mut SupplySelection {
        self.supplies
            .standard
            .entry(category)
            .or_default()
            .entry(key)
            .or_default()
    }

    pub fn total(&self) -> AppResult<Decimal> {
        self.financials.total()
    }
}

/// Presence toggle: remove the key if present, else insert it with the default value
fn toggle_item(map: &mut Selection, key: String, default_value: String) {
    if map.shift_remove(&key).is_none() {
        map.insert(key, default_value);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn machine(id: i32, water: &str, steamer: bool) -> MachineSnapshot {
        MachineSnapshot {
            id,
            name: format!("Machine {}", id),
            water_system: Some(water.to_string()),
            has_steamer: steamer,
        }
    }

    fn catalog() -> Vec<MachineSnapshot> {
        vec![
            machine(1, WATER_SYSTEM_PLUMBED, true),
            machine(2, "Reservatório", false),
        ]
    }

    fn quantity(n: i64) -> DraftCommand {
        DraftCommand::ChangeQuantity { quantity: QuantityInput::Number(n) }
    }

    #[test]
    fn test_default_draft_has_one_unit() {
        let draft = ChecklistDraft::default();
        assert_eq!(draft.equipment.quantity, 1);
        assert_eq!(draft.equipment.units, vec![MachineUnit::default()]);
        assert_eq!(draft.equipment.units[0].voltage, "220v");
    }

    #[test]
    fn test_quantity_grows_and_truncates_preserving_prefix() {
        let mut draft = ChecklistDraft::default().apply(quantity(3), &[]);
        for i in 0..3 {
            draft = draft.apply(
                DraftCommand::UpdateUnit {
                    index: i,
                    patch: UnitPatch { serial: Some(format!("SN-{}", i)), ..Default::default() },
                },
                &[],
            );
        }

        for n in [1u32, 2, 5, 3, 7] {
            let before = draft.equipment.units.clone();
            draft = draft.apply(quantity(n as i64), &[]);
            assert_eq!(draft.equipment.units.len(), n as usize);
            assert_eq!(draft.equipment.quantity, n);
            let kept = before.len().min(n as usize);
            assert_eq!(&draft.equipment.units[..kept], &before[..kept]);
            for unit in &draft.equipment.units[kept..] {
                assert_eq!(unit, &MachineUnit::default());
            }
        }
        assert_eq!(draft.equipment.units[0].serial, "SN-0");
    }

    #[test]
    fn test_quantity_parse_semantics() {
        let cases = [
            (QuantityInput::Text("4".into()), 4),
            (QuantityInput::Text(" 12 units".into()), 12),
            (QuantityInput::Text("abc".into()), 1),
            (QuantityInput::Text("".into()), 1),
            (QuantityInput::Text("0".into()), 1),
            (QuantityInput::Text("-3".into()), 1),
            (QuantityInput::Number(0), 1),
            (QuantityInput::Number(2), 2),
            (QuantityInput::Number(1_000_000), MAX_QUANTITY),
            (QuantityInput::Float(2.5), 2),
            (QuantityInput::Float(0.9), 1),
            (QuantityInput::Float(-4.2), 1),
            (QuantityInput::Float(1e30), MAX_QUANTITY),
        ];
        for (input, expected) in cases {
            assert_eq!(input.resolve(), expected, "{:?}", input);
        }
    }

    #[test]
    fn test_toggle_item_is_its_own_inverse_and_resets_value() {
        let toggle = |key: &str| DraftCommand::ToggleItem {
            list: SelectionList::Tools,
            key: key.to_string(),
            default_value: "1".to_string(),
        };

        let mut draft = ChecklistDraft::default().apply(toggle("Chave de fenda"), &[]);
        assert_eq!(draft.tools.get("Chave de fenda").map(String::as_str), Some("1"));

        draft = draft.apply(
            DraftCommand::SetItemValue {
                list: SelectionList::Tools,
                key: "Chave de fenda".into(),
                value: "3".into(),
            },
            &[],
        );
        assert_eq!(draft.tools.get("Chave de fenda").map(String::as_str), Some("3"));

        // Removing restores the original key set
        draft = draft.apply(toggle("Chave de fenda"), &[]);
        assert!(draft.tools.is_empty());

        // Re-adding starts from the default, not the previous value
        draft = draft.apply(toggle("Chave de fenda"), &[]);
        assert_eq!(draft.tools.get("Chave de fenda").map(String::as_str), Some("1"));
    }

    #[test]
    fn test_set_item_value_ignores_inactive_items() {
        let draft = ChecklistDraft::default().apply(
            DraftCommand::SetItemValue {
                list: SelectionList::Drinks,
                key: "Cappuccino".into(),
                value: "2".into(),
            },
            &[],
        );
        assert!(draft.drinks.standard.is_empty());
    }

    #[test]
    fn test_toggle_supply_flips_only_active() {
        let toggle = DraftCommand::ToggleSupply {
            category: "Cafés".into(),
            key: "Grão 1kg".into(),
        };
        let set_qty = DraftCommand::UpdateSupplyQty {
            category: "Cafés".into(),
            key: "Grão 1kg".into(),
            qty: "5".into(),
        };

        let draft = ChecklistDraft::default().apply(set_qty.clone(), &[]);
        let entry = &draft.supplies.standard["Cafés"]["Grão 1kg"];
        assert!(!entry.active);
        assert_eq!(entry.qty, "5");

        let draft = draft.apply(toggle.clone(), &[]);
        let entry = &draft.supplies.standard["Cafés"]["Grão 1kg"];
        assert!(entry.active);
        assert_eq!(entry.qty, "5");

        let draft = draft.apply(
            DraftCommand::UpdateSupplyQty {
                category: "Cafés".into(),
                key: "Grão 1kg".into(),
                qty: "8".into(),
            },
            &[],
        );
        assert!(draft.supplies.standard["Cafés"]["Grão 1kg"].active);

        let draft = draft.apply(toggle, &[]);
        let entry = &draft.supplies.standard["Cafés"]["Grão 1kg"];
        assert!(!entry.active);
        assert_eq!(entry.qty, "8");
    }

    #[test]
    fn test_select_machine_seeds_water_and_steam() {
        let machines = catalog();
        let draft = ChecklistDraft::default().apply(DraftCommand::SelectMachine { machine_id: 1 }, &machines);
        assert_eq!(draft.equipment.machine_id, Some(1));
        assert_eq!(draft.technical.water_install, YesNo::Yes);
        assert_eq!(draft.technical.steam_wand, YesNo::Yes);

        let draft = draft.apply(DraftCommand::SelectMachine { machine_id: 2 }, &machines);
        assert_eq!(draft.technical.water_install, YesNo::No);
        assert_eq!(draft.technical.steam_wand, YesNo::No);
    }

    #[test]
    fn test_seeded_flags_are_not_resynced() {
        let machines = catalog();
        let draft = ChecklistDraft::default()
            .apply(DraftCommand::SelectMachine { machine_id: 1 }, &machines)
            .apply(
                DraftCommand::UpdateTechnical {
                    patch: TechnicalPatch { water_install: Some(YesNo::No), ..Default::default() },
                },
                &machines,
            )
            .apply(quantity(2), &machines);
        assert_eq!(draft.technical.water_install, YesNo::No);
    }

    #[test]
    fn test_selecting_machines_always_resets_sewage() {
        let machines = catalog();
        let confirm_sewage = DraftCommand::UpdateTechnical {
            patch: TechnicalPatch { sewage_install: Some(YesNo::Yes), ..Default::default() },
        };

        for (a, b) in [(1, 2), (2, 1), (1, 1), (2, 2)] {
            let draft = ChecklistDraft::default()
                .apply(confirm_sewage.clone(), &machines)
                .apply(DraftCommand::SelectMachine { machine_id: a }, &machines)
                .apply(confirm_sewage.clone(), &machines)
                .apply(DraftCommand::SelectMachine { machine_id: b }, &machines);
            assert_eq!(draft.technical.sewage_install, YesNo::No);
        }
    }

    #[test]
    fn test_unknown_machine_only_clears_selection() {
        let machines = catalog();
        let selected = ChecklistDraft::default()
            .apply(DraftCommand::SelectMachine { machine_id: 1 }, &machines)
            .apply(
                DraftCommand::UpdateTechnical {
                    patch: TechnicalPatch { sewage_install: Some(YesNo::Yes), ..Default::default() },
                },
                &machines,
            );

        let after = selected.clone().apply(DraftCommand::SelectMachine { machine_id: 99 }, &machines);
        assert_eq!(after.equipment.machine_id, None);
        assert_eq!(after.equipment.machine, None);
        assert_eq!(after.technical, selected.technical);
    }

    #[test]
    fn test_total_tracks_every_edit() {
        let mut draft = ChecklistDraft::default();
        assert_eq!(draft.total().unwrap(), Decimal::ZERO);

        let edits = [
            FinancialsPatch { machine: Some(Decimal::new(150000, 2)), ..Default::default() },
            FinancialsPatch { supplies: Some(Decimal::new(32050, 2)), ..Default::default() },
            FinancialsPatch { services: Some(Decimal::from(200)), extras: Some(Decimal::new(1999, 2)), ..Default::default() },
            FinancialsPatch { machine: Some(Decimal::from(900)), ..Default::default() },
            FinancialsPatch { supplies: Some(Decimal::ZERO), ..Default::default() },
        ];
        for patch in edits {
            draft = draft.apply(DraftCommand::UpdateFinancials { patch }, &[]);
            let f = &draft.financials;
            assert_eq!(draft.total().unwrap(), f.machine + f.supplies + f.services + f.extras);
        }
        assert_eq!(draft.total().unwrap(), Decimal::new(111999, 2));
    }

    #[test]
    fn test_oversized_financials_are_rejected_and_ignored() {
        let cmd: DraftCommand = serde_json::from_value(serde_json::json!({
            "type": "update_financials",
            "patch": { "machine": 5.0e28, "supplies": 5.0e28 }
        }))
        .unwrap();
        assert!(matches!(cmd.check(), Err(crate::error::AppError::Validation(_))));

        let draft = ChecklistDraft::default()
            .apply(
                DraftCommand::UpdateFinancials {
                    patch: FinancialsPatch { services: Some(Decimal::from(80)), ..Default::default() },
                },
                &[],
            )
            .apply(cmd, &[]);
        assert_eq!(draft.financials.machine, Decimal::ZERO);
        assert_eq!(draft.financials.supplies, Decimal::ZERO);
        assert_eq!(draft.total().unwrap(), Decimal::from(80));
    }

    #[test]
    fn test_negative_financials_are_rejected() {
        let patch = FinancialsPatch { extras: Some(Decimal::new(-1050, 2)), ..Default::default() };
        assert!(patch.check().is_err());
        let draft = ChecklistDraft::default().apply(DraftCommand::UpdateFinancials { patch }, &[]);
        assert_eq!(draft.financials.extras, Decimal::ZERO);
    }

    #[test]
    fn test_overflowing_total_is_an_error() {
        let huge: Decimal = "50000000000000000000000000000".parse().unwrap();
        let financials = Financials { machine: huge, supplies: huge, ..Default::default() };
        assert!(matches!(financials.total(), Err(crate::error::AppError::Validation(_))));
    }

    #[test]
    fn test_custom_lists() {
        let draft = ChecklistDraft::default()
            .apply(DraftCommand::AddCustomItem { list: CustomList::Accessories, name: " Suporte de copos ".into() }, &[])
            .apply(DraftCommand::AddCustomItem { list: CustomList::Accessories, name: "   ".into() }, &[])
            .apply(DraftCommand::AddCustomItem { list: CustomList::Accessories, name: "Lixeira".into() }, &[])
            .apply(DraftCommand::RemoveCustomItem { list: CustomList::Accessories, index: 0 }, &[])
            .apply(DraftCommand::RemoveCustomItem { list: CustomList::Accessories, index: 5 }, &[]);
        assert_eq!(draft.accessories.custom, vec!["Lixeira".to_string()]);
    }

    #[test]
    fn test_command_wire_format() {
        let cmd: DraftCommand = serde_json::from_value(serde_json::json!({
            "type": "change_quantity",
            "quantity": "3"
        }))
        .unwrap();
        assert_eq!(cmd, DraftCommand::ChangeQuantity { quantity: QuantityInput::Text("3".into()) });

        let cmd: DraftCommand = serde_json::from_value(serde_json::json!({
            "type": "change_quantity",
            "quantity": 2.5
        }))
        .unwrap();
        let draft = ChecklistDraft::default().apply(cmd, &[]);
        assert_eq!(draft.equipment.quantity, 2);
        assert_eq!(draft.equipment.units.len(), 2);

        let cmd: DraftCommand = serde_json::from_value(serde_json::json!({
            "type": "update_identity",
            "patch": { "install_type": "Evento", "pickup_date": null }
        }))
        .unwrap();
        match cmd {
            DraftCommand::UpdateIdentity { patch } => {
                assert_eq!(patch.install_type, Some(InstallType::Event));
                assert_eq!(patch.pickup_date, Some(None));
                assert_eq!(patch.install_date, None);
            }
            other => panic!("unexpected command {:?}", other),
        }
    }
}
