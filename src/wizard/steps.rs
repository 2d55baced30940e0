//! Linear step sequencer for the checklist wizard

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use super::draft::ChecklistDraft;
use crate::{
    error::{AppError, AppResult},
    models::enums::InstallType,
};

pub const FIRST_STEP: u8 = 1;
pub const LAST_STEP: u8 = 9;

const STEP_TITLES: [&str; LAST_STEP as usize] = [
    "Identificação",
    "Equipamento",
    "Instalação técnica",
    "Ferramentas",
    "Preparações",
    "Bebidas",
    "Acessórios",
    "Insumos",
    "Validação e financeiro",
];

/// Wizard position, always within `[FIRST_STEP, LAST_STEP]`
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, ToSchema)]
#[serde(try_from = "u8", into = "u8")]
#[schema(value_type = u8)]
pub struct WizardStep(u8);

impl WizardStep {
    pub fn first() -> Self {
        WizardStep(FIRST_STEP)
    }

    pub fn number(self) -> u8 {
        self.0
    }

    pub fn title(self) -> &'static str {
        STEP_TITLES[(self.0 - FIRST_STEP) as usize]
    }

    pub fn is_last(self) -> bool {
        self.0 == LAST_STEP
    }
}

impl Default for WizardStep {
    fn default() -> Self {
        Self::first()
    }
}

impl TryFrom<u8> for WizardStep {
    type Error = String;

    fn try_from(n: u8) -> Result<Self, Self::Error> {
        if (FIRST_STEP..=LAST_STEP).contains(&n) {
            Ok(WizardStep(n))
        } else {
            Err(format!("Step must be between {} and {}", FIRST_STEP, LAST_STEP))
        }
    }
}

impl From<WizardStep> for u8 {
    fn from(step: WizardStep) -> Self {
        step.0
    }
}

/// Result of asking the wizard to move forward
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Advance {
    Moved(WizardStep),
    /// "Next" on the last step finalizes instead of moving
    Finalize,
}

/// Entry guard for leaving `step`; only the first two steps have one
fn guard(step: WizardStep, draft: &ChecklistDraft) -> AppResult<()> {
    match step.number() {
        1 if draft.identity.required_name().trim().is_empty() => {
            let message = match draft.identity.install_type {
                InstallType::Client => "Client name is required",
                InstallType::Event => "Event name is required",
            };
            Err(AppError::Validation(message.to_string()))
        }
        2 if draft.equipment.machine_id.is_none() => {
            Err(AppError::Validation("A machine must be selected".to_string()))
        }
        _ => Ok(()),
    }
}

pub fn next(step: WizardStep, draft: &ChecklistDraft) -> AppResult<Advance> {
    guard(step, draft)?;
    if step.is_last() {
        Ok(Advance::Finalize)
    } else {
        Ok(Advance::Moved(WizardStep(step.0 + 1)))
    }
}

/// Previous step; the first step has no predecessor and stays put
pub fn prev(step: WizardStep) -> WizardStep {
    WizardStep(step.0.saturating_sub(1).max(FIRST_STEP))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::draft::{DraftCommand, IdentityPatch, MachineSnapshot};

    fn machines() -> Vec<MachineSnapshot> {
        vec![MachineSnapshot {
            id: 3,
            name: "Jura X8".into(),
            water_system: None,
            has_steamer: false,
        }]
    }

    fn named(install_type: InstallType, client: &str, event: &str) -> ChecklistDraft {
        ChecklistDraft::default().apply(
            DraftCommand::UpdateIdentity {
                patch: IdentityPatch {
                    install_type: Some(install_type),
                    client_name: Some(client.into()),
                    event_name: Some(event.into()),
                    ..Default::default()
                },
            },
            &[],
        )
    }

    #[test]
    fn test_step_one_requires_name_for_type() {
        let step = WizardStep::first();
        assert!(next(step, &ChecklistDraft::default()).is_err());
        assert!(next(step, &named(InstallType::Client, "  ", "Feira")).is_err());
        assert!(next(step, &named(InstallType::Event, "Padaria", "")).is_err());
        assert_eq!(
            next(step, &named(InstallType::Client, "Padaria", "")).unwrap(),
            Advance::Moved(WizardStep(2))
        );
        assert_eq!(
            next(step, &named(InstallType::Event, "", "Feira")).unwrap(),
            Advance::Moved(WizardStep(2))
        );
    }

    #[test]
    fn test_step_two_requires_machine() {
        let draft = named(InstallType::Client, "Padaria", "");
        let step = WizardStep(2);
        assert!(matches!(next(step, &draft), Err(AppError::Validation(_))));

        let draft = draft.apply(DraftCommand::SelectMachine { machine_id: 3 }, &machines());
        assert_eq!(next(step, &draft).unwrap(), Advance::Moved(WizardStep(3)));
    }

    #[test]
    fn test_later_steps_have_no_guard() {
        let draft = ChecklistDraft::default();
        for n in 3..LAST_STEP {
            assert_eq!(next(WizardStep(n), &draft).unwrap(), Advance::Moved(WizardStep(n + 1)));
        }
        assert_eq!(next(WizardStep(LAST_STEP), &draft).unwrap(), Advance::Finalize);
    }

    #[test]
    fn test_prev_is_noop_at_first_step() {
        assert_eq!(prev(WizardStep::first()), WizardStep::first());
        assert_eq!(prev(WizardStep(5)), WizardStep(4));
    }

    #[test]
    fn test_step_bounds_on_the_wire() {
        assert!(serde_json::from_str::<WizardStep>("0").is_err());
        assert!(serde_json::from_str::<WizardStep>("10").is_err());
        assert_eq!(serde_json::from_str::<WizardStep>("9").unwrap().title(), "Validação e financeiro");
    }
}
