//! Server-held wizard session: one draft plus the operator's current step

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use super::{
    draft::{ChecklistDraft, DraftCommand, MachineSnapshot},
    steps::{self, Advance, WizardStep},
};
use crate::error::{AppError, AppResult};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct DraftSession {
    pub id: Uuid,
    /// Staff member who opened the wizard
    pub owner: Uuid,
    pub step: WizardStep,
    pub draft: ChecklistDraft,
    pub updated_at: DateTime<Utc>,
}

impl DraftSession {
    pub fn new(owner: Uuid) -> Self {
        Self {
            id: Uuid::new_v4(),
            owner,
            step: WizardStep::first(),
            draft: ChecklistDraft::default(),
            updated_at: Utc::now(),
        }
    }

    pub fn dispatch(mut self, command: DraftCommand, machines: &[MachineSnapshot]) -> Self {
        self.draft = self.draft.apply(command, machines);
        self.updated_at = Utc::now();
        self
    }

    /// Move forward; on the last step the session stays put and asks for finalization
    pub fn advance(&mut self) -> AppResult<Advance> {
        let outcome = steps::next(self.step, &self.draft)?;
        if let Advance::Moved(step) = outcome {
            self.step = step;
            self.updated_at = Utc::now();
        }
        Ok(outcome)
    }

    pub fn back(&mut self) {
        self.step = steps::prev(self.step);
        self.updated_at = Utc::now();
    }
}

/// Session view with derived values the client displays
#[derive(Debug, Clone, Serialize, ToSchema)]
pub struct DraftView {
    #[serde(flatten)]
    pub session: DraftSession,
    pub step_title: &'static str,
    #[serde(with = "rust_decimal::serde::float")]
    #[schema(value_type = f64)]
    pub total: rust_decimal::Decimal,
}

impl TryFrom<DraftSession> for DraftView {
    type Error = AppError;

    fn try_from(session: DraftSession) -> AppResult<Self> {
        Ok(Self {
            step_title: session.step.title(),
            total: session.draft.total()?,
            session,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_failed_guard_keeps_step() {
        let mut session = DraftSession::new(Uuid::new_v4());
        let err = session.advance().unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
        assert_eq!(session.step, WizardStep::first());
    }

    #[test]
    fn test_back_then_forward() {
        let mut session = DraftSession::new(Uuid::new_v4());
        session.step = WizardStep::try_from(4).unwrap();
        session.back();
        assert_eq!(session.step.number(), 3);
        assert_eq!(session.advance().unwrap(), Advance::Moved(WizardStep::try_from(4).unwrap()));
    }

    #[test]
    fn test_session_survives_cache_round_trip() {
        let session = DraftSession::new(Uuid::new_v4()).dispatch(
            DraftCommand::ToggleSupply { category: "Cafés".into(), key: "Grão 1kg".into() },
            &[],
        );
        let json = serde_json::to_string(&session).unwrap();
        let restored: DraftSession = serde_json::from_str(&json).unwrap();
        assert_eq!(restored, session);
        assert_eq!(DraftView::try_from(restored).unwrap().step_title, "Identificação");
    }
}
