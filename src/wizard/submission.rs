//! Submission builder: composes a draft into one persisted checklist record

use async_trait::async_trait;
use uuid::Uuid;

use super::draft::ChecklistDraft;
use crate::{
    error::{AppError, AppResult},
    models::{
        checklist::{FinancialsRecord, NewChecklist},
        enums::{ChecklistStatus, InstallType, SubmitStatus},
    },
};

/// Destination of a submitted checklist (one insert per submission)
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ChecklistSink: Send + Sync {
    /// Insert the record and return its id
    async fn insert_checklist(&self, record: &NewChecklist) -> AppResult<i32>;
}

fn non_empty(s: &str) -> Option<String> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_string())
    }
}

/// Finalization requires a contract number; drafts have no required fields
pub fn validate(draft: &ChecklistDraft, status: SubmitStatus) -> AppResult<()> {
    if status == SubmitStatus::Finalized && draft.contract.contract_num.trim().is_empty() {
        return Err(AppError::Validation(
            "Contract number is required to finalize a checklist".to_string(),
        ));
    }
    Ok(())
}

pub fn build_record(draft: &ChecklistDraft, status: SubmitStatus, created_by: Option<Uuid>) -> AppResult<NewChecklist> {
    let identity = &draft.identity;
    let equipment = &draft.equipment;
    let financials = &draft.financials;

    let (client_name, event_name) = match identity.install_type {
        InstallType::Client => (non_empty(&identity.client_name), None),
        InstallType::Event => (None, non_empty(&identity.event_name)),
    };

    let event_days = identity
        .event_days
        .map(i32::try_from)
        .transpose()
        .map_err(|_| AppError::Validation("Event days is out of range".to_string()))?;

    Ok(NewChecklist {
        install_type: identity.install_type,
        client_name,
        event_name,
        install_date: identity.install_date,
        pickup_date: identity.pickup_date,
        event_days,
        responsible: non_empty(&identity.responsible),
        phone: non_empty(&identity.phone),
        address: non_empty(&identity.address),
        quantity: equipment.quantity as i32,
        machine_id: equipment.machine_id,
        machine_name: equipment.machine.as_ref().map(|m| m.name.clone()),
        water_install: draft.technical.water_install,
        sewage_install: draft.technical.sewage_install,
        steam_wand: draft.technical.steam_wand,
        payment_system: draft.technical.payment_system,
        machine_units: equipment.units.clone(),
        tools_list: draft.tools.clone(),
        preparations: draft.preparations.clone(),
        drinks_list: draft.drinks.clone(),
        accessories_list: draft.accessories.clone(),
        supplies_list: draft.supplies.clone(),
        local_validation: draft.local_validation.clone(),
        financials: FinancialsRecord {
            machine: financials.machine,
            supplies: financials.supplies,
            services: financials.services,
            extras: financials.extras,
            total: financials.total()?,
        },
        contract_num: non_empty(&draft.contract.contract_num),
        notes: non_empty(&draft.contract.notes),
        status: ChecklistStatus::from(status),
        created_by,
    })
}

/// Validate, compose and insert. Validation failures never reach the sink.
pub async fn submit<S>(
    draft: &ChecklistDraft,
    status: SubmitStatus,
    created_by: Option<Uuid>,
    sink: &S,
) -> AppResult<i32>
where
    S: ChecklistSink + ?Sized,
{
    validate(draft, status)?;
    let record = build_record(draft, status, created_by)?;
    sink.insert_checklist(&record).await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::wizard::{
        draft::{DraftCommand, IdentityPatch, MachineSnapshot},
        steps::{self, Advance, WizardStep},
    };
    use std::sync::{Arc, Mutex};

    fn machines() -> Vec<MachineSnapshot> {
        vec![MachineSnapshot {
            id: 11,
            name: "Nespresso Zenius".into(),
            water_system: Some("Reservatório".into()),
            has_steamer: false,
        }]
    }

    #[tokio::test]
    async fn test_finalize_without_contract_never_reaches_backend() {
        let mut sink = MockChecklistSink::new();
        sink.expect_insert_checklist().times(0);

        for contract in ["", "   "] {
            let draft = ChecklistDraft::default().apply(
                DraftCommand::SetContract { contract_num: Some(contract.into()), notes: None },
                &[],
            );
            let err = submit(&draft, SubmitStatus::Finalized, None, &sink).await.unwrap_err();
            assert!(matches!(err, AppError::Validation(_)));
        }
    }

    #[tokio::test]
    async fn test_draft_save_accepts_empty_draft() {
        let mut sink = MockChecklistSink::new();
        sink.expect_insert_checklist()
            .times(1)
            .withf(|record| {
                record.status == ChecklistStatus::Draft
                    && record.client_name.is_none()
                    && record.contract_num.is_none()
                    && record.machine_units.len() == 1
            })
            .returning(|_| Ok(41));

        let id = submit(&ChecklistDraft::default(), SubmitStatus::Draft, None, &sink)
            .await
            .unwrap();
        assert_eq!(id, 41);
    }

    #[tokio::test]
    async fn test_backend_failure_is_surfaced() {
        let mut sink = MockChecklistSink::new();
        sink.expect_insert_checklist()
            .times(1)
            .returning(|_| Err(AppError::Conflict("duplicate contract".into())));

        let err = submit(&ChecklistDraft::default(), SubmitStatus::Draft, None, &sink)
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Conflict: duplicate contract");
    }

    #[tokio::test]
    async fn test_event_days_beyond_column_range_is_rejected() {
        let mut sink = MockChecklistSink::new();
        sink.expect_insert_checklist().times(0);

        let draft = ChecklistDraft::default().apply(
            DraftCommand::UpdateIdentity {
                patch: IdentityPatch { event_days: Some(Some(u32::MAX)), ..Default::default() },
            },
            &[],
        );
        let err = submit(&draft, SubmitStatus::Draft, None, &sink).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[test]
    fn test_event_walkthrough_payload() {
        let captured: Arc<Mutex<Option<NewChecklist>>> = Arc::new(Mutex::new(None));
        let mut sink = MockChecklistSink::new();
        let slot = captured.clone();
        sink.expect_insert_checklist().times(1).returning(move |record| {
            *slot.lock().unwrap() = Some(record.clone());
            Ok(100)
        });

        let catalog = machines();
        let mut draft = ChecklistDraft::default().apply(
            DraftCommand::UpdateIdentity {
                patch: IdentityPatch {
                    install_type: Some(InstallType::Event),
                    event_name: Some("Feira do Café".into()),
                    event_days: Some(Some(3)),
                    ..Default::default()
                },
            },
            &catalog,
        );

        let mut step = WizardStep::first();
        let outcome = loop {
            if step.number() == 2 {
                draft = draft.apply(DraftCommand::SelectMachine { machine_id: 11 }, &catalog);
            }
            match steps::next(step, &draft).unwrap() {
                Advance::Moved(to) => step = to,
                Advance::Finalize => break step,
            }
        };
        assert!(outcome.is_last());

        draft = draft.apply(
            DraftCommand::SetContract { contract_num: Some("C-100".into()), notes: None },
            &catalog,
        );
        let id = tokio_test::block_on(submit(&draft, SubmitStatus::Finalized, None, &sink)).unwrap();
        assert_eq!(id, 100);

        let record = captured.lock().unwrap().take().unwrap();
        let payload = serde_json::to_value(&record).unwrap();
        assert_eq!(payload["install_type"], "Evento");
        assert_eq!(payload["event_name"], "Feira do Café");
        assert!(payload["client_name"].is_null());
        assert_eq!(payload["event_days"], 3);
        assert!(payload["pickup_date"].is_null());
        assert_eq!(payload["status"], "Finalizado");
        assert_eq!(payload["contract_num"], "C-100");
        assert_eq!(payload["machine_name"], "Nespresso Zenius");
        assert_eq!(payload["financials"]["total"].as_f64(), Some(0.0));
        assert_eq!(payload["accessories_list"]["noAccessories"], false);
        assert!(payload["supplies_list"]["noSupplies"].is_boolean());
        assert_eq!(payload["machine_units"].as_array().map(Vec::len), Some(1));
    }

    #[test]
    fn test_client_record_drops_event_name() {
        let draft = ChecklistDraft::default().apply(
            DraftCommand::UpdateIdentity {
                patch: IdentityPatch {
                    client_name: Some("  Padaria Central ".into()),
                    event_name: Some("leftover".into()),
                    ..Default::default()
                },
            },
            &[],
        );
        let record = build_record(&draft, SubmitStatus::Draft, None).unwrap();
        assert_eq!(record.client_name.as_deref(), Some("Padaria Central"));
        assert_eq!(record.event_name, None);
    }
}
