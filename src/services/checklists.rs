//! Checklists service: wizard drafts, submission and persisted checklists

use serde_json::json;
use uuid::Uuid;

use super::{
    drafts::{DraftCache, DraftStore},
    history::HistoryService,
};
use crate::{
    documents::{self, Document},
    error::{AppError, AppResult},
    models::{
        checklist::{Checklist, ChecklistQuery, ChecklistShort},
        enums::{ChecklistStatus, SubmitStatus},
        profile::Session,
    },
    repository::Repository,
    wizard::{self, Advance, ChecklistSink, DraftCommand, DraftSession, MachineSnapshot},
};

/// What happened after "next" on a draft
#[derive(Debug, Clone)]
pub enum NextOutcome {
    Moved(DraftSession),
    /// The last step was confirmed and the checklist persisted under this id
    Submitted(i32),
}

#[derive(Clone)]
pub struct ChecklistsService {
    repository: Repository,
    drafts: DraftStore,
    history: HistoryService,
}

impl ChecklistsService {
    pub fn new(repository: Repository, drafts: DraftStore, history: HistoryService) -> Self {
        Self {
            repository,
            drafts,
            history,
        }
    }

    // -----------------------------------------------------------------------
    // Drafts
    // -----------------------------------------------------------------------

    pub async fn start_draft(&self, session: &Session) -> AppResult<DraftSession> {
        let draft = DraftSession::new(session.user_id);
        self.drafts.save(&draft).await?;
        tracing::debug!("Draft {} started by {}", draft.id, session.actor());
        Ok(draft)
    }

    pub async fn get_draft(&self, id: Uuid, session: &Session) -> AppResult<DraftSession> {
        self.drafts.get(id, session.user_id).await
    }

    pub async fn discard_draft(&self, id: Uuid, session: &Session) -> AppResult<()> {
        self.drafts.get(id, session.user_id).await?;
        self.drafts.delete(id).await
    }

    /// Apply one field command to a draft
    pub async fn dispatch(&self, id: Uuid, command: DraftCommand, session: &Session) -> AppResult<DraftSession> {
        command.check()?;
        let draft = self.drafts.get(id, session.user_id).await?;

        let machines: Vec<MachineSnapshot> = match command.machine_lookup() {
            Some(machine_id) => self
                .repository
                .machines
                .find(machine_id)
                .await?
                .as_ref()
                .map(MachineSnapshot::from)
                .into_iter()
                .collect(),
            None => Vec::new(),
        };

        let draft = draft.dispatch(command, &machines);
        self.drafts.save(&draft).await?;
        Ok(draft)
    }

    /// Move forward; confirming the last step finalizes the checklist
    pub async fn next(&self, id: Uuid, session: &Session) -> AppResult<NextOutcome> {
        let outcome = advance_draft(&self.drafts, &self.repository.checklists, id, session.user_id).await?;
        if let NextOutcome::Submitted(record_id) = &outcome {
            self.note_submitted(*record_id, SubmitStatus::Finalized, session).await;
        }
        Ok(outcome)
    }

    pub async fn prev(&self, id: Uuid, session: &Session) -> AppResult<DraftSession> {
        let mut draft = self.drafts.get(id, session.user_id).await?;
        draft.back();
        self.drafts.save(&draft).await?;
        Ok(draft)
    }

    /// Persist a draft as `Rascunho` or `Finalizado`
    pub async fn submit(&self, id: Uuid, status: SubmitStatus, session: &Session) -> AppResult<i32> {
        let draft = self.drafts.get(id, session.user_id).await?;
        let record_id = submit_draft(&self.drafts, &self.repository.checklists, &draft, status).await?;
        self.note_submitted(record_id, status, session).await;
        Ok(record_id)
    }

    async fn note_submitted(&self, record_id: i32, status: SubmitStatus, session: &Session) {
        self.history
            .note(
                session,
                "create",
                "checklists",
                record_id,
                json!({ "status": ChecklistStatus::from(status).as_str() }),
            )
            .await;
    }

    // -----------------------------------------------------------------------
    // Persisted checklists
    // -----------------------------------------------------------------------

    pub async fn list(&self, query: &ChecklistQuery) -> AppResult<(Vec<ChecklistShort>, i64)> {
        self.repository.checklists.list(query).await
    }

    pub async fn get_by_id(&self, id: i32) -> AppResult<Checklist> {
        self.repository.checklists.get_by_id(id).await
    }

    pub async fn cancel(&self, id: i32, session: &Session) -> AppResult<Checklist> {
        let current = self.repository.checklists.get_by_id(id).await?;
        if current.status == ChecklistStatus::Cancelled {
            return Err(AppError::Conflict(format!("Checklist {} is already cancelled", id)));
        }

        let checklist = self
            .repository
            .checklists
            .set_status(id, ChecklistStatus::Cancelled)
            .await?;
        tracing::info!("Checklist {} cancelled by {}", id, session.actor());

        self.history
            .note(
                session,
                "cancel",
                "checklists",
                id,
                json!({ "previous_status": current.status.as_str() }),
            )
            .await;
        Ok(checklist)
    }

    pub async fn delete(&self, id: i32, session: &Session) -> AppResult<()> {
        self.repository.checklists.delete(id).await?;
        tracing::info!("Checklist {} deleted by {}", id, session.actor());

        self.history
            .note(session, "delete", "checklists", id, json!({}))
            .await;
        Ok(())
    }

    // -----------------------------------------------------------------------
    // Documents
    // -----------------------------------------------------------------------

    pub async fn report(&self, id: i32) -> AppResult<Document> {
        let checklist = self.repository.checklists.get_by_id(id).await?;
        Ok(documents::checklist_report::render(&checklist))
    }

    /// Blank form, seeded from a machine (and one of its variants) when given
    pub async fn blank_form(&self, machine_id: Option<i32>, variant_id: Option<Uuid>) -> AppResult<Document> {
        let specs = match machine_id {
            Some(machine_id) => {
                let machine = self.repository.machines.get_by_id(machine_id).await?;
                let specs = match variant_id {
                    Some(variant_id) => {
                        let variant = machine.variant(variant_id).ok_or_else(|| {
                            AppError::NotFound(format!("Variant {} not found", variant_id))
                        })?;
                        machine.resolve(variant)
                    }
                    None => machine.specs(),
                };
                Some(specs)
            }
            None if variant_id.is_some() => {
                return Err(AppError::BadRequest(
                    "variant_id requires machine_id".to_string(),
                ));
            }
            None => None,
        };
        Ok(documents::blank_form::render(specs.as_ref()))
    }
}

/// Load a draft and confirm its current step; on the last step it is submitted as `Finalizado`
async fn advance_draft<C, S>(drafts: &C, sink: &S, id: Uuid, owner: Uuid) -> AppResult<NextOutcome>
where
    C: DraftCache + ?Sized,
    S: ChecklistSink + ?Sized,
{
    let mut draft = drafts.get(id, owner).await?;
    match draft.advance()? {
        Advance::Moved(_) => {
            drafts.save(&draft).await?;
            Ok(NextOutcome::Moved(draft))
        }
        Advance::Finalize => {
            let record_id = submit_draft(drafts, sink, &draft, SubmitStatus::Finalized).await?;
            Ok(NextOutcome::Submitted(record_id))
        }
    }
}

/// Insert the draft, then discard it. On failure the cached draft is left as it was.
async fn submit_draft<C, S>(drafts: &C, sink: &S, draft: &DraftSession, status: SubmitStatus) -> AppResult<i32>
where
    C: DraftCache + ?Sized,
    S: ChecklistSink + ?Sized,
{
    let record_id = wizard::submit(&draft.draft, status, Some(draft.owner), sink).await?;

    tracing::info!(
        "Checklist {} saved as {} from draft {}",
        record_id,
        ChecklistStatus::from(status),
        draft.id
    );

    if let Err(e) = drafts.delete(draft.id).await {
        // The record exists; a stale draft only lingers until its TTL
        tracing::warn!("Failed to discard draft {}: {}", draft.id, e);
    }
    Ok(record_id)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        services::drafts::MockDraftCache,
        wizard::{
            draft::IdentityPatch,
            steps::LAST_STEP,
            submission::MockChecklistSink,
            WizardStep,
        },
    };

    fn filled_session(contract_num: &str) -> DraftSession {
        let session = DraftSession::new(Uuid::new_v4()).dispatch(
            DraftCommand::UpdateIdentity {
                patch: IdentityPatch { client_name: Some("Padaria Central".into()), ..Default::default() },
            },
            &[],
        );
        session.dispatch(
            DraftCommand::SetContract { contract_num: Some(contract_num.into()), notes: None },
            &[],
        )
    }

    fn cache_returning(session: &DraftSession) -> MockDraftCache {
        let mut drafts = MockDraftCache::new();
        let loaded = session.clone();
        drafts.expect_get().returning(move |_, _| Ok(loaded.clone()));
        drafts
    }

    #[tokio::test]
    async fn test_failed_insert_keeps_draft() {
        let session = filled_session("C-7");
        let mut drafts = MockDraftCache::new();
        drafts.expect_delete().times(0);

        let mut sink = MockChecklistSink::new();
        sink.expect_insert_checklist()
            .times(1)
            .returning(|_| Err(AppError::Internal("connection reset".into())));

        let err = submit_draft(&drafts, &sink, &session, SubmitStatus::Finalized)
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::Internal(_)));
    }

    #[tokio::test]
    async fn test_successful_insert_discards_draft_once() {
        let session = filled_session("C-7");
        let draft_id = session.id;
        let owner = session.owner;

        let mut drafts = MockDraftCache::new();
        drafts.expect_delete()
            .withf(move |id| *id == draft_id)
            .times(1)
            .returning(|_| Ok(()));

        let mut sink = MockChecklistSink::new();
        sink.expect_insert_checklist()
            .withf(move |record| record.created_by == Some(owner) && record.status == ChecklistStatus::Draft)
            .times(1)
            .returning(|_| Ok(55));

        let id = submit_draft(&drafts, &sink, &session, SubmitStatus::Draft).await.unwrap();
        assert_eq!(id, 55);
    }

    #[tokio::test]
    async fn test_discard_failure_does_not_fail_submission() {
        let session = filled_session("C-7");
        let mut drafts = MockDraftCache::new();
        drafts.expect_delete()
            .times(1)
            .returning(|_| Err(AppError::DraftCache("redis down".into())));

        let mut sink = MockChecklistSink::new();
        sink.expect_insert_checklist().times(1).returning(|_| Ok(9));

        assert_eq!(submit_draft(&drafts, &sink, &session, SubmitStatus::Draft).await.unwrap(), 9);
    }

    #[tokio::test]
    async fn test_next_on_last_step_without_contract_is_rejected() {
        let mut session = filled_session("");
        session.step = WizardStep::try_from(LAST_STEP).unwrap();

        let mut drafts = cache_returning(&session);
        drafts.expect_save().times(0);
        drafts.expect_delete().times(0);

        let mut sink = MockChecklistSink::new();
        sink.expect_insert_checklist().times(0);

        let err = advance_draft(&drafts, &sink, session.id, session.owner).await.unwrap_err();
        assert!(matches!(err, AppError::Validation(_)));
    }

    #[tokio::test]
    async fn test_next_on_last_step_finalizes() {
        let mut session = filled_session("C-100");
        session.step = WizardStep::try_from(LAST_STEP).unwrap();

        let mut drafts = cache_returning(&session);
        drafts.expect_save().times(0);
        drafts.expect_delete().times(1).returning(|_| Ok(()));

        let mut sink = MockChecklistSink::new();
        sink.expect_insert_checklist()
            .withf(|record| {
                record.status == ChecklistStatus::Finalized && record.contract_num.as_deref() == Some("C-100")
            })
            .times(1)
            .returning(|_| Ok(100));

        let outcome = advance_draft(&drafts, &sink, session.id, session.owner).await.unwrap();
        assert!(matches!(outcome, NextOutcome::Submitted(100)));
    }

    #[tokio::test]
    async fn test_next_on_middle_step_saves_moved_draft() {
        let session = filled_session("");

        let mut drafts = cache_returning(&session);
        drafts.expect_save()
            .withf(|saved| saved.step.number() == 2)
            .times(1)
            .returning(|_| Ok(()));
        drafts.expect_delete().times(0);

        let mut sink = MockChecklistSink::new();
        sink.expect_insert_checklist().times(0);

        match advance_draft(&drafts, &sink, session.id, session.owner).await.unwrap() {
            NextOutcome::Moved(moved) => assert_eq!(moved.step.number(), 2),
            other => panic!("unexpected outcome {:?}", other),
        }
    }
}
