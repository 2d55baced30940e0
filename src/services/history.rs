//! Audit history: persists mutations and fans them out to live subscribers

use tokio::sync::broadcast;

use crate::{
    error::AppResult,
    models::{
        history::{HistoryEntry, HistoryQuery, NewHistoryEntry},
        profile::Session,
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct HistoryService {
    repository: Repository,
    sender: broadcast::Sender<HistoryEntry>,
}

impl HistoryService {
    pub fn new(repository: Repository, channel_capacity: usize) -> Self {
        let (sender, _) = broadcast::channel(channel_capacity.max(1));
        Self { repository, sender }
    }

    /// Append an entry and publish it.
    ///
    /// The mutation it describes has already been committed, so a failure
    /// here is logged and swallowed.
    pub async fn record(&self, entry: NewHistoryEntry) {
        match self.repository.history.insert(&entry).await {
            Ok(saved) => {
                // No receivers is not an error
                let _ = self.sender.send(saved);
            }
            Err(e) => {
                tracing::warn!(
                    "Failed to record history ({} {} {:?}): {}",
                    entry.action,
                    entry.entity,
                    entry.entity_id,
                    e
                );
            }
        }
    }

    /// Record a mutation made by `session` on one row
    pub async fn note(
        &self,
        session: &Session,
        action: &'static str,
        entity: &'static str,
        entity_id: impl ToString,
        details: serde_json::Value,
    ) {
        self.record(NewHistoryEntry {
            actor: session.actor(),
            action,
            entity,
            entity_id: Some(entity_id.to_string()),
            details,
        })
        .await
    }

    pub async fn list(&self, query: &HistoryQuery) -> AppResult<Vec<HistoryEntry>> {
        self.repository.history.list(query).await
    }

    /// Receive entries recorded from now on, in send order
    pub fn subscribe(&self) -> broadcast::Receiver<HistoryEntry> {
        self.sender.subscribe()
    }
}
