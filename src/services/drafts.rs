//! Redis-backed store for in-progress wizard sessions

use async_trait::async_trait;
use redis::{AsyncCommands, Client};
use uuid::Uuid;

use crate::{
    error::{AppError, AppResult},
    wizard::DraftSession,
};

fn draft_key(id: Uuid) -> String {
    format!("checklist_draft:{}", id)
}

/// Storage of in-progress wizard sessions
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DraftCache: Send + Sync {
    /// Write the session, refreshing its expiry
    async fn save(&self, session: &DraftSession) -> AppResult<()>;

    /// Load a session owned by `owner`
    async fn get(&self, id: Uuid, owner: Uuid) -> AppResult<DraftSession>;

    async fn delete(&self, id: Uuid) -> AppResult<()>;
}

#[derive(Clone)]
pub struct DraftStore {
    client: Client,
    ttl_seconds: u64,
}

impl DraftStore {
    /// Create the store; no connection is made until first use
    pub fn new(url: &str, ttl_seconds: u64) -> AppResult<Self> {
        let client = Client::open(url)
            .map_err(|e| AppError::Internal(format!("Failed to create Redis client: {}", e)))?;
        Ok(Self { client, ttl_seconds })
    }

    /// Check that Redis answers
    pub async fn ping(&self) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        redis::cmd("PING").query_async::<_, String>(&mut conn).await?;
        Ok(())
    }
}

#[async_trait]
impl DraftCache for DraftStore {
    async fn save(&self, session: &DraftSession) -> AppResult<()> {
        let payload = serde_json::to_string(session)
            .map_err(|e| AppError::Internal(format!("Failed to serialize draft: {}", e)))?;
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.set_ex::<_, _, ()>(draft_key(session.id), payload, self.ttl_seconds)
            .await?;
        Ok(())
    }

    async fn get(&self, id: Uuid, owner: Uuid) -> AppResult<DraftSession> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        let payload: Option<String> = conn.get(draft_key(id)).await?;
        let payload = payload.ok_or_else(|| {
            AppError::NotFound(format!("Draft {} not found or expired", id))
        })?;

        let session: DraftSession = serde_json::from_str(&payload)
            .map_err(|e| AppError::DraftCache(format!("Corrupt draft {}: {}", id, e)))?;
        if session.owner != owner {
            return Err(AppError::Authorization(format!(
                "Draft {} belongs to another user",
                id
            )));
        }
        Ok(session)
    }

    async fn delete(&self, id: Uuid) -> AppResult<()> {
        let mut conn = self.client.get_multiplexed_async_connection().await?;
        conn.del::<_, ()>(draft_key(id)).await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_draft_key_layout() {
        let id = Uuid::nil();
        assert_eq!(draft_key(id), "checklist_draft:00000000-0000-0000-0000-000000000000");
    }

    #[test]
    fn test_client_open_is_lazy() {
        assert!(DraftStore::new("redis://127.0.0.1:1/", 60).is_ok());
        assert!(DraftStore::new("not a url", 60).is_err());
    }
}
