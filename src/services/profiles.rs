//! Staff profiles and request sessions

use serde_json::json;
use uuid::Uuid;

use super::history::HistoryService;
use crate::{
    error::{AppError, AppResult},
    models::{
        policy::Role,
        profile::{Profile, Session, SessionClaims},
    },
    repository::Repository,
};

#[derive(Clone)]
pub struct ProfilesService {
    repository: Repository,
    history: HistoryService,
}

impl ProfilesService {
    pub fn new(repository: Repository, history: HistoryService) -> Self {
        Self { repository, history }
    }

    /// Resolve the session of a verified token, creating the profile on first sign-in
    pub async fn session_for(&self, claims: &SessionClaims) -> AppResult<Session> {
        let profile = self
            .repository
            .profiles
            .get_or_create(claims.sub, claims.email.as_deref())
            .await?;
        Ok(Session::new(profile))
    }

    pub async fn list(&self) -> AppResult<Vec<Profile>> {
        self.repository.profiles.list().await
    }

    pub async fn get_by_id(&self, id: Uuid) -> AppResult<Profile> {
        self.repository.profiles.get_by_id(id).await
    }

    pub async fn update_role(&self, id: Uuid, role: Role, session: &Session) -> AppResult<Profile> {
        if id == session.user_id && role != session.role() {
            return Err(AppError::BadRequest("You cannot change your own role".to_string()));
        }
        let profile = self.repository.profiles.update_role(id, role).await?;
        tracing::info!("Role of {} set to {} by {}", id, role, session.actor());
        self.history
            .note(session, "update_role", "profiles", id, json!({ "role": role.as_str() }))
            .await;
        Ok(profile)
    }
}
