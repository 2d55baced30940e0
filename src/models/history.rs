//! Audit history model

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use utoipa::{IntoParams, ToSchema};

/// One mutation recorded in `app_history`
#[derive(Debug, Clone, Serialize, Deserialize, FromRow, ToSchema)]
pub struct HistoryEntry {
    pub id: i64,
    pub actor: String,
    /// "create", "update", "delete", "cancel", ...
    pub action: String,
    /// Table the mutation touched
    pub entity: String,
    pub entity_id: Option<String>,
    #[schema(value_type = Object)]
    pub details: serde_json::Value,
    pub created_at: DateTime<Utc>,
}

/// History entry about to be recorded
#[derive(Debug, Clone)]
pub struct NewHistoryEntry {
    pub actor: String,
    pub action: &'static str,
    pub entity: &'static str,
    pub entity_id: Option<String>,
    pub details: serde_json::Value,
}

#[derive(Debug, Deserialize, IntoParams, ToSchema)]
pub struct HistoryQuery {
    pub entity: Option<String>,
    /// Maximum rows (default 100)
    pub limit: Option<i64>,
}
