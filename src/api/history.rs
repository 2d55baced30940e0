//! Audit history endpoints, including the live feed

use std::convert::Infallible;

use axum::{
    extract::{Query, State},
    response::sse::{Event, KeepAlive, Sse},
    Json,
};
use tokio_stream::{
    wrappers::{errors::BroadcastStreamRecvError, BroadcastStream},
    Stream, StreamExt,
};

use crate::{
    error::AppResult,
    models::{
        history::{HistoryEntry, HistoryQuery},
        policy::{Action, Resource},
    },
};

use super::AuthenticatedUser;

/// Latest history entries
#[utoipa::path(
    get,
    path = "/history",
    tag = "history",
    security(("bearer_auth" = [])),
    params(HistoryQuery),
    responses(
        (status = 200, description = "History entries, newest first", body = Vec<HistoryEntry>)
    )
)]
pub async fn list_history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
    Query(query): Query<HistoryQuery>,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    session.require(Resource::History, Action::View)?;
    let entries = state.services.history.list(&query).await?;
    Ok(Json(entries))
}

/// Live feed of history entries as server-sent events
#[utoipa::path(
    get,
    path = "/history/stream",
    tag = "history",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Event stream of `history` events carrying a HistoryEntry", content_type = "text/event-stream")
    )
)]
pub async fn stream_history(
    State(state): State<crate::AppState>,
    AuthenticatedUser(session): AuthenticatedUser,
) -> AppResult<Sse<impl Stream<Item = Result<Event, Infallible>>>> {
    session.require(Resource::History, Action::View)?;
    let receiver = state.services.history.subscribe();
    tracing::debug!("History stream opened by {}", session.actor());

    let stream = BroadcastStream::new(receiver).filter_map(|message| match message {
        Ok(entry) => match Event::default().event("history").json_data(&entry) {
            Ok(event) => Some(Ok::<_, Infallible>(event)),
            Err(e) => {
                tracing::warn!("Failed to encode history entry {}: {}", entry.id, e);
                None
            }
        },
        Err(BroadcastStreamRecvError::Lagged(skipped)) => {
            tracing::warn!("History subscriber lagged, {} entries skipped", skipped);
            None
        }
    });

    Ok(Sse::new(stream).keep_alive(KeepAlive::default()))
}
