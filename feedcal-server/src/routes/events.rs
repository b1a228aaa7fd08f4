//! Upcoming events endpoint, consumed by the rotating "upcoming" strip.

use axum::{
    Json, Router,
    extract::{Query, State},
    routing::get,
};

use feedcal_core::{Event, parse_limit, upcoming_events};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/events", get(list_events))
}

/// GET /events?limit=N - Upcoming events, earliest first
///
/// Always 200. The query is read as raw pairs so a malformed or repeated
/// `limit` falls back to the default instead of being rejected.
async fn list_events(
    State(state): State<AppState>,
    Query(params): Query<Vec<(String, String)>>,
) -> Json<Vec<Event>> {
    let raw_limit = params
        .iter()
        .find(|(key, _)| key == "limit")
        .map(|(_, value)| value.as_str());
    let limit = parse_limit(raw_limit, state.default_limit);

    let events = upcoming_events(&state.feed, state.clock.as_ref(), limit).await;
    tracing::debug!(limit, returned = events.len(), "served upcoming events");

    Json(events)
}
