use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use super::super::AppState;

const EVENTS_LIMIT_MAX: usize = 500;

pub async fn get_agents(State(state): State<AppState>) -> Response {
    match state.catalog.list_agents().await {
        Ok(agents) => (
            StatusCode::OK,
            Json(json!({ "success": true, "agents": agents })),
        )
            .into_response(),
        Err(e) => storage_error_response(e),
    }
}

pub async fn get_agent(Path(id): Path<String>, State(state): State<AppState>) -> Response {
    match state.catalog.get_agent(&id).await {
        Ok(Some(agent)) => (
            StatusCode::OK,
            Json(json!({ "success": true, "agent": agent })),
        )
            .into_response(),
        Ok(None) => (
            StatusCode::NOT_FOUND,
            Json(json!({ "success": false, "error": "Agent not found" })),
        )
            .into_response(),
        Err(e) => storage_error_response(e),
    }
}

pub async fn get_agent_events(Path(id): Path<String>, State(state): State<AppState>) -> Response {
    match state.catalog.events_for_agent(&id).await {
        Ok(events) => (
            StatusCode::OK,
            Json(json!({ "success": true, "events": events })),
        )
            .into_response(),
        Err(e) => storage_error_response(e),
    }
}

#[derive(serde::Deserialize)]
pub struct EventsQuery {
    #[serde(default = "default_events_limit")]
    limit: usize,
}

fn default_events_limit() -> usize {
    50
}

pub async fn get_events(
    Query(query): Query<EventsQuery>,
    State(state): State<AppState>,
) -> Response {
    let limit = query.limit.min(EVENTS_LIMIT_MAX);
    match state.catalog.list_events(limit).await {
        Ok(events) => (
            StatusCode::OK,
            Json(json!({ "success": true, "events": events })),
        )
            .into_response(),
        Err(e) => storage_error_response(e),
    }
}

fn storage_error_response(err: anyhow::Error) -> Response {
    error!("Catalog query failed: {:#}", err);
    (
        StatusCode::INTERNAL_SERVER_ERROR,
        Json(json!({ "success": false, "error": "catalog persistence failure" })),
    )
        .into_response()
}
