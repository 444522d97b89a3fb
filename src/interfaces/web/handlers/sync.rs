use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;
use tracing::error;

use super::super::AppState;
use crate::core::sync::{DiscoveryResolver, ImportReconciler, ImportRequest, SyncError};

pub async fn discover_gateway_agents(State(state): State<AppState>) -> Response {
    let resolver = DiscoveryResolver::new(state.gateway.clone(), state.catalog.clone());
    match resolver.discover().await {
        Ok(outcome) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "agents": outcome.agents,
                "total": outcome.total,
                "already_imported": outcome.already_imported,
            })),
        )
            .into_response(),
        Err(e) => sync_error_response(e),
    }
}

#[derive(serde::Deserialize)]
pub struct ImportPayload {
    #[serde(default)]
    agents: Vec<ImportRequest>,
}

pub async fn import_gateway_agents(
    State(state): State<AppState>,
    Json(payload): Json<ImportPayload>,
) -> Response {
    let reconciler = ImportReconciler::new(state.catalog.clone());
    match reconciler.import(payload.agents).await {
        Ok(outcome) => (
            StatusCode::CREATED,
            Json(json!({
                "success": true,
                "imported": outcome.imported,
                "skipped": outcome.skipped,
            })),
        )
            .into_response(),
        Err(e) => sync_error_response(e),
    }
}

/// Map the taxonomy to status codes. The internal diagnostic goes to the
/// log; the response carries only the stable classification, except for
/// validation errors whose reason describes the caller's own input.
fn sync_error_response(err: SyncError) -> Response {
    error!("{}: {}", err, err.detail());

    let status = match &err {
        SyncError::GatewayUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        SyncError::GatewayListFailed(_) | SyncError::GatewayMalformedResponse(_) => {
            StatusCode::BAD_GATEWAY
        }
        SyncError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
        SyncError::PersistenceFailure(_) | SyncError::Unknown(_) => {
            StatusCode::INTERNAL_SERVER_ERROR
        }
    };
    let message = match &err {
        SyncError::InvalidRequest(reason) => format!("{}: {}", err, reason),
        _ => err.to_string(),
    };

    (status, Json(json!({ "success": false, "error": message }))).into_response()
}
