use std::sync::Arc;

use axum::{
    extract::State,
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::json;

use crate::dispatch::{dispatch, Deps, DispatchResult, NotificationRequest};

/// Create the Axum router for the dispatch service.
pub fn router(deps: Arc<Deps>) -> Router {
    Router::new()
        .route("/notify", post(handle_notify))
        .route("/healthz", get(handle_healthz))
        .with_state(deps)
}

async fn handle_healthz() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Dispatch outcomes are data, not HTTP faults: every well-formed request
/// answers 200 with a `DispatchResult` body.
async fn handle_notify(
    State(deps): State<Arc<Deps>>,
    Json(req): Json<NotificationRequest>,
) -> Json<DispatchResult> {
    Json(dispatch(&deps, req).await)
}
