use axum::{Json, extract::State};
use photocomp_common::state::BaseDbTrait;
use tracing::warn;

use crate::server::AppState;

/// Always answers 200; the body tells whether the store is reachable.
pub async fn check(State(state): State<AppState>) -> Json<[&'static str; 1]> {
    match state.db.health_check().await {
        Ok(()) => Json(["live"]),
        Err(e) => {
            warn!(error = %e, "health check failed");
            Json(["down"])
        }
    }
}
