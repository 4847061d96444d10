use axum::{extract::State, Json};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::analysis::{AnalyzerStatus, QueuedAction};
use crate::shared::{AppError, AppState};

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthResponse {
    pub status: HealthStatus,
    pub probe_state: AnalyzerStatus,
    pub active_sessions: usize,
    pub total_players: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum HealthStatus {
    Ok,
}

/// GET /health
#[instrument(name = "health", skip(state))]
pub async fn health(State(state): State<AppState>) -> Result<Json<HealthResponse>, AppError> {
    Ok(Json(HealthResponse {
        status: HealthStatus::Ok,
        probe_state: state.orchestrator.status().await,
        active_sessions: state.session_repository.session_count().await?,
        total_players: state.profile_repository.player_count().await?,
    }))
}

/// GET /api/diagnostics/actions
///
/// Recent raw actions retained by the analyzer's diagnostic queue
#[instrument(name = "recent_actions", skip(state))]
pub async fn recent_actions(State(state): State<AppState>) -> Json<Vec<QueuedAction>> {
    Json(state.orchestrator.recent_actions().await)
}
