use axum::{
    extract::{Path, State},
    Json,
};
use tracing::{info, instrument};

use super::models::PlayerProfile;
use crate::shared::{AppError, AppState};

/// HTTP handler for a player's cross-session profile
///
/// GET /api/player/:player_id/stats
#[instrument(name = "get_player_stats", skip(state))]
pub async fn get_player_stats(
    State(state): State<AppState>,
    Path(player_id): Path<String>,
) -> Result<Json<PlayerProfile>, AppError> {
    let profile = state
        .profile_repository
        .get_profile(&player_id)
        .await?
        .ok_or_else(|| AppError::NotFound(format!("Player {} not found", player_id)))?;

    info!(total_sessions = profile.total_sessions, "Player stats retrieved");
    Ok(Json(profile))
}
