use async_trait::async_trait;
use chrono::Utc;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::{debug, instrument};

use super::models::PlayerProfile;
use crate::analysis::AnalysisResult;
use crate::shared::AppError;

#[async_trait]
pub trait ProfileRepository: Send + Sync {
    /// Folds a completed session into the player's profile, creating it on
    /// first use, and returns the updated profile
    async fn record_session(
        &self,
        player_id: &str,
        result: &AnalysisResult,
    ) -> Result<PlayerProfile, AppError>;
    async fn get_profile(&self, player_id: &str) -> Result<Option<PlayerProfile>, AppError>;
    async fn player_count(&self) -> Result<usize, AppError>;
}

/// Profiles live for the lifetime of the process and are never deleted
#[derive(Debug, Default)]
pub struct InMemoryProfileRepository {
    profiles: Arc<RwLock<HashMap<String, PlayerProfile>>>,
}

impl InMemoryProfileRepository {
    pub fn new() -> Self {
        Self {
            profiles: Arc::new(RwLock::new(HashMap::new())),
        }
    }
}

#[async_trait]
impl ProfileRepository for InMemoryProfileRepository {
    #[instrument(skip(self, result))]
    async fn record_session(
        &self,
        player_id: &str,
        result: &AnalysisResult,
    ) -> Result<PlayerProfile, AppError> {
        let mut profiles = self.profiles.write().await;
        let now = Utc::now();
        let profile = profiles
            .entry(player_id.to_string())
            .or_insert_with(|| PlayerProfile {
                player_id: player_id.to_string(),
                total_sessions: 0,
                skill_progression: Vec::new(),
                play_style: result.shooting_style,
                best_score: result.score,
                last_session_at: now,
            });

        profile.total_sessions += 1;
        profile.skill_progression.push(result.skill_level);
        profile.play_style = result.shooting_style;
        profile.best_score = profile.best_score.max(result.score);
        profile.last_session_at = now;

        debug!(
            player_id = %player_id,
            total_sessions = profile.total_sessions,
            "Player profile updated"
        );
        Ok(profile.clone())
    }

    async fn get_profile(&self, player_id: &str) -> Result<Option<PlayerProfile>, AppError> {
        let profiles = self.profiles.read().await;
        Ok(profiles.get(player_id).cloned())
    }

    async fn player_count(&self) -> Result<usize, AppError> {
        Ok(self.profiles.read().await.len())
    }
}
