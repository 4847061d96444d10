use chrono::Utc;
use std::sync::Arc;
use tracing::{info, instrument, warn};

use super::{
    models::{Action, SessionModel},
    repository::SessionRepository,
    types::{EndSessionResponse, IngestResponse, StartSessionResponse},
};
use crate::{
    analysis::AnalysisOrchestrator,
    metrics,
    player::ProfileRepository,
    shared::{AppError, AppState},
};

/// Service for the session lifecycle: start, ingest, end
pub struct SessionService {
    repository: Arc<dyn SessionRepository + Send + Sync>,
    profiles: Arc<dyn ProfileRepository>,
    orchestrator: Arc<AnalysisOrchestrator>,
}

impl SessionService {
    pub fn new(
        repository: Arc<dyn SessionRepository + Send + Sync>,
        profiles: Arc<dyn ProfileRepository>,
        orchestrator: Arc<AnalysisOrchestrator>,
    ) -> Self {
        Self {
            repository,
            profiles,
            orchestrator,
        }
    }

    pub fn from_state(state: &AppState) -> Self {
        Self::new(
            Arc::clone(&state.session_repository),
            Arc::clone(&state.profile_repository),
            Arc::clone(&state.orchestrator),
        )
    }

    #[instrument(skip(self))]
    pub async fn start_session(&self, player_id: &str) -> Result<StartSessionResponse, AppError> {
        let player_id = player_id.trim();
        if player_id.is_empty() {
            return Err(AppError::BadRequest("playerId must not be empty".to_string()));
        }

        let session = SessionModel::new(player_id.to_string());
        let response = StartSessionResponse {
            session_id: session.id.clone(),
            player_id: session.player_id.clone(),
            start_time: session.start_time,
        };
        self.repository.create_session(session).await?;

        info!(
            session_id = %response.session_id,
            player_id = %response.player_id,
            "Session started"
        );
        Ok(response)
    }

    /// Appends an action and returns the refreshed realtime view
    #[instrument(skip(self, action), fields(action_type = %action.action_type))]
    pub async fn ingest_action(
        &self,
        session_id: &str,
        action: Action,
    ) -> Result<IngestResponse, AppError> {
        let handle = self
            .repository
            .get_session(session_id)
            .await?
            .ok_or_else(|| AppError::session_not_found(session_id))?;

        let response = {
            let mut session = handle.lock().await;
            // Lost the race against end_session
            if session.is_finalized() {
                warn!(session_id = %session_id, "Action received for ended session");
                return Err(AppError::session_not_found(session_id));
            }

            let realtime_snapshot = session.append(action.clone());
            IngestResponse {
                realtime_snapshot,
                session_metrics: session.metrics.clone(),
            }
        };

        self.orchestrator.record_action(session_id, &action).await;

        tracing::debug!(
            session_id = %session_id,
            total_actions = response.session_metrics.total_actions,
            hit_rate = response.session_metrics.hit_rate,
            "Action ingested"
        );
        Ok(response)
    }

    /// Finalizes and evicts the session, then analyses its shots.
    ///
    /// A second call for the same session is `NotFound`.
    #[instrument(skip(self))]
    pub async fn end_session(&self, session_id: &str) -> Result<EndSessionResponse, AppError> {
        let handle = self
            .repository
            .remove_session(session_id)
            .await?
            .ok_or_else(|| AppError::session_not_found(session_id))?;

        let (player_id, shots, duration) = {
            let mut session = handle.lock().await;
            if session.is_finalized() {
                return Err(AppError::session_not_found(session_id));
            }
            session.finalize(Utc::now());
            (session.player_id.clone(), session.shots(), session.duration_ms())
        };

        let stats = metrics::session_statistics(&shots);
        let outcome = self.orchestrator.analyze(&stats, duration).await;

        let player_profile = match self
            .profiles
            .record_session(&player_id, &outcome.result)
            .await
        {
            Ok(profile) => profile,
            Err(e) => {
                tracing::error!(
                    session_id = %session_id,
                    player_id = %player_id,
                    error = %e,
                    "Failed to update player profile"
                );
                return Err(AppError::AnalysisFailed {
                    message: e.to_string(),
                    fallback: Box::new(outcome.result),
                });
            }
        };

        info!(
            session_id = %session_id,
            player_id = %player_id,
            skill_level = %outcome.result.skill_level,
            confidence = %outcome.result.confidence,
            degraded = outcome.is_degraded(),
            "Session ended"
        );

        Ok(EndSessionResponse {
            session_id: session_id.to_string(),
            degraded: outcome.is_degraded(),
            analysis: outcome.result,
            player_profile,
            duration,
        })
    }
}
