use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tracing::{debug, info, instrument, warn};

use super::{
    classifier::HeuristicClassifier,
    client::TextGenerator,
    errors::AnalysisError,
    models::{AnalysisOutcome, AnalysisResult, Confidence, Degradation},
    probe::{ConnectivityProbe, ProbeState},
    prompt::build_prompt,
    queue::{DiagnosticQueue, QueuedAction},
};
use crate::metrics::SessionStatistics;
use crate::session::models::{Action, MISSILE_SHOT};

/// Current state of the analysis pipeline, for health reporting
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalyzerStatus {
    pub state: ProbeState,
    pub model: String,
    pub url: String,
    pub queue_length: usize,
}

/// Runs the heuristic classifier and, when the text-generation service is up,
/// augments its result with generated insights.
///
/// Augmentation never fails the analysis: any error falls back to the
/// heuristic result.
pub struct AnalysisOrchestrator {
    classifier: HeuristicClassifier,
    generator: Arc<dyn TextGenerator>,
    probe: Arc<ConnectivityProbe>,
    generation_timeout: Duration,
    queue: DiagnosticQueue,
}

impl AnalysisOrchestrator {
    pub fn new(
        generator: Arc<dyn TextGenerator>,
        probe: Arc<ConnectivityProbe>,
        generation_timeout: Duration,
    ) -> Self {
        Self {
            classifier: HeuristicClassifier::new(),
            generator,
            probe,
            generation_timeout,
            queue: DiagnosticQueue::default(),
        }
    }

    /// Keeps a copy of a tracked action in the diagnostic queue
    pub async fn record_action(&self, session_id: &str, action: &Action) {
        if action.is_type(MISSILE_SHOT) {
            self.queue.push(session_id, action).await;
        }
    }

    pub async fn recent_actions(&self) -> Vec<QueuedAction> {
        self.queue.snapshot().await
    }

    #[instrument(skip(self, stats), fields(shots = stats.shot_count))]
    pub async fn analyze(&self, stats: &SessionStatistics, duration_ms: i64) -> AnalysisOutcome {
        let mut heuristic = self.classifier.classify(stats);

        if stats.is_empty() {
            debug!("No tracked shots, skipping augmentation");
            heuristic.confidence = Confidence::Low;
            return AnalysisOutcome::degraded(heuristic, Degradation::NoShots);
        }

        if !self.probe.is_available().await {
            info!("Using heuristic analysis, text generation service not available");
            return AnalysisOutcome::degraded(heuristic, Degradation::ServiceUnavailable);
        }

        let prompt = build_prompt(stats, duration_ms);
        let augmentation = self.augment(&prompt).await;
        Self::merge(heuristic, augmentation)
    }

    /// Combines the heuristic result with the outcome of the augmented call
    pub fn merge(
        mut heuristic: AnalysisResult,
        augmentation: Result<String, AnalysisError>,
    ) -> AnalysisOutcome {
        match augmentation {
            Ok(insights) => {
                heuristic.ai_insights = Some(insights);
                heuristic.confidence = Confidence::High;
                AnalysisOutcome::augmented(heuristic)
            }
            Err(error) => {
                if error.is_unavailable() {
                    warn!(%error, "Text generation service unreachable, using heuristic analysis");
                } else {
                    warn!(%error, "AI analysis failed, using heuristic analysis");
                }
                heuristic.ai_insights = None;
                heuristic.confidence = Confidence::Medium;
                AnalysisOutcome::degraded(heuristic, Degradation::AugmentationFailed(error))
            }
        }
    }

    async fn augment(&self, prompt: &str) -> Result<String, AnalysisError> {
        let text = tokio::time::timeout(self.generation_timeout, self.generator.generate(prompt))
            .await
            .map_err(|_| AnalysisError::Timeout(self.generation_timeout))??;

        let text = text.trim();
        if text.is_empty() {
            return Err(AnalysisError::Malformed("empty response".to_string()));
        }
        Ok(text.to_string())
    }

    pub async fn status(&self) -> AnalyzerStatus {
        AnalyzerStatus {
            state: self.probe.state().await,
            model: self.generator.model().to_string(),
            url: self.generator.base_url().to_string(),
            queue_length: self.queue.len().await,
        }
    }
}
