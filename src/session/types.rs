use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::AnalysisResult;
use crate::metrics::{RealtimeSnapshot, SessionMetrics};
use crate::player::PlayerProfile;

/// Request payload for starting a session
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionRequest {
    pub player_id: String,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct StartSessionResponse {
    pub session_id: String,
    pub player_id: String,
    pub start_time: DateTime<Utc>,
}

/// Response for every ingested action. `realtime_snapshot` is null for
/// actions the metrics pipeline does not track.
#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct IngestResponse {
    pub realtime_snapshot: Option<RealtimeSnapshot>,
    pub session_metrics: SessionMetrics,
}

#[derive(Debug, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct EndSessionResponse {
    pub session_id: String,
    pub analysis: AnalysisResult,
    pub player_profile: PlayerProfile,
    /// Milliseconds between start and end
    pub duration: i64,
    /// True when the analysis fell back to heuristics only
    pub degraded: bool,
}
