use serde::{Deserialize, Serialize};

use crate::session::models::ActionRecord;

/// Per-shot view returned after every tracked ingest
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RealtimeSnapshot {
    /// 1 if the latest shot hit, 0 otherwise
    pub accuracy: u8,
    /// Distance of the latest shot
    pub target_distance: f64,
    /// Speed of the latest shot
    pub missile_speed: f64,
    /// Percentage over all shots so far
    pub hit_rate: f64,
    /// Mean milliseconds between consecutive shots so far
    pub average_response_time: f64,
}

/// Aggregate statistics over a session's tracked shots
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionStatistics {
    pub shot_count: usize,
    pub hit_count: usize,
    /// Percentage, 0 when there are no shots
    pub hit_rate: f64,
    pub average_response_time: f64,
    pub average_target_distance: f64,
}

impl SessionStatistics {
    /// Hit rate as a fraction in `[0, 1]`
    pub fn hit_fraction(&self) -> f64 {
        self.hit_rate / 100.0
    }

    pub fn is_empty(&self) -> bool {
        self.shot_count == 0
    }
}

/// Running metrics kept on the session and refreshed after every append
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionMetrics {
    pub total_actions: usize,
    pub shots_fired: usize,
    pub hits: usize,
    pub hit_rate: f64,
    pub average_response_time: f64,
    pub latest: Option<RealtimeSnapshot>,
}

impl SessionMetrics {
    pub(crate) fn record_shot(&mut self, shots: &[ActionRecord], snapshot: RealtimeSnapshot) {
        self.shots_fired = shots.len();
        self.hits = shots.iter().filter(|s| s.action.success).count();
        self.hit_rate = snapshot.hit_rate;
        self.average_response_time = snapshot.average_response_time;
        self.latest = Some(snapshot);
    }
}
