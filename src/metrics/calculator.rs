//! Pure statistics over an ordered, single-type action sequence.
//!
//! Every rate or mean is defined as 0 for an empty input, so callers never
//! need their own zero guards.

use super::models::{RealtimeSnapshot, SessionStatistics};
use crate::session::models::ActionRecord;

/// Keeps the actions of one type, preserving arrival order
pub fn filter_by_type(actions: &[ActionRecord], action_type: &str) -> Vec<ActionRecord> {
    actions
        .iter()
        .filter(|record| record.action.is_type(action_type))
        .cloned()
        .collect()
}

/// Successful actions as a percentage of all actions
pub fn hit_rate(actions: &[ActionRecord]) -> f64 {
    if actions.is_empty() {
        return 0.0;
    }
    let hits = actions.iter().filter(|a| a.action.success).count();
    hits as f64 / actions.len() as f64 * 100.0
}

/// Mean delta between consecutive recorded timestamps, in milliseconds
pub fn average_inter_arrival_time(actions: &[ActionRecord]) -> f64 {
    if actions.len() < 2 {
        return 0.0;
    }
    let total: f64 = actions
        .windows(2)
        .map(|pair| pair[1].action.timestamp() - pair[0].action.timestamp())
        .sum();
    total / (actions.len() - 1) as f64
}

/// Mean target distance, counting missing distances as 0
pub fn average_target_distance(actions: &[ActionRecord]) -> f64 {
    if actions.is_empty() {
        return 0.0;
    }
    let total: f64 = actions.iter().map(|a| a.action.target_distance()).sum();
    total / actions.len() as f64
}

/// Snapshot for the latest action against its full same-type history.
///
/// `history` must include `latest`.
pub fn realtime_snapshot(latest: &ActionRecord, history: &[ActionRecord]) -> RealtimeSnapshot {
    RealtimeSnapshot {
        accuracy: u8::from(latest.action.success),
        target_distance: latest.action.target_distance(),
        missile_speed: latest.action.missile_speed(),
        hit_rate: hit_rate(history),
        average_response_time: average_inter_arrival_time(history),
    }
}

/// Aggregate view used by the end-of-session analysis
pub fn session_statistics(actions: &[ActionRecord]) -> SessionStatistics {
    SessionStatistics {
        shot_count: actions.len(),
        hit_count: actions.iter().filter(|a| a.action.success).count(),
        hit_rate: hit_rate(actions),
        average_response_time: average_inter_arrival_time(actions),
        average_target_distance: average_target_distance(actions),
    }
}
