use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use uuid::Uuid;

use crate::metrics::{self, RealtimeSnapshot, SessionMetrics};

/// Action tag the metrics pipeline analyses
pub const MISSILE_SHOT: &str = "missile_shot";

/// One gameplay event as sent by the client.
///
/// Every field is optional on the wire. Missing, `null` or mistyped values are
/// read as zero/false so the realtime path never rejects an action.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Action {
    #[serde(rename = "type", deserialize_with = "lenient_string")]
    pub action_type: String,
    #[serde(deserialize_with = "lenient_bool")]
    pub success: bool,
    /// Milliseconds, as recorded by the client
    #[serde(deserialize_with = "lenient_f64")]
    pub timestamp: f64,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_f64"
    )]
    pub target_distance: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        deserialize_with = "lenient_optional_f64"
    )]
    pub missile_speed: Option<f64>,
}

impl Action {
    pub fn new(action_type: impl Into<String>, success: bool, timestamp: f64) -> Self {
        Self {
            action_type: action_type.into(),
            success,
            timestamp,
            ..Self::default()
        }
    }

    pub fn with_target_distance(mut self, distance: f64) -> Self {
        self.target_distance = Some(distance);
        self
    }

    pub fn with_missile_speed(mut self, speed: f64) -> Self {
        self.missile_speed = Some(speed);
        self
    }

    pub fn is_type(&self, action_type: &str) -> bool {
        self.action_type == action_type
    }

    pub fn target_distance(&self) -> f64 {
        non_negative(self.target_distance)
    }

    pub fn missile_speed(&self) -> f64 {
        non_negative(self.missile_speed)
    }

    pub fn timestamp(&self) -> f64 {
        if self.timestamp.is_finite() {
            self.timestamp
        } else {
            0.0
        }
    }
}

fn non_negative(value: Option<f64>) -> f64 {
    match value {
        Some(v) if v.is_finite() && v > 0.0 => v,
        _ => 0.0,
    }
}

fn number_from(value: Value) -> Option<f64> {
    match value {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_f64<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from(Value::deserialize(deserializer)?).unwrap_or(0.0))
}

fn lenient_optional_f64<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(number_from(Value::deserialize(deserializer)?))
}

fn lenient_bool<'de, D>(deserializer: D) -> Result<bool, D::Error>
where
    D: Deserializer<'de>,
{
    let flag = match Value::deserialize(deserializer)? {
        Value::Bool(b) => b,
        Value::Number(n) => n.as_f64().is_some_and(|v| v != 0.0),
        Value::String(s) => s.eq_ignore_ascii_case("true"),
        _ => false,
    };
    Ok(flag)
}

fn lenient_string<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    let text = match Value::deserialize(deserializer)? {
        Value::String(s) => s,
        Value::Null => String::new(),
        other => other.to_string(),
    };
    Ok(text)
}

/// An action once it has been appended to a session log
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ActionRecord {
    /// 1-based position in the session, equal to arrival order
    pub sequence: u64,
    #[serde(flatten)]
    pub action: Action,
}

/// In-memory state of one gameplay session
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionModel {
    pub id: String,
    pub player_id: String,
    pub start_time: DateTime<Utc>,
    pub end_time: Option<DateTime<Utc>>,
    pub actions: Vec<ActionRecord>,
    pub metrics: SessionMetrics,
}

impl SessionModel {
    /// Creates a new session with a generated opaque ID
    pub fn new(player_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            player_id,
            start_time: Utc::now(),
            end_time: None,
            actions: Vec::new(),
            metrics: SessionMetrics::default(),
        }
    }

    pub fn is_finalized(&self) -> bool {
        self.end_time.is_some()
    }

    /// Appends an action, refreshes the running metrics and returns the
    /// realtime snapshot when the action is a tracked shot
    pub fn append(&mut self, action: Action) -> Option<RealtimeSnapshot> {
        let record = ActionRecord {
            sequence: self.actions.len() as u64 + 1,
            action,
        };
        let tracked = record.action.is_type(MISSILE_SHOT);
        self.actions.push(record);
        self.metrics.total_actions = self.actions.len();

        if !tracked {
            return None;
        }

        let shots = self.shots();
        let latest = shots.last()?;
        let snapshot = metrics::realtime_snapshot(latest, &shots);
        self.metrics.record_shot(&shots, snapshot.clone());
        Some(snapshot)
    }

    /// The tracked shot actions, in arrival order
    pub fn shots(&self) -> Vec<ActionRecord> {
        metrics::filter_by_type(&self.actions, MISSILE_SHOT)
    }

    /// Marks the session as ended. Only the first call has any effect.
    pub fn finalize(&mut self, at: DateTime<Utc>) -> DateTime<Utc> {
        *self.end_time.get_or_insert(at)
    }

    /// Milliseconds between start and end, or until now for an open session
    pub fn duration_ms(&self) -> i64 {
        let end = self.end_time.unwrap_or_else(Utc::now);
        (end - self.start_time).num_milliseconds().max(0)
    }
}
