use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::analysis::{ShootingStyle, SkillLevel};

/// Cross-session aggregate for one player
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerProfile {
    pub player_id: String,
    pub total_sessions: u32,
    /// One entry per completed session, oldest first
    pub skill_progression: Vec<SkillLevel>,
    /// Style from the most recent session
    pub play_style: ShootingStyle,
    pub best_score: i64,
    pub last_session_at: DateTime<Utc>,
}
