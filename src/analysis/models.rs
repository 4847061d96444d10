use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use super::errors::AnalysisError;

#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    PartialOrd,
    Ord,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum SkillLevel {
    Beginner,
    Intermediate,
    Advanced,
}

#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ShootingStyle {
    Rapid,
    Precise,
    Balanced,
}

/// How much of the analysis pipeline contributed to a result
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString, AsRefStr,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Confidence {
    /// Nothing to analyse
    Low,
    /// Heuristic rules only
    Medium,
    /// Heuristic rules plus generated insights
    High,
}

/// End-of-session skill assessment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnalysisResult {
    pub skill_level: SkillLevel,
    pub shooting_style: ShootingStyle,
    pub strengths: Vec<String>,
    pub improvements: Vec<String>,
    pub score: i64,
    pub confidence: Confidence,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub ai_insights: Option<String>,
}

/// Why a result fell back to the heuristic rules
#[derive(Debug, Clone, PartialEq)]
pub enum Degradation {
    /// The session had no tracked shots
    NoShots,
    /// The probe reported the text-generation service unreachable
    ServiceUnavailable,
    /// The augmented call was attempted and failed
    AugmentationFailed(AnalysisError),
}

/// Result of the orchestrator, with the fallback decision made explicit
#[derive(Debug, Clone, PartialEq)]
pub struct AnalysisOutcome {
    pub result: AnalysisResult,
    pub degradation: Option<Degradation>,
}

impl AnalysisOutcome {
    pub fn augmented(result: AnalysisResult) -> Self {
        Self {
            result,
            degradation: None,
        }
    }

    pub fn degraded(result: AnalysisResult, reason: Degradation) -> Self {
        Self {
            result,
            degradation: Some(reason),
        }
    }

    pub fn is_degraded(&self) -> bool {
        self.degradation.is_some()
    }
}
