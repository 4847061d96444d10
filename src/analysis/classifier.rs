use super::models::{AnalysisResult, Confidence, ShootingStyle, SkillLevel};
use crate::metrics::SessionStatistics;

pub const HIGH_ACCURACY: &str = "high accuracy";
pub const QUICK_ACQUISITION: &str = "quick target acquisition";
pub const LONG_RANGE_ACCURACY: &str = "long-range accuracy";
pub const NO_STRENGTH_YET: &str = "room for improvement";

pub const FAVOR_ACCURACY: &str = "favor accuracy over speed";
pub const FASTER_ACQUISITION: &str = "faster target acquisition";
pub const PRACTICE_LONG_RANGE: &str = "practice long-range shots";
pub const KEEP_PRACTICING: &str = "keep practicing";

/// Accuracy is weighted far above distance: a perfect hit rate is worth
/// 1000 points, each unit of average distance 10.
const HIT_FRACTION_WEIGHT: f64 = 1000.0;
const DISTANCE_WEIGHT: f64 = 10.0;

/// Deterministic rules mapping aggregate shot statistics to an assessment.
///
/// Results carry `Confidence::Medium`; the orchestrator raises or lowers it.
#[derive(Debug, Clone, Copy, Default)]
pub struct HeuristicClassifier;

impl HeuristicClassifier {
    pub fn new() -> Self {
        Self
    }

    pub fn classify(&self, stats: &SessionStatistics) -> AnalysisResult {
        if stats.is_empty() {
            return AnalysisResult {
                skill_level: SkillLevel::Beginner,
                shooting_style: ShootingStyle::Balanced,
                strengths: vec![NO_STRENGTH_YET.to_string()],
                improvements: vec![KEEP_PRACTICING.to_string()],
                score: 0,
                confidence: Confidence::Medium,
                ai_insights: None,
            };
        }

        AnalysisResult {
            skill_level: self.skill_level(stats.hit_fraction(), stats.average_response_time),
            shooting_style: self.shooting_style(stats.average_response_time),
            strengths: self.strengths(stats),
            improvements: self.improvements(stats),
            score: self.score(stats),
            confidence: Confidence::Medium,
            ai_insights: None,
        }
    }

    /// First match wins, advanced checked before intermediate
    pub fn skill_level(&self, hit_fraction: f64, avg_response_time: f64) -> SkillLevel {
        if hit_fraction > 0.8 && avg_response_time < 300.0 {
            SkillLevel::Advanced
        } else if hit_fraction > 0.6 && avg_response_time < 500.0 {
            SkillLevel::Intermediate
        } else {
            SkillLevel::Beginner
        }
    }

    /// Classifies the mean pause between shots; both bounds are strict
    pub fn shooting_style(&self, avg_pause: f64) -> ShootingStyle {
        if avg_pause < 200.0 {
            ShootingStyle::Rapid
        } else if avg_pause > 800.0 {
            ShootingStyle::Precise
        } else {
            ShootingStyle::Balanced
        }
    }

    pub fn strengths(&self, stats: &SessionStatistics) -> Vec<String> {
        let mut strengths = Vec::new();
        if stats.hit_fraction() > 0.8 {
            strengths.push(HIGH_ACCURACY.to_string());
        }
        if stats.average_response_time < 250.0 {
            strengths.push(QUICK_ACQUISITION.to_string());
        }
        if stats.average_target_distance > 500.0 {
            strengths.push(LONG_RANGE_ACCURACY.to_string());
        }

        if strengths.is_empty() {
            strengths.push(NO_STRENGTH_YET.to_string());
        }
        strengths
    }

    pub fn improvements(&self, stats: &SessionStatistics) -> Vec<String> {
        let mut improvements = Vec::new();
        if stats.hit_fraction() < 0.5 {
            improvements.push(FAVOR_ACCURACY.to_string());
        }
        if stats.average_response_time > 600.0 {
            improvements.push(FASTER_ACQUISITION.to_string());
        }
        if stats.average_target_distance < 300.0 {
            improvements.push(PRACTICE_LONG_RANGE.to_string());
        }

        if improvements.is_empty() {
            improvements.push(KEEP_PRACTICING.to_string());
        }
        improvements
    }

    pub fn score(&self, stats: &SessionStatistics) -> i64 {
        (stats.hit_fraction() * HIT_FRACTION_WEIGHT
            + stats.average_target_distance * DISTANCE_WEIGHT)
            .round() as i64
    }
}
