use std::time::Duration;

use thiserror::Error;

/// Failures of the optional augmentation step. None of these reach the caller;
/// the orchestrator turns every one into a heuristic fallback.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum AnalysisError {
    #[error("Text generation service unavailable: {0}")]
    Unavailable(String),

    #[error("Text generation timed out after {0:?}")]
    Timeout(Duration),

    #[error("Text generation request failed: {0}")]
    Failed(String),

    #[error("Malformed text generation response: {0}")]
    Malformed(String),
}

impl AnalysisError {
    /// True when the service could not be reached at all, as opposed to
    /// answering with something unusable
    pub fn is_unavailable(&self) -> bool {
        matches!(self, Self::Unavailable(_) | Self::Timeout(_))
    }
}

impl From<reqwest::Error> for AnalysisError {
    fn from(error: reqwest::Error) -> Self {
        if error.is_connect() || error.is_timeout() {
            Self::Unavailable(error.to_string())
        } else if error.is_decode() {
            Self::Malformed(error.to_string())
        } else {
            Self::Failed(error.to_string())
        }
    }
}
