// Public API
pub use classifier::HeuristicClassifier;
pub use client::{OllamaClient, TextGenerator};
pub use errors::AnalysisError;
pub use models::{
    AnalysisOutcome, AnalysisResult, Confidence, Degradation, ShootingStyle, SkillLevel,
};
pub use orchestrator::{AnalysisOrchestrator, AnalyzerStatus};
pub use probe::{ConnectivityProbe, ProbeState};
pub use queue::{DiagnosticQueue, QueuedAction};

// Internal modules
pub mod classifier;
mod client;
mod errors;
pub mod models;
mod orchestrator;
mod probe;
pub mod prompt;
mod queue;
