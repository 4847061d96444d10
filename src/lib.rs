// Library crate for the gameplay analyzer service
// This file exposes the public API for integration tests

pub mod analysis;
pub mod config;
pub mod health;
pub mod metrics;
pub mod player;
pub mod routes;
pub mod session;
pub mod shared;

// Re-export commonly used types for easier access in tests
pub use analysis::{AnalysisOrchestrator, ConnectivityProbe, OllamaClient, TextGenerator};
pub use config::AppConfig;
pub use player::InMemoryProfileRepository;
pub use routes::{api_router, app_router};
pub use session::repository::InMemorySessionRepository;
pub use shared::{AppError, AppState};
