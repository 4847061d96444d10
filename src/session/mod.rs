// Public API - what other modules can use
pub use handlers::{end_session, ingest_action, start_session};
pub use service::SessionService;
pub use types::{EndSessionResponse, IngestResponse, StartSessionRequest, StartSessionResponse};

// Internal modules
mod handlers;
pub mod models;
pub mod repository;
pub mod service;
mod types;
