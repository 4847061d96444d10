use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use std::sync::Arc;
use thiserror::Error;

use crate::analysis::{AnalysisOrchestrator, AnalysisResult};
use crate::player::ProfileRepository;
use crate::session::repository::SessionRepository;

/// Shared application state containing all dependencies
#[derive(Clone)]
pub struct AppState {
    pub session_repository: Arc<dyn SessionRepository + Send + Sync>,
    pub profile_repository: Arc<dyn ProfileRepository>,
    pub orchestrator: Arc<AnalysisOrchestrator>,
}

impl AppState {
    pub fn new(
        session_repository: Arc<dyn SessionRepository + Send + Sync>,
        profile_repository: Arc<dyn ProfileRepository>,
        orchestrator: Arc<AnalysisOrchestrator>,
    ) -> Self {
        Self {
            session_repository,
            profile_repository,
            orchestrator,
        }
    }
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Not found: {0}")]
    NotFound(String),

    /// The session was consumed but its report could not be completed; the
    /// heuristic analysis is still returned to the caller
    #[error("Analysis failed: {message}")]
    AnalysisFailed {
        message: String,
        fallback: Box<AnalysisResult>,
    },

    #[error("Internal server error")]
    Internal,
}

impl AppError {
    pub fn session_not_found(session_id: &str) -> Self {
        AppError::NotFound(format!("Session {} not found", session_id))
    }
}

impl From<JsonRejection> for AppError {
    fn from(rejection: JsonRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, body) = match self {
            AppError::BadRequest(msg) => (StatusCode::BAD_REQUEST, json!({ "error": msg })),
            AppError::NotFound(msg) => (StatusCode::NOT_FOUND, json!({ "error": msg })),
            AppError::AnalysisFailed { message, fallback } => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({
                    "error": format!("Analysis failed: {}", message),
                    "fallbackAnalysis": fallback,
                }),
            ),
            AppError::Internal => (
                StatusCode::INTERNAL_SERVER_ERROR,
                json!({ "error": "Internal server error" }),
            ),
        };

        (status, Json(body)).into_response()
    }
}
