use axum::{
    routing::{get, post},
    Router,
};
use std::path::Path;
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::TraceLayer,
};

use crate::{health, player, session, shared::AppState};

/// API routes without any middleware
pub fn api_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health))
        .route("/api/session/start", post(session::start_session))
        .route("/api/session/:session_id/action", post(session::ingest_action))
        .route("/api/session/:session_id/end", post(session::end_session))
        .route("/api/player/:player_id/stats", get(player::get_player_stats))
        .route("/api/diagnostics/actions", get(health::recent_actions))
        .with_state(state)
}

/// Full application router: API, optional static client, tracing and CORS.
///
/// The client's `index.html` answers both `/` and `/game`.
pub fn app_router(state: AppState, static_dir: Option<&Path>) -> Router {
    let router = api_router(state);
    let router = match static_dir {
        Some(dir) => router
            .route_service("/game", ServeFile::new(dir.join("index.html")))
            .fallback_service(ServeDir::new(dir)),
        None => router,
    };

    router
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
}
