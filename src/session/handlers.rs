use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Json,
};
use tracing::{info, instrument};

use super::{
    models::Action,
    service::SessionService,
    types::{EndSessionResponse, IngestResponse, StartSessionRequest, StartSessionResponse},
};
use crate::shared::{AppError, AppState};

/// HTTP handler for starting a gameplay session
///
/// POST /api/session/start
#[instrument(name = "start_session", skip(state, payload))]
pub async fn start_session(
    State(state): State<AppState>,
    payload: Result<Json<StartSessionRequest>, JsonRejection>,
) -> Result<Json<StartSessionResponse>, AppError> {
    let Json(request) = payload?;
    info!(player_id = %request.player_id, "Starting session");

    let service = SessionService::from_state(&state);
    let session = service.start_session(&request.player_id).await?;

    Ok(Json(session))
}

/// HTTP handler for ingesting one gameplay action
///
/// POST /api/session/:session_id/action
#[instrument(name = "ingest_action", skip(state, payload))]
pub async fn ingest_action(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
    payload: Result<Json<Action>, JsonRejection>,
) -> Result<Json<IngestResponse>, AppError> {
    let Json(action) = payload?;
    let service = SessionService::from_state(&state);
    let response = service.ingest_action(&session_id, action).await?;

    Ok(Json(response))
}

/// HTTP handler for ending a session and producing its analysis
///
/// POST /api/session/:session_id/end
#[instrument(name = "end_session", skip(state))]
pub async fn end_session(
    State(state): State<AppState>,
    Path(session_id): Path<String>,
) -> Result<Json<EndSessionResponse>, AppError> {
    info!("Ending session");

    let service = SessionService::from_state(&state);
    let response = service.end_session(&session_id).await?;

    Ok(Json(response))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::shared::test_utils::AppStateBuilder;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
        routing::post,
        Router,
    };
    use tower::ServiceExt; // for `oneshot`

    fn app(state: AppState) -> Router {
        Router::new()
            .route("/api/session/start", post(start_session))
            .route("/api/session/:session_id/action", post(ingest_action))
            .route("/api/session/:session_id/end", post(end_session))
            .with_state(state)
    }

    fn post_json(uri: &str, body: &str) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn test_start_session_handler() {
        let app = app(AppStateBuilder::new().build());

        let response = app
            .oneshot(post_json("/api/session/start", r#"{"playerId": "pilot"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let json = body_json(response).await;
        assert!(!json["sessionId"].as_str().unwrap().is_empty());
        assert_eq!(json["playerId"], "pilot");
    }

    #[tokio::test]
    async fn test_start_session_handler_missing_player() {
        let app = app(AppStateBuilder::new().build());

        let response = app
            .oneshot(post_json("/api/session/start", r#"{"name": "pilot"}"#))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert!(body_json(response).await["error"].is_string());
    }

    async fn started_session(app: &Router) -> String {
        let response = app
            .clone()
            .oneshot(post_json("/api/session/start", r#"{"playerId": "pilot"}"#))
            .await
            .unwrap();
        body_json(response).await["sessionId"]
            .as_str()
            .unwrap()
            .to_string()
    }

    #[tokio::test]
    async fn test_ingest_null_fields_are_accepted() {
        let app = app(AppStateBuilder::new().build());
        let session_id = started_session(&app).await;

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/session/{}/action", session_id),
                r#"{"type": "missile_shot", "success": true, "timestamp": null, "targetDistance": 100}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["realtimeSnapshot"]["accuracy"], 1);
        assert_eq!(json["realtimeSnapshot"]["targetDistance"], 100.0);

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/session/{}/action", session_id),
                r#"{"type": "missile_shot", "success": null, "timestamp": "12"}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["realtimeSnapshot"]["accuracy"], 0);
        assert_eq!(json["realtimeSnapshot"]["hitRate"], 50.0);
        assert_eq!(json["realtimeSnapshot"]["averageResponseTime"], 12.0);
    }

    #[tokio::test]
    async fn test_unparseable_body_is_json_error() {
        let app = app(AppStateBuilder::new().build());
        let session_id = started_session(&app).await;

        let response = app
            .oneshot(post_json(
                &format!("/api/session/{}/action", session_id),
                "not json",
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let json = body_json(response).await;
        assert!(json["error"].is_string());
    }

    #[tokio::test]
    async fn test_ingest_unknown_session_is_404() {
        let app = app(AppStateBuilder::new().build());

        let response = app
            .oneshot(post_json(
                "/api/session/does-not-exist/action",
                r#"{"type": "missile_shot", "success": true, "timestamp": 0}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let json = body_json(response).await;
        assert!(json["error"].as_str().unwrap().contains("does-not-exist"));
    }

    #[tokio::test]
    async fn test_session_round_trip_over_http() {
        let app = app(AppStateBuilder::new().build());

        let response = app
            .clone()
            .oneshot(post_json("/api/session/start", r#"{"playerId": "pilot"}"#))
            .await
            .unwrap();
        let session_id = body_json(response).await["sessionId"]
            .as_str()
            .unwrap()
            .to_string();

        let response = app
            .clone()
            .oneshot(post_json(
                &format!("/api/session/{}/action", session_id),
                r#"{"type": "missile_shot", "success": true, "timestamp": 0, "targetDistance": 250}"#,
            ))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["realtimeSnapshot"]["accuracy"], 1);
        assert_eq!(json["sessionMetrics"]["shotsFired"], 1);

        let response = app
            .clone()
            .oneshot(post_json(&format!("/api/session/{}/end", session_id), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let json = body_json(response).await;
        assert_eq!(json["analysis"]["confidence"], "medium");
        assert!(json["analysis"].get("aiInsights").is_none());
        assert_eq!(json["playerProfile"]["totalSessions"], 1);

        let response = app
            .oneshot(post_json(&format!("/api/session/{}/end", session_id), ""))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }
}
