use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use serde_json::Value;
use std::sync::Arc;
use std::time::Duration;
use tower::ServiceExt; // for `oneshot`

use gameplay_analyzer::{
    api_router, AnalysisOrchestrator, AppState, ConnectivityProbe, InMemoryProfileRepository,
    InMemorySessionRepository,
};

use super::mocks::{MockGenerator, MockReply};

// ============================================================================
// Test Setup Infrastructure
// ============================================================================

pub struct TestSetup {
    pub app: Router,
    pub generator: Arc<MockGenerator>,
}

pub struct TestSetupBuilder {
    generator: MockGenerator,
    generation_timeout: Duration,
}

impl TestSetupBuilder {
    pub fn new() -> Self {
        Self {
            generator: MockGenerator::offline(),
            generation_timeout: Duration::from_millis(200),
        }
    }

    pub fn with_ai_reply(mut self, text: &str) -> Self {
        self.generator = MockGenerator::online(MockReply::Text(text.to_string()));
        self
    }

    pub fn with_failing_ai(mut self) -> Self {
        self.generator = MockGenerator::online(MockReply::Error);
        self
    }

    pub fn with_hanging_ai(mut self) -> Self {
        self.generator = MockGenerator::online(MockReply::Hang);
        self
    }

    pub fn build(self) -> TestSetup {
        let generator = Arc::new(self.generator);
        let probe = Arc::new(ConnectivityProbe::new(
            generator.clone(),
            Duration::from_secs(60),
        ));
        let orchestrator = Arc::new(AnalysisOrchestrator::new(
            generator.clone(),
            probe,
            self.generation_timeout,
        ));
        let state = AppState::new(
            Arc::new(InMemorySessionRepository::new()),
            Arc::new(InMemoryProfileRepository::new()),
            orchestrator,
        );

        TestSetup {
            app: api_router(state),
            generator,
        }
    }
}

impl TestSetup {
    pub async fn send(&self, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = self
            .app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, json)
    }

    pub async fn start_session(&self, player_id: &str) -> String {
        let (status, json) = self
            .send(
                "POST",
                "/api/session/start",
                Some(serde_json::json!({ "playerId": player_id })),
            )
            .await;
        assert_eq!(status, StatusCode::OK, "start failed: {json}");
        json["sessionId"].as_str().unwrap().to_string()
    }

    pub async fn ingest(&self, session_id: &str, action: Value) -> (StatusCode, Value) {
        self.send(
            "POST",
            &format!("/api/session/{}/action", session_id),
            Some(action),
        )
        .await
    }

    pub async fn end(&self, session_id: &str) -> (StatusCode, Value) {
        self.send("POST", &format!("/api/session/{}/end", session_id), None)
            .await
    }
}
