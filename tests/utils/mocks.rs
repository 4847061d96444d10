use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use gameplay_analyzer::analysis::AnalysisError;
use gameplay_analyzer::TextGenerator;

/// How the mock text-generation service answers generate calls
#[derive(Debug, Clone)]
pub enum MockReply {
    Text(String),
    Error,
    /// Sleeps long enough to trip any test timeout
    Hang,
}

/// In-process stand-in for the external text-generation service
pub struct MockGenerator {
    reachable: bool,
    reply: MockReply,
    prompts: Mutex<Vec<String>>,
    pings: AtomicUsize,
}

impl MockGenerator {
    pub fn online(reply: MockReply) -> Self {
        Self {
            reachable: true,
            reply,
            prompts: Mutex::new(Vec::new()),
            pings: AtomicUsize::new(0),
        }
    }

    pub fn offline() -> Self {
        Self {
            reachable: false,
            reply: MockReply::Error,
            prompts: Mutex::new(Vec::new()),
            pings: AtomicUsize::new(0),
        }
    }

    /// Prompts received by generate, in order
    pub fn prompts(&self) -> Vec<String> {
        self.prompts.lock().unwrap().clone()
    }

    pub fn ping_count(&self) -> usize {
        self.pings.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TextGenerator for MockGenerator {
    async fn ping(&self) -> Result<(), AnalysisError> {
        self.pings.fetch_add(1, Ordering::SeqCst);
        if self.reachable {
            Ok(())
        } else {
            Err(AnalysisError::Unavailable("connection refused".to_string()))
        }
    }

    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        self.prompts.lock().unwrap().push(prompt.to_string());
        match &self.reply {
            MockReply::Text(text) => Ok(text.clone()),
            MockReply::Error => Err(AnalysisError::Failed("status 500".to_string())),
            MockReply::Hang => {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok("too late".to_string())
            }
        }
    }

    fn model(&self) -> &str {
        "mock-model"
    }

    fn base_url(&self) -> &str {
        "http://mock"
    }
}
