//! Client for the external text-generation service.
//!
//! The service speaks the Ollama HTTP API: `GET /api/tags` answers when the
//! daemon is up, `POST /api/generate` produces text.

use std::time::Duration;

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, instrument};

use super::errors::AnalysisError;
use crate::config::AiConfig;

/// Something that can turn a prompt into free text
#[async_trait]
pub trait TextGenerator: Send + Sync {
    /// Cheap liveness check
    async fn ping(&self) -> Result<(), AnalysisError>;

    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError>;

    fn model(&self) -> &str;

    fn base_url(&self) -> &str;
}

#[derive(Debug, Serialize)]
struct GenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

#[derive(Debug, Deserialize)]
struct GenerateResponse {
    response: String,
}

pub struct OllamaClient {
    base_url: String,
    model: String,
    probe_timeout: Duration,
    generation_timeout: Duration,
    client: reqwest::Client,
}

impl OllamaClient {
    pub fn new(config: &AiConfig) -> Self {
        Self {
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
            probe_timeout: config.probe_timeout,
            generation_timeout: config.generation_timeout,
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl TextGenerator for OllamaClient {
    #[instrument(skip(self), fields(url = %self.base_url))]
    async fn ping(&self) -> Result<(), AnalysisError> {
        let url = format!("{}/api/tags", self.base_url);
        let response = self
            .client
            .get(&url)
            .timeout(self.probe_timeout)
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AnalysisError::Unavailable(format!(
                "liveness check returned status {}",
                response.status()
            )));
        }

        debug!("Text generation service answered liveness check");
        Ok(())
    }

    #[instrument(skip(self, prompt), fields(model = %self.model, prompt_len = prompt.len()))]
    async fn generate(&self, prompt: &str) -> Result<String, AnalysisError> {
        let url = format!("{}/api/generate", self.base_url);
        let response = self
            .client
            .post(&url)
            .timeout(self.generation_timeout)
            .json(&GenerateRequest {
                model: &self.model,
                prompt,
                stream: false,
            })
            .send()
            .await?;

        if !response.status().is_success() {
            return Err(AnalysisError::Failed(format!(
                "generate returned status {}",
                response.status()
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|e| AnalysisError::Malformed(e.to_string()))?;

        debug!(response_len = body.response.len(), "Generated text received");
        Ok(body.response)
    }

    fn model(&self) -> &str {
        &self.model
    }

    fn base_url(&self) -> &str {
        &self.base_url
    }
}
