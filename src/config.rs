use std::path::PathBuf;
use std::time::Duration;

use tracing::debug;

const DEFAULT_PORT: u16 = 3000;
const DEFAULT_HOST: &str = "0.0.0.0";
const DEFAULT_OLLAMA_URL: &str = "http://localhost:11434";
const DEFAULT_OLLAMA_MODEL: &str = "tinyllama";

/// Settings for talking to the external text-generation service
#[derive(Debug, Clone)]
pub struct AiConfig {
    pub base_url: String,
    pub model: String,
    /// Budget for model load + generation
    pub generation_timeout: Duration,
    /// Budget for the lightweight liveness call
    pub probe_timeout: Duration,
    /// How old an "unavailable" probe result must be before it is re-checked
    pub recheck_interval: Duration,
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_OLLAMA_URL.to_string(),
            model: DEFAULT_OLLAMA_MODEL.to_string(),
            generation_timeout: Duration::from_secs(30),
            probe_timeout: Duration::from_secs(5),
            recheck_interval: Duration::from_secs(60),
        }
    }
}

/// Process-wide configuration, read once at startup
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub host: String,
    pub port: u16,
    pub static_dir: Option<PathBuf>,
    pub ai: AiConfig,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_HOST.to_string(),
            port: DEFAULT_PORT,
            static_dir: None,
            ai: AiConfig::default(),
        }
    }
}

impl AppConfig {
    /// Loads configuration from environment variables, falling back to defaults
    /// for anything missing or unparseable
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        let secs = |key: &str, default: Duration| {
            lookup(key)
                .and_then(|s| s.parse::<u64>().ok())
                .map(Duration::from_secs)
                .unwrap_or(default)
        };

        let config = Self {
            host: lookup("HOST").unwrap_or(defaults.host),
            port: lookup("PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(defaults.port),
            static_dir: lookup("STATIC_DIR").map(PathBuf::from),
            ai: AiConfig {
                base_url: lookup("OLLAMA_URL").unwrap_or(defaults.ai.base_url),
                model: lookup("OLLAMA_MODEL").unwrap_or(defaults.ai.model),
                generation_timeout: secs(
                    "AI_GENERATION_TIMEOUT_SECS",
                    defaults.ai.generation_timeout,
                ),
                probe_timeout: secs("AI_PROBE_TIMEOUT_SECS", defaults.ai.probe_timeout),
                recheck_interval: secs("AI_RECHECK_INTERVAL_SECS", defaults.ai.recheck_interval),
            },
        };

        debug!(
            port = config.port,
            ollama_url = %config.ai.base_url,
            model = %config.ai.model,
            "Configuration loaded"
        );
        config
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
