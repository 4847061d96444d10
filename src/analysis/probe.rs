use std::sync::Arc;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};
use strum_macros::Display;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, info, instrument, warn};

use super::client::TextGenerator;
use super::errors::AnalysisError;

const WARM_UP_PROMPT: &str = "Hi";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum ProbeState {
    Unknown,
    Available,
    Unavailable,
}

#[derive(Debug, Clone, Copy)]
struct ProbeRecord {
    state: ProbeState,
    checked_at: Option<Instant>,
}

/// Process-wide cache of whether the text-generation service is usable.
///
/// An `Available` result is kept for the life of the process. An
/// `Unavailable` result is re-checked lazily once it is older than the
/// recheck interval.
pub struct ConnectivityProbe {
    generator: Arc<dyn TextGenerator>,
    recheck_interval: Duration,
    record: RwLock<ProbeRecord>,
    probing: AsyncMutex<()>,
}

impl ConnectivityProbe {
    pub fn new(generator: Arc<dyn TextGenerator>, recheck_interval: Duration) -> Self {
        Self {
            generator,
            recheck_interval,
            record: RwLock::new(ProbeRecord {
                state: ProbeState::Unknown,
                checked_at: None,
            }),
            probing: AsyncMutex::new(()),
        }
    }

    pub async fn state(&self) -> ProbeState {
        self.record.read().await.state
    }

    /// Startup check: liveness followed by a warm-up generation so the model
    /// is loaded before the first session ends
    #[instrument(skip(self), fields(model = %self.generator.model()))]
    pub async fn initialize(&self) -> ProbeState {
        let _guard = self.probing.lock().await;

        let result = match self.generator.ping().await {
            Ok(()) => self.generator.generate(WARM_UP_PROMPT).await.map(|_| ()),
            Err(e) => Err(e),
        };
        self.store(result).await
    }

    /// Answers from the cached result, probing first if it is missing or a
    /// stale negative.
    ///
    /// Never waits on a probe that is already running, such as the startup
    /// warm-up; until that finishes the cached state is the answer.
    pub async fn is_available(&self) -> bool {
        if self.needs_probe().await {
            match self.probing.try_lock() {
                Ok(_guard) => {
                    // A probe may have finished between the check and the lock
                    if self.needs_probe().await {
                        let result = self.generator.ping().await;
                        self.store(result).await;
                    }
                }
                Err(_) => debug!("Probe already in flight, answering from cached state"),
            }
        }
        self.state().await == ProbeState::Available
    }

    async fn needs_probe(&self) -> bool {
        let record = *self.record.read().await;
        match record.state {
            ProbeState::Unknown => true,
            ProbeState::Available => false,
            ProbeState::Unavailable => record
                .checked_at
                .map_or(true, |at| at.elapsed() >= self.recheck_interval),
        }
    }

    async fn store(&self, result: Result<(), AnalysisError>) -> ProbeState {
        let state = match result {
            Ok(()) => {
                info!(
                    url = %self.generator.base_url(),
                    model = %self.generator.model(),
                    "Text generation service available"
                );
                ProbeState::Available
            }
            Err(error) => {
                warn!(
                    url = %self.generator.base_url(),
                    %error,
                    "Text generation service not available, using heuristic analysis"
                );
                ProbeState::Unavailable
            }
        };

        *self.record.write().await = ProbeRecord {
            state,
            checked_at: Some(Instant::now()),
        };
        state
    }
}
