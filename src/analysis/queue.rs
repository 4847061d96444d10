use std::collections::VecDeque;

use serde::Serialize;
use tokio::sync::Mutex;
use tracing::debug;

use crate::session::models::Action;

pub const DEFAULT_QUEUE_CAPACITY: usize = 5;

/// Raw action kept for diagnostics
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct QueuedAction {
    pub session_id: String,
    pub action: Action,
}

/// Fixed-capacity, best-effort buffer of recent raw actions.
///
/// Once full, new items are dropped; nothing here affects analysis results.
#[derive(Debug)]
pub struct DiagnosticQueue {
    capacity: usize,
    items: Mutex<VecDeque<QueuedAction>>,
}

impl Default for DiagnosticQueue {
    fn default() -> Self {
        Self::new(DEFAULT_QUEUE_CAPACITY)
    }
}

impl DiagnosticQueue {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity,
            items: Mutex::new(VecDeque::with_capacity(capacity)),
        }
    }

    /// Returns false when the item was dropped because the queue is full
    pub async fn push(&self, session_id: &str, action: &Action) -> bool {
        let mut items = self.items.lock().await;
        if items.len() >= self.capacity {
            debug!(session_id = %session_id, "Diagnostic queue full, dropping action");
            return false;
        }
        items.push_back(QueuedAction {
            session_id: session_id.to_string(),
            action: action.clone(),
        });
        true
    }

    pub async fn len(&self) -> usize {
        self.items.lock().await.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.items.lock().await.is_empty()
    }

    pub async fn snapshot(&self) -> Vec<QueuedAction> {
        self.items.lock().await.iter().cloned().collect()
    }
}
