use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Arc;
use tokio::sync::{Mutex as AsyncMutex, RwLock};
use tracing::{debug, instrument, warn};

use super::models::SessionModel;
use crate::shared::AppError;

/// A live session. Ingest and end both lock it, which serializes them per
/// session while leaving other sessions untouched.
pub type SessionHandle = Arc<AsyncMutex<SessionModel>>;

/// Trait for session repository operations
#[async_trait]
pub trait SessionRepository {
    async fn create_session(&self, session: SessionModel) -> Result<SessionHandle, AppError>;
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionHandle>, AppError>;
    /// Detaches the session from the store. At most one caller receives it.
    async fn remove_session(&self, session_id: &str) -> Result<Option<SessionHandle>, AppError>;
    async fn session_count(&self) -> Result<usize, AppError>;
}

/// In-memory implementation of SessionRepository
///
/// Sessions only live for the lifetime of the process.
pub struct InMemorySessionRepository {
    sessions: RwLock<HashMap<String, SessionHandle>>,
}

impl Default for InMemorySessionRepository {
    fn default() -> Self {
        Self::new()
    }
}

impl InMemorySessionRepository {
    /// Creates a new empty in-memory repository
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Checks if a session exists by ID (useful for debugging)
    pub async fn has_session(&self, session_id: &str) -> bool {
        self.sessions.read().await.contains_key(session_id)
    }
}

#[async_trait]
impl SessionRepository for InMemorySessionRepository {
    #[instrument(skip(self, session), fields(session_id = %session.id))]
    async fn create_session(&self, session: SessionModel) -> Result<SessionHandle, AppError> {
        debug!(player_id = %session.player_id, "Creating session in memory");

        let mut sessions = self.sessions.write().await;
        if sessions.contains_key(&session.id) {
            warn!("Session already exists in memory");
            return Err(AppError::Internal);
        }
        let id = session.id.clone();
        let handle = Arc::new(AsyncMutex::new(session));
        sessions.insert(id, handle.clone());

        Ok(handle)
    }

    #[instrument(skip(self))]
    async fn get_session(&self, session_id: &str) -> Result<Option<SessionHandle>, AppError> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(session_id).cloned();

        if session.is_none() {
            debug!(session_id = %session_id, "Session not found in memory");
        }
        Ok(session)
    }

    #[instrument(skip(self))]
    async fn remove_session(&self, session_id: &str) -> Result<Option<SessionHandle>, AppError> {
        let mut sessions = self.sessions.write().await;
        let removed = sessions.remove(session_id);

        match &removed {
            Some(_) => debug!(session_id = %session_id, "Session removed from memory"),
            None => debug!(session_id = %session_id, "Session not found for removal"),
        }
        Ok(removed)
    }

    async fn session_count(&self) -> Result<usize, AppError> {
        Ok(self.sessions.read().await.len())
    }
}
