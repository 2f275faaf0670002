use std::collections::HashMap;
use std::sync::RwLock;

use uuid::Uuid;

use super::context::ConversationContext;
use super::types::TriageError;

/// In-memory session store backed by RwLock. One context per session id;
/// turns within a session are sequential from the caller, so the lock only
/// arbitrates between distinct sessions.
pub struct SessionStore {
    sessions: RwLock<HashMap<Uuid, ConversationContext>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Open a new session with an empty context.
    pub fn create(&self) -> Result<Uuid, TriageError> {
        let mut sessions = self.sessions.write().map_err(|_| TriageError::LockFailed)?;
        let id = Uuid::new_v4();
        sessions.insert(id, ConversationContext::new());
        Ok(id)
    }

    /// Run a closure against one session's context under the write lock.
    pub fn with_context_mut<F, R>(&self, session_id: &Uuid, f: F) -> Result<R, TriageError>
    where
        F: FnOnce(&mut ConversationContext) -> R,
    {
        let mut sessions = self.sessions.write().map_err(|_| TriageError::LockFailed)?;
        let context = sessions
            .get_mut(session_id)
            .ok_or(TriageError::SessionNotFound(*session_id))?;
        Ok(f(context))
    }

    /// Raw message history for a session.
    pub fn history(&self, session_id: &Uuid) -> Result<Vec<String>, TriageError> {
        let sessions = self.sessions.read().map_err(|_| TriageError::LockFailed)?;
        let context = sessions
            .get(session_id)
            .ok_or(TriageError::SessionNotFound(*session_id))?;
        Ok(context.history.clone())
    }

    /// Drop a session. Returns false when the id was unknown.
    pub fn remove(&self, session_id: &Uuid) -> Result<bool, TriageError> {
        let mut sessions = self.sessions.write().map_err(|_| TriageError::LockFailed)?;
        Ok(sessions.remove(session_id).is_some())
    }

    pub fn len(&self) -> Result<usize, TriageError> {
        let sessions = self.sessions.read().map_err(|_| TriageError::LockFailed)?;
        Ok(sessions.len())
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new()
    }
}
