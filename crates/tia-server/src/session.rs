//! Per-session chat state and the live-session store.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use uuid::Uuid;

use tia_memory::ConversationMemory;

/// Who said a transcript line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Bot,
}

/// One line of the append-only session transcript.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HistoryEntry {
    pub role: Role,
    pub text: String,
}

/// Mutable half of a session, guarded by one async lock.
#[derive(Debug, Default)]
pub struct SessionState {
    pub memory: ConversationMemory,
    pub history: Vec<HistoryEntry>,
}

/// One chat session.
///
/// The state lock is held across the whole answer computation, so messages
/// within a session are handled strictly one at a time; different sessions
/// proceed independently.
#[derive(Debug)]
pub struct ChatSession {
    id: String,
    created_at: DateTime<Utc>,
    state: Mutex<SessionState>,
}

impl ChatSession {
    fn new(id: String) -> Self {
        Self {
            id,
            created_at: Utc::now(),
            state: Mutex::new(SessionState::default()),
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn created_at(&self) -> DateTime<Utc> {
        self.created_at
    }

    pub fn state(&self) -> &Mutex<SessionState> {
        &self.state
    }
}

/// Concurrent map of live sessions.
#[derive(Debug, Default)]
pub struct SessionStore {
    sessions: DashMap<String, Arc<ChatSession>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a session, generating an id when none is supplied.
    ///
    /// Returns `None` when the supplied id is already taken.
    pub fn create(&self, id: Option<String>) -> Option<Arc<ChatSession>> {
        let id = id.unwrap_or_else(|| Uuid::new_v4().to_string());
        match self.sessions.entry(id.clone()) {
            dashmap::mapref::entry::Entry::Occupied(_) => None,
            dashmap::mapref::entry::Entry::Vacant(slot) => {
                let session = Arc::new(ChatSession::new(id));
                slot.insert(session.clone());
                Some(session)
            }
        }
    }

    pub fn get(&self, id: &str) -> Option<Arc<ChatSession>> {
        self.sessions.get(id).map(|entry| entry.value().clone())
    }

    pub fn remove(&self, id: &str) -> bool {
        self.sessions.remove(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.sessions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.sessions.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn create_generates_an_id_when_absent() {
        let store = SessionStore::new();
        let session = store.create(None).unwrap();
        assert!(!session.id().is_empty());
        assert!(store.get(session.id()).is_some());
    }

    #[test]
    fn create_honors_a_supplied_id() {
        let store = SessionStore::new();
        let session = store.create(Some("team-a".to_string())).unwrap();
        assert_eq!(session.id(), "team-a");
    }

    #[test]
    fn duplicate_id_is_rejected() {
        let store = SessionStore::new();
        store.create(Some("dup".to_string())).unwrap();
        assert!(store.create(Some("dup".to_string())).is_none());
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn remove_drops_the_session() {
        let store = SessionStore::new();
        let session = store.create(None).unwrap();
        assert!(store.remove(session.id()));
        assert!(store.get(session.id()).is_none());
        assert!(!store.remove(session.id()));
    }

    #[tokio::test]
    async fn sessions_do_not_share_state() {
        let store = SessionStore::new();
        let a = store.create(None).unwrap();
        let b = store.create(None).unwrap();

        a.state().lock().await.history.push(HistoryEntry {
            role: Role::User,
            text: "שלום".to_string(),
        });

        assert_eq!(a.state().lock().await.history.len(), 1);
        assert!(b.state().lock().await.history.is_empty());
    }
}
