//! In-memory session registry.

use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::RwLock;
use uuid::Uuid;

use quill_core::ports::{Session, SessionStore};

/// Live sessions keyed by id, guarded by an async RwLock.
///
/// Sessions are lost on process restart; clients then resolve to anonymous.
pub struct InMemorySessionStore {
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self {
            sessions: RwLock::new(HashMap::new()),
        }
    }

    /// Number of sessions currently held, expired ones included.
    pub async fn len(&self) -> usize {
        self.sessions.read().await.len()
    }
}

impl Default for InMemorySessionStore {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl SessionStore for InMemorySessionStore {
    async fn insert(&self, session: Session) {
        let mut sessions = self.sessions.write().await;
        // Opportunistic sweep keeps the map bounded by live sessions.
        sessions.retain(|_, s| !s.is_expired());
        sessions.insert(session.id, session);
    }

    async fn get(&self, id: Uuid) -> Option<Session> {
        let sessions = self.sessions.read().await;
        let session = sessions.get(&id)?;

        if session.is_expired() {
            drop(sessions);
            self.sessions.write().await.remove(&id);
            return None;
        }

        Some(session.clone())
    }

    async fn remove(&self, id: Uuid) {
        self.sessions.write().await.remove(&id);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeDelta;

    #[tokio::test]
    async fn test_insert_get_remove() {
        let store = InMemorySessionStore::new();
        let session = Session::new(3, TimeDelta::hours(1));

        store.insert(session.clone()).await;
        assert_eq!(store.get(session.id).await, Some(session.clone()));

        store.remove(session.id).await;
        assert_eq!(store.get(session.id).await, None);

        // Removing twice is fine.
        store.remove(session.id).await;
    }

    #[tokio::test]
    async fn test_expired_session_is_absent() {
        let store = InMemorySessionStore::new();
        let session = Session::new(3, TimeDelta::seconds(-1));

        store.insert(session.clone()).await;
        assert_eq!(store.get(session.id).await, None);
        assert_eq!(store.len().await, 0);
    }
}
