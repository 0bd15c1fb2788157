//! Per-visitor session state and the in-memory store that holds it.
//!
//! Handlers load a copy of [`SessionData`], run domain operations on it, and
//! save it back. The store itself knows nothing about lists or todos.

use std::{
    collections::HashMap,
    sync::{Arc, Mutex},
};

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::models::ListCollection;

/// Default idle lifetime of a session: one day.
const DEFAULT_TTL_SECS: i64 = 86_400;
const DEFAULT_COOKIE_NAME: &str = "todo_session";

/// Everything stored for one visitor.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionData {
    pub lists: ListCollection,
    #[serde(default)]
    pub flash: Flash,
}

/// One-shot status messages, shown on the next rendered page and then cleared.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Flash {
    pub error: Option<String>,
    pub success: Option<String>,
}

impl Flash {
    pub fn is_empty(&self) -> bool {
        self.error.is_none() && self.success.is_none()
    }
}

impl SessionData {
    pub fn set_error(&mut self, message: impl Into<String>) {
        self.flash.error = Some(message.into());
    }

    pub fn set_success(&mut self, message: impl Into<String>) {
        self.flash.success = Some(message.into());
    }

    /// Remove and return the pending status messages.
    pub fn take_flash(&mut self) -> Flash {
        std::mem::take(&mut self.flash)
    }
}

/// Session configuration loaded from environment variables.
#[derive(Clone, Debug)]
pub struct SessionConfig {
    /// Name of the cookie carrying the session id (from TODOS_SESSION_COOKIE)
    pub cookie_name: String,
    /// Idle time after which a session is discarded (from TODOS_SESSION_TTL_SECS)
    pub ttl: Duration,
}

impl SessionConfig {
    /// Load session configuration from environment variables.
    pub fn from_env() -> Self {
        let cookie_name = std::env::var("TODOS_SESSION_COOKIE")
            .ok()
            .map(|s| s.trim().to_string())
            .filter(|s| !s.is_empty())
            .unwrap_or_else(|| DEFAULT_COOKIE_NAME.to_string());

        let ttl_secs = std::env::var("TODOS_SESSION_TTL_SECS")
            .ok()
            .and_then(|s| s.parse::<i64>().ok())
            .filter(|secs| *secs > 0)
            .unwrap_or(DEFAULT_TTL_SECS);

        Self {
            cookie_name,
            ttl: Duration::seconds(ttl_secs),
        }
    }

    /// Create a config with a specific idle lifetime.
    pub fn with_ttl(ttl: Duration) -> Self {
        Self {
            ttl,
            ..Self::default()
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            cookie_name: DEFAULT_COOKIE_NAME.to_string(),
            ttl: Duration::seconds(DEFAULT_TTL_SECS),
        }
    }
}

#[derive(Debug)]
struct Entry {
    data: SessionData,
    last_seen: DateTime<Utc>,
}

/// Shared in-memory session store keyed by session id.
#[derive(Clone, Debug)]
pub struct SessionStore {
    config: SessionConfig,
    sessions: Arc<Mutex<HashMap<Uuid, Entry>>>,
}

impl SessionStore {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            config,
            sessions: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    /// Resolve the session for a request.
    ///
    /// A known, unexpired id is refreshed and returned. Anything else gets a
    /// fresh empty session. The flag is true when a new session was started.
    pub fn resolve(&self, presented: Option<Uuid>) -> (Uuid, bool) {
        let now = Utc::now();
        let mut sessions = self.sessions.lock().expect("session store lock poisoned");

        if let Some(id) = presented {
            if let Some(entry) = sessions.get_mut(&id) {
                if now - entry.last_seen <= self.config.ttl {
                    entry.last_seen = now;
                    return (id, false);
                }
                tracing::debug!("Session {} expired", id);
                sessions.remove(&id);
            }
        }

        // Sweep expired sessions whenever a new one is created
        let ttl = self.config.ttl;
        sessions.retain(|_, entry| now - entry.last_seen <= ttl);

        let id = Uuid::new_v4();
        sessions.insert(
            id,
            Entry {
                data: SessionData::default(),
                last_seen: now,
            },
        );
        tracing::debug!("Started session {}", id);
        (id, true)
    }

    /// Copy of the session's current state. Unknown ids read as empty.
    pub fn load(&self, id: Uuid) -> SessionData {
        let sessions = self.sessions.lock().expect("session store lock poisoned");
        sessions
            .get(&id)
            .map(|entry| entry.data.clone())
            .unwrap_or_default()
    }

    /// Replace the session's state.
    pub fn save(&self, id: Uuid, data: SessionData) {
        let mut sessions = self.sessions.lock().expect("session store lock poisoned");
        sessions.insert(
            id,
            Entry {
                data,
                last_seen: Utc::now(),
            },
        );
    }

    /// Drop every expired session.
    pub fn cleanup(&self) {
        let cutoff = Utc::now() - self.config.ttl;
        let mut sessions = self.sessions.lock().expect("session store lock poisoned");
        sessions.retain(|_, entry| entry.last_seen >= cutoff);
    }

    /// Number of live sessions held.
    pub fn len(&self) -> usize {
        self.sessions
            .lock()
            .expect("session store lock poisoned")
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for SessionStore {
    fn default() -> Self {
        Self::new(SessionConfig::default())
    }
}

/// Handle to the current request's session, inserted by the session middleware.
#[derive(Clone, Debug)]
pub struct Session {
    id: Uuid,
    store: SessionStore,
}

impl Session {
    pub fn new(id: Uuid, store: SessionStore) -> Self {
        Self { id, store }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn load(&self) -> SessionData {
        self.store.load(self.id)
    }

    pub fn save(&self, data: SessionData) {
        self.store.save(self.id, data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unknown_id_starts_a_new_session() {
        let store = SessionStore::default();
        let (id, fresh) = store.resolve(Some(Uuid::new_v4()));
        assert!(fresh);
        assert_eq!(store.load(id), SessionData::default());
    }

    #[test]
    fn known_id_is_reused() {
        let store = SessionStore::default();
        let (id, _) = store.resolve(None);
        let (again, fresh) = store.resolve(Some(id));
        assert_eq!(id, again);
        assert!(!fresh);
    }

    #[test]
    fn saved_state_is_loaded_back() {
        let store = SessionStore::default();
        let (id, _) = store.resolve(None);
        let mut data = store.load(id);
        data.lists.create_list("Groceries").unwrap();
        store.save(id, data.clone());
        assert_eq!(store.load(id), data);
    }

    #[test]
    fn sessions_are_isolated() {
        let store = SessionStore::default();
        let (first, _) = store.resolve(None);
        let (second, _) = store.resolve(None);
        let mut data = store.load(first);
        data.lists.create_list("Mine").unwrap();
        store.save(first, data);
        assert!(store.load(second).lists.is_empty());
    }

    #[test]
    fn expired_session_is_replaced() {
        let store = SessionStore::new(SessionConfig::with_ttl(Duration::seconds(-1)));
        let (id, _) = store.resolve(None);
        let (next, fresh) = store.resolve(Some(id));
        assert!(fresh);
        assert_ne!(id, next);
    }

    #[test]
    fn cleanup_drops_expired_sessions() {
        let store = SessionStore::new(SessionConfig::with_ttl(Duration::seconds(-1)));
        store.resolve(None);
        store.cleanup();
        assert!(store.is_empty());
    }

    #[test]
    fn take_flash_clears_messages() {
        let mut data = SessionData::default();
        data.set_error("oops");
        let flash = data.take_flash();
        assert_eq!(flash.error.as_deref(), Some("oops"));
        assert!(data.flash.is_empty());
    }
}
