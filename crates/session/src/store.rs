//! Session stores — the lifecycle backend behind admin logins.
//!
//! The console is wired against the [`SessionStore`] trait and picks an
//! implementation at startup: in-memory for development, file-backed when
//! sessions should survive a restart.

use std::collections::HashMap;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use dashmap::DashMap;
use parking_lot::RwLock;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use promopilot_core::ConsoleResult;

/// An authenticated admin session.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Session {
    pub session_id: Uuid,
    pub username: String,
    pub roles: Vec<String>,
    pub token: String,
    pub created_at: DateTime<Utc>,
    pub expires_at: DateTime<Utc>,
}

impl Session {
    pub fn is_expired(&self, now: DateTime<Utc>) -> bool {
        now >= self.expires_at
    }
}

/// Process-wide session lifecycle. Implementations are injected into the
/// auth service; construction never creates or restores a login by itself.
pub trait SessionStore: Send + Sync {
    fn insert(&self, session: Session) -> ConsoleResult<()>;

    /// Fetch regardless of expiry.
    fn get(&self, session_id: Uuid) -> Option<Session>;

    /// Fetch only when the session exists and has not expired.
    fn validate(&self, session_id: Uuid) -> Option<Session> {
        self.get(session_id).filter(|s| !s.is_expired(Utc::now()))
    }

    /// Delete a session. `Ok(true)` when it existed.
    fn revoke(&self, session_id: Uuid) -> ConsoleResult<bool>;

    fn active_sessions(&self) -> Vec<Session>;
}

/// Development store: sessions live and die with the process.
#[derive(Default)]
pub struct InMemorySessionStore {
    sessions: DashMap<Uuid, Session>,
}

impl InMemorySessionStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl SessionStore for InMemorySessionStore {
    fn insert(&self, session: Session) -> ConsoleResult<()> {
        self.sessions.insert(session.session_id, session);
        Ok(())
    }

    fn get(&self, session_id: Uuid) -> Option<Session> {
        self.sessions.get(&session_id).map(|s| s.clone())
    }

    fn revoke(&self, session_id: Uuid) -> ConsoleResult<bool> {
        Ok(self.sessions.remove(&session_id).is_some())
    }

    fn active_sessions(&self) -> Vec<Session> {
        let now = Utc::now();
        self.sessions
            .iter()
            .filter(|e| !e.value().is_expired(now))
            .map(|e| e.value().clone())
            .collect()
    }
}

/// File-backed store: the session map is kept in memory and written out as
/// a JSON document on every mutation.
pub struct FileSessionStore {
    path: PathBuf,
    sessions: RwLock<HashMap<Uuid, Session>>,
}

impl FileSessionStore {
    /// Open a store at `path`, restoring any sessions persisted there. The
    /// file is created on the first mutation.
    pub fn open(path: impl AsRef<Path>) -> ConsoleResult<Self> {
        let path = path.as_ref().to_path_buf();
        let sessions = if path.exists() {
            let raw = std::fs::read_to_string(&path)?;
            serde_json::from_str(&raw)?
        } else {
            HashMap::new()
        };
        info!(path = %path.display(), restored = sessions.len(), "Session file opened");
        Ok(Self {
            path,
            sessions: RwLock::new(sessions),
        })
    }

    fn persist(&self, sessions: &HashMap<Uuid, Session>) -> ConsoleResult<()> {
        let raw = serde_json::to_string_pretty(sessions)?;
        std::fs::write(&self.path, raw)?;
        Ok(())
    }
}

impl SessionStore for FileSessionStore {
    fn insert(&self, session: Session) -> ConsoleResult<()> {
        let mut sessions = self.sessions.write();
        sessions.insert(session.session_id, session);
        self.persist(&sessions)
    }

    fn get(&self, session_id: Uuid) -> Option<Session> {
        self.sessions.read().get(&session_id).cloned()
    }

    fn revoke(&self, session_id: Uuid) -> ConsoleResult<bool> {
        let mut sessions = self.sessions.write();
        let removed = sessions.remove(&session_id).is_some();
        if removed {
            self.persist(&sessions)?;
        }
        Ok(removed)
    }

    fn active_sessions(&self) -> Vec<Session> {
        let now = Utc::now();
        self.sessions
            .read()
            .values()
            .filter(|s| !s.is_expired(now))
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample_session(ttl_hours: i64) -> Session {
        let now = Utc::now();
        Session {
            session_id: Uuid::new_v4(),
            username: "admin".into(),
            roles: vec!["admin".into()],
            token: "pp_session_test".into(),
            created_at: now,
            expires_at: now + Duration::hours(ttl_hours),
        }
    }

    #[test]
    fn test_in_memory_lifecycle() {
        let store = InMemorySessionStore::new();
        let session = sample_session(8);
        let id = session.session_id;

        store.insert(session).unwrap();
        assert!(store.validate(id).is_some());
        assert_eq!(store.active_sessions().len(), 1);

        assert!(store.revoke(id).unwrap());
        assert!(store.validate(id).is_none());
        assert!(!store.revoke(id).unwrap());
    }

    #[test]
    fn test_expired_session_fails_validation() {
        let store = InMemorySessionStore::new();
        let session = sample_session(0);
        let id = session.session_id;

        store.insert(session).unwrap();
        // Still fetchable, but no longer valid.
        assert!(store.get(id).is_some());
        assert!(store.validate(id).is_none());
        assert!(store.active_sessions().is_empty());
    }

    #[test]
    fn test_file_store_survives_reopen() {
        let path = std::env::temp_dir().join(format!("pp-sessions-{}.json", Uuid::new_v4()));
        let session = sample_session(8);
        let id = session.session_id;

        {
            let store = FileSessionStore::open(&path).unwrap();
            store.insert(session).unwrap();
        }

        let reopened = FileSessionStore::open(&path).unwrap();
        let restored = reopened.validate(id).unwrap();
        assert_eq!(restored.username, "admin");

        assert!(reopened.revoke(id).unwrap());
        assert!(reopened.validate(id).is_none());
        std::fs::remove_file(&path).unwrap();
    }
}
