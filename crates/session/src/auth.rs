//! Login/logout lifecycle over an injected session store.
//!
//! The account directory starts empty: seeding the default admin account is
//! an explicit, logged call made at startup, never a constructor side
//! effect, and nothing here logs a user in on its own.

use chrono::{Duration, Utc};
use dashmap::DashMap;
use rand::Rng;
use std::sync::Arc;
use tracing::{info, warn};
use uuid::Uuid;

use promopilot_core::{ConsoleError, ConsoleResult};

use crate::store::{Session, SessionStore};

const SESSION_TOKEN_PREFIX: &str = "pp_session_";

/// A username/password pair presented at login.
#[derive(Debug, Clone)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

struct Account {
    password: String,
    roles: Vec<String>,
}

/// In-memory directory of admin accounts.
#[derive(Default)]
pub struct AccountDirectory {
    accounts: DashMap<String, Account>,
}

impl AccountDirectory {
    /// An empty directory. No accounts exist until one is added.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_account(
        &self,
        username: impl Into<String>,
        password: impl Into<String>,
        roles: Vec<String>,
    ) {
        let username = username.into();
        info!(username = %username, "Account added");
        self.accounts.insert(
            username,
            Account {
                password: password.into(),
                roles,
            },
        );
    }

    /// Seed the default administrator. Callers opt in to this explicitly.
    pub fn bootstrap_admin(&self, username: impl Into<String>, password: impl Into<String>) {
        let username = username.into();
        info!(username = %username, "Bootstrapping default admin account");
        self.add_account(username, password, vec!["admin".into()]);
    }

    pub fn is_empty(&self) -> bool {
        self.accounts.is_empty()
    }

    /// Roles for the account when the credentials check out.
    fn verify(&self, credentials: &Credentials) -> Option<Vec<String>> {
        self.accounts
            .get(&credentials.username)
            .filter(|a| a.password == credentials.password)
            .map(|a| a.roles.clone())
    }
}

/// Login/logout service. The session store is constructor-injected, so the
/// same service runs against the in-memory or the file-backed store.
pub struct AuthService {
    directory: AccountDirectory,
    store: Arc<dyn SessionStore>,
    session_ttl: Duration,
}

impl AuthService {
    pub fn new(directory: AccountDirectory, store: Arc<dyn SessionStore>, ttl_hours: u32) -> Self {
        Self {
            directory,
            store,
            session_ttl: Duration::hours(i64::from(ttl_hours)),
        }
    }

    /// Verify credentials and open a session.
    pub fn login(&self, credentials: &Credentials) -> ConsoleResult<Session> {
        let Some(roles) = self.directory.verify(credentials) else {
            warn!(username = %credentials.username, "Login rejected");
            return Err(ConsoleError::Credentials(
                "invalid username or password".into(),
            ));
        };

        let now = Utc::now();
        let session = Session {
            session_id: Uuid::new_v4(),
            username: credentials.username.clone(),
            roles,
            token: generate_token(),
            created_at: now,
            expires_at: now + self.session_ttl,
        };
        self.store.insert(session.clone())?;
        info!(
            session_id = %session.session_id,
            username = %session.username,
            "Session opened"
        );
        Ok(session)
    }

    /// Close a session. `Ok(true)` when it existed.
    pub fn logout(&self, session_id: Uuid) -> ConsoleResult<bool> {
        let removed = self.store.revoke(session_id)?;
        if removed {
            info!(session_id = %session_id, "Session closed");
        }
        Ok(removed)
    }

    /// The session when it exists and has not expired.
    pub fn validate(&self, session_id: Uuid) -> Option<Session> {
        self.store.validate(session_id)
    }

    pub fn active_sessions(&self) -> Vec<Session> {
        self.store.active_sessions()
    }
}

/// Random bearer token for a new session.
fn generate_token() -> String {
    let mut rng = rand::thread_rng();
    let bytes: Vec<u8> = (0..32).map(|_| rng.gen()).collect();
    format!(
        "{}{}",
        SESSION_TOKEN_PREFIX,
        bytes
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>()
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::InMemorySessionStore;

    fn service() -> AuthService {
        let directory = AccountDirectory::new();
        directory.bootstrap_admin("admin", "promopilot");
        AuthService::new(directory, Arc::new(InMemorySessionStore::new()), 8)
    }

    fn credentials(username: &str, password: &str) -> Credentials {
        Credentials {
            username: username.into(),
            password: password.into(),
        }
    }

    #[test]
    fn test_directory_starts_empty() {
        let directory = AccountDirectory::new();
        assert!(directory.is_empty());

        // Without bootstrap, no credentials can succeed.
        let auth = AuthService::new(directory, Arc::new(InMemorySessionStore::new()), 8);
        assert!(auth.login(&credentials("admin", "admin")).is_err());
    }

    #[test]
    fn test_login_logout() {
        let auth = service();
        let session = auth.login(&credentials("admin", "promopilot")).unwrap();
        assert_eq!(session.roles, vec!["admin".to_string()]);
        assert!(session.token.starts_with(SESSION_TOKEN_PREFIX));
        assert!(auth.validate(session.session_id).is_some());

        assert!(auth.logout(session.session_id).unwrap());
        assert!(auth.validate(session.session_id).is_none());
        assert!(!auth.logout(session.session_id).unwrap());
    }

    #[test]
    fn test_bad_credentials_rejected() {
        let auth = service();
        assert!(auth.login(&credentials("admin", "wrong")).is_err());
        assert!(auth.login(&credentials("nobody", "promopilot")).is_err());
        assert!(auth.active_sessions().is_empty());
    }
}
