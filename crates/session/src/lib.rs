//! Admin session management — account directory, login/logout service, and
//! pluggable session stores (in-memory or file-backed).

pub mod auth;
pub mod store;

pub use auth::{AccountDirectory, AuthService, Credentials};
pub use store::{FileSessionStore, InMemorySessionStore, Session, SessionStore};
