use chrono::{DateTime, Utc};
use std::sync::Arc;

use crate::domain::ports::{Clock, SessionRepository, TeacherRepository, TokenStore, UserRepository};
use crate::interface_adapters::memory::{
    InMemorySessions, InMemoryTeachers, InMemoryTokens, InMemoryUsers,
};

// Default bearer token lifetime (in seconds).
pub const DEFAULT_TOKEN_TTL_SECONDS: u64 = 24 * 60 * 60;

// Application state shared by every handler. Repositories are trait objects
// so the same router serves the in-memory and PostgreSQL backends.
#[derive(Clone)]
pub struct AppState {
    pub users: Arc<dyn UserRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
    pub sessions: Arc<dyn SessionRepository>,
    pub tokens: Arc<dyn TokenStore>,
    pub token_ttl_seconds: u64,
}

impl AppState {
    // Empty in-memory backend.
    pub fn in_memory() -> Self {
        Self::with_repositories(
            InMemoryUsers::default(),
            InMemoryTeachers::default(),
            InMemorySessions::default(),
        )
    }

    pub fn with_repositories(
        users: impl UserRepository + 'static,
        teachers: impl TeacherRepository + 'static,
        sessions: impl SessionRepository + 'static,
    ) -> Self {
        Self {
            users: Arc::new(users),
            teachers: Arc::new(teachers),
            sessions: Arc::new(sessions),
            tokens: Arc::new(InMemoryTokens::default()),
            token_ttl_seconds: DEFAULT_TOKEN_TTL_SECONDS,
        }
    }

    pub fn with_token_ttl(mut self, ttl_seconds: u64) -> Self {
        self.token_ttl_seconds = ttl_seconds;
        self
    }
}

// System clock adapter used by the use cases.
#[derive(Clone)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc::now()
    }
}
