use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use chrono::{DateTime, TimeZone, Utc};

use crate::domain::entities::{
    AccessToken, NewTeacher, NewUser, SessionDraft, Teacher, User, YogaSession,
};
use crate::domain::password::hash_password;
use crate::domain::ports::{
    Clock, SessionRepository, TeacherRepository, TokenStore, UserRepository,
};
use crate::interface_adapters::memory::{InMemorySessions, InMemoryTeachers, InMemoryUsers};

pub(crate) type TokenTable = Arc<Mutex<HashMap<String, AccessToken>>>;

// Shared fixed time source for deterministic use-case tests.
pub(crate) struct FixedClock(pub(crate) i64);

impl Clock for FixedClock {
    fn now_utc(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.0, 0)
            .single()
            .expect("fixed clock timestamp should be valid")
    }
}

pub(crate) fn seed_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2024, 1, 1, 10, 0, 0)
        .single()
        .expect("seed timestamp should be valid")
}

// yoga@studio.com (id 1, admin) and test@test.com (id 2).
pub(crate) fn seeded_users() -> InMemoryUsers {
    let user = |id, email: &str, first: &str, last: &str, password: &str, admin| User {
        id,
        email: email.to_string(),
        first_name: first.to_string(),
        last_name: last.to_string(),
        password_hash: hash_password(password),
        admin,
        created_at: seed_time(),
        updated_at: seed_time(),
    };
    InMemoryUsers::with_rows(vec![
        user(1, "yoga@studio.com", "Admin", "Admin", "test!1234", true),
        user(2, "test@test.com", "Test", "User", "password123", false),
    ])
}

pub(crate) fn seeded_teachers() -> InMemoryTeachers {
    let teacher = |id, first: &str, last: &str| Teacher {
        id,
        first_name: first.to_string(),
        last_name: last.to_string(),
        created_at: seed_time(),
        updated_at: seed_time(),
    };
    InMemoryTeachers::with_rows(vec![
        teacher(1, "Margot", "DELAHAYE"),
        teacher(2, "Hélène", "THIERCELIN"),
    ])
}

// Session 1 has user 2 as participant, session 2 is empty.
pub(crate) fn seeded_sessions() -> InMemorySessions {
    let session = |id, name: &str, users: Vec<u64>| YogaSession {
        id,
        name: name.to_string(),
        date: seed_time(),
        description: format!("{name} description"),
        teacher_id: Some(1),
        users,
        created_at: seed_time(),
        updated_at: seed_time(),
    };
    InMemorySessions::with_rows(vec![
        session(1, "Yoga Session", vec![2]),
        session(2, "Evening Yoga", Vec::new()),
    ])
}

#[derive(Clone, Copy, Default)]
pub(crate) struct FailureFlags {
    pub insert: bool,
    pub get: bool,
    pub remove: bool,
}

#[derive(Clone)]
pub(crate) struct RecordingTokens {
    tokens: TokenTable,
    failures: FailureFlags,
}

impl RecordingTokens {
    pub(crate) fn new() -> Self {
        Self {
            tokens: Arc::new(Mutex::new(HashMap::new())),
            failures: FailureFlags::default(),
        }
    }

    pub(crate) fn with_failures(mut self, failures: FailureFlags) -> Self {
        self.failures = failures;
        self
    }

    pub(crate) fn insert_test_token(&self, token: impl Into<String>, access: AccessToken) {
        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        guard.insert(token.into(), access);
    }

    pub(crate) fn get_test_token(&self, token: &str) -> Option<AccessToken> {
        let guard = self.tokens.lock().expect("tokens mutex poisoned");
        guard.get(token).cloned()
    }
}

#[async_trait]
impl TokenStore for RecordingTokens {
    async fn insert(&self, token: String, access: AccessToken) -> Result<(), String> {
        if self.failures.insert {
            return Err("insert failed".to_string());
        }

        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        guard.insert(token, access);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<AccessToken>, String> {
        if self.failures.get {
            return Err("get failed".to_string());
        }

        let guard = self.tokens.lock().expect("tokens mutex poisoned");
        Ok(guard.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        if self.failures.remove {
            return Err("remove failed".to_string());
        }

        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        Ok(guard.remove(token).is_some())
    }

    async fn revoke_user(&self, user_id: u64) -> Result<usize, String> {
        if self.failures.remove {
            return Err("remove failed".to_string());
        }

        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        let before = guard.len();
        guard.retain(|_, access| access.user_id != user_id);
        Ok(before - guard.len())
    }

    async fn purge_expired(&self, now: u64) -> Result<usize, String> {
        if self.failures.remove {
            return Err("remove failed".to_string());
        }

        let mut guard = self.tokens.lock().expect("tokens mutex poisoned");
        let before = guard.len();
        guard.retain(|_, access| access.expires_at > now);
        Ok(before - guard.len())
    }
}

// Every call fails, for storage-error mapping tests.
pub(crate) struct BrokenStorage;

fn broken<T>() -> Result<T, String> {
    Err("storage unavailable".to_string())
}

#[async_trait]
impl UserRepository for BrokenStorage {
    async fn find_by_id(&self, _id: u64) -> Result<Option<User>, String> {
        broken()
    }

    async fn find_by_email(&self, _email: &str) -> Result<Option<User>, String> {
        broken()
    }

    async fn insert(&self, _user: NewUser, _now: DateTime<Utc>) -> Result<User, String> {
        broken()
    }

    async fn delete(&self, _id: u64) -> Result<bool, String> {
        broken()
    }
}

#[async_trait]
impl TeacherRepository for BrokenStorage {
    async fn find_all(&self) -> Result<Vec<Teacher>, String> {
        broken()
    }

    async fn find_by_id(&self, _id: u64) -> Result<Option<Teacher>, String> {
        broken()
    }

    async fn insert(&self, _teacher: NewTeacher, _now: DateTime<Utc>) -> Result<Teacher, String> {
        broken()
    }
}

#[async_trait]
impl SessionRepository for BrokenStorage {
    async fn find_all(&self) -> Result<Vec<YogaSession>, String> {
        broken()
    }

    async fn find_by_id(&self, _id: u64) -> Result<Option<YogaSession>, String> {
        broken()
    }

    async fn insert(&self, _draft: SessionDraft, _now: DateTime<Utc>) -> Result<YogaSession, String> {
        broken()
    }

    async fn update(
        &self,
        _id: u64,
        _draft: SessionDraft,
        _now: DateTime<Utc>,
    ) -> Result<Option<YogaSession>, String> {
        broken()
    }

    async fn delete(&self, _id: u64) -> Result<bool, String> {
        broken()
    }

    async fn add_participant(
        &self,
        _id: u64,
        _user_id: u64,
        _now: DateTime<Utc>,
    ) -> Result<Option<bool>, String> {
        broken()
    }

    async fn remove_participant(
        &self,
        _id: u64,
        _user_id: u64,
        _now: DateTime<Utc>,
    ) -> Result<Option<bool>, String> {
        broken()
    }

    async fn remove_user_everywhere(&self, _user_id: u64) -> Result<usize, String> {
        broken()
    }
}
