use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use tokio::sync::Mutex;

use crate::domain::entities::{
    AccessToken, NewTeacher, NewUser, SessionDraft, Teacher, User, YogaSession,
};
use crate::domain::ports::{SessionRepository, TeacherRepository, TokenStore, UserRepository};

// Rows keyed by id; ids are handed out in increasing order so iteration
// order matches insertion order.
struct Table<T> {
    rows: BTreeMap<u64, T>,
    next_id: u64,
}

impl<T> Default for Table<T> {
    fn default() -> Self {
        Self {
            rows: BTreeMap::new(),
            next_id: 1,
        }
    }
}

impl<T> Table<T> {
    fn from_rows(rows: Vec<T>, id_of: impl Fn(&T) -> u64) -> Self {
        let rows: BTreeMap<u64, T> = rows.into_iter().map(|row| (id_of(&row), row)).collect();
        let next_id = rows.keys().next_back().map_or(1, |last| last + 1);
        Self { rows, next_id }
    }

    fn allocate_id(&mut self) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        id
    }
}

fn shared<T>(table: Table<T>) -> Arc<Mutex<Table<T>>> {
    Arc::new(Mutex::new(table))
}

// In-memory user repository.
#[derive(Clone, Default)]
pub struct InMemoryUsers {
    table: Arc<Mutex<Table<User>>>,
}

impl InMemoryUsers {
    pub fn with_rows(rows: Vec<User>) -> Self {
        Self {
            table: shared(Table::from_rows(rows, |user| user.id)),
        }
    }
}

#[async_trait]
impl UserRepository for InMemoryUsers {
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, String> {
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, String> {
        let table = self.table.lock().await;
        Ok(table.rows.values().find(|user| user.email == email).cloned())
    }

    async fn insert(&self, user: NewUser, now: DateTime<Utc>) -> Result<User, String> {
        let mut table = self.table.lock().await;
        if table.rows.values().any(|existing| existing.email == user.email) {
            return Err(format!("duplicate email {}", user.email));
        }

        let id = table.allocate_id();
        let created = User {
            id,
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            password_hash: user.password_hash,
            admin: user.admin,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn delete(&self, id: u64) -> Result<bool, String> {
        let mut table = self.table.lock().await;
        Ok(table.rows.remove(&id).is_some())
    }
}

// In-memory teacher repository.
#[derive(Clone, Default)]
pub struct InMemoryTeachers {
    table: Arc<Mutex<Table<Teacher>>>,
}

impl InMemoryTeachers {
    pub fn with_rows(rows: Vec<Teacher>) -> Self {
        Self {
            table: shared(Table::from_rows(rows, |teacher| teacher.id)),
        }
    }
}

#[async_trait]
impl TeacherRepository for InMemoryTeachers {
    async fn find_all(&self) -> Result<Vec<Teacher>, String> {
        let table = self.table.lock().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Teacher>, String> {
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, teacher: NewTeacher, now: DateTime<Utc>) -> Result<Teacher, String> {
        let mut table = self.table.lock().await;
        let id = table.allocate_id();
        let created = Teacher {
            id,
            first_name: teacher.first_name,
            last_name: teacher.last_name,
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, created.clone());
        Ok(created)
    }
}

// In-memory yoga session repository.
#[derive(Clone, Default)]
pub struct InMemorySessions {
    table: Arc<Mutex<Table<YogaSession>>>,
}

impl InMemorySessions {
    pub fn with_rows(rows: Vec<YogaSession>) -> Self {
        Self {
            table: shared(Table::from_rows(rows, |session| session.id)),
        }
    }
}

#[async_trait]
impl SessionRepository for InMemorySessions {
    async fn find_all(&self) -> Result<Vec<YogaSession>, String> {
        let table = self.table.lock().await;
        Ok(table.rows.values().cloned().collect())
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<YogaSession>, String> {
        let table = self.table.lock().await;
        Ok(table.rows.get(&id).cloned())
    }

    async fn insert(&self, draft: SessionDraft, now: DateTime<Utc>) -> Result<YogaSession, String> {
        let mut table = self.table.lock().await;
        let id = table.allocate_id();
        let created = YogaSession {
            id,
            name: draft.name,
            date: draft.date,
            description: draft.description,
            teacher_id: Some(draft.teacher_id),
            users: Vec::new(),
            created_at: now,
            updated_at: now,
        };
        table.rows.insert(id, created.clone());
        Ok(created)
    }

    async fn update(
        &self,
        id: u64,
        draft: SessionDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<YogaSession>, String> {
        let mut table = self.table.lock().await;
        let Some(session) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        session.name = draft.name;
        session.date = draft.date;
        session.description = draft.description;
        session.teacher_id = Some(draft.teacher_id);
        session.updated_at = now;
        Ok(Some(session.clone()))
    }

    async fn delete(&self, id: u64) -> Result<bool, String> {
        let mut table = self.table.lock().await;
        Ok(table.rows.remove(&id).is_some())
    }

    async fn add_participant(
        &self,
        id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<bool>, String> {
        let mut table = self.table.lock().await;
        let Some(session) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        if session.users.contains(&user_id) {
            return Ok(Some(false));
        }
        session.users.push(user_id);
        session.updated_at = now;
        Ok(Some(true))
    }

    async fn remove_participant(
        &self,
        id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<bool>, String> {
        let mut table = self.table.lock().await;
        let Some(session) = table.rows.get_mut(&id) else {
            return Ok(None);
        };

        let before = session.users.len();
        session.users.retain(|id| *id != user_id);
        if session.users.len() == before {
            return Ok(Some(false));
        }
        session.updated_at = now;
        Ok(Some(true))
    }

    async fn remove_user_everywhere(&self, user_id: u64) -> Result<usize, String> {
        let mut table = self.table.lock().await;
        let mut changed = 0;
        for session in table.rows.values_mut() {
            let before = session.users.len();
            session.users.retain(|id| *id != user_id);
            if session.users.len() != before {
                changed += 1;
            }
        }
        Ok(changed)
    }
}

// In-memory bearer token table.
#[derive(Clone, Default)]
pub struct InMemoryTokens {
    pub tokens: Arc<Mutex<HashMap<String, AccessToken>>>,
}

#[async_trait]
impl TokenStore for InMemoryTokens {
    async fn insert(&self, token: String, access: AccessToken) -> Result<(), String> {
        let mut tokens = self.tokens.lock().await;
        tokens.insert(token, access);
        Ok(())
    }

    async fn get(&self, token: &str) -> Result<Option<AccessToken>, String> {
        let tokens = self.tokens.lock().await;
        Ok(tokens.get(token).cloned())
    }

    async fn remove(&self, token: &str) -> Result<bool, String> {
        let mut tokens = self.tokens.lock().await;
        Ok(tokens.remove(token).is_some())
    }

    async fn revoke_user(&self, user_id: u64) -> Result<usize, String> {
        let mut tokens = self.tokens.lock().await;
        let before = tokens.len();
        tokens.retain(|_, access| access.user_id != user_id);
        Ok(before - tokens.len())
    }

    async fn purge_expired(&self, now: u64) -> Result<usize, String> {
        let mut tokens = self.tokens.lock().await;
        let before = tokens.len();
        tokens.retain(|_, access| access.expires_at > now);
        Ok(before - tokens.len())
    }
}
