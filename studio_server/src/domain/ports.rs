use async_trait::async_trait;
use chrono::{DateTime, Utc};

use crate::domain::entities::{
    AccessToken, NewTeacher, NewUser, SessionDraft, Teacher, User, YogaSession,
};

// Storage errors stay as strings at the port boundary; use cases map them
// to StudioError::StorageFailure.

#[async_trait]
pub trait UserRepository: Send + Sync {
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, String>;
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, String>;
    async fn insert(&self, user: NewUser, now: DateTime<Utc>) -> Result<User, String>;
    async fn delete(&self, id: u64) -> Result<bool, String>;
}

#[async_trait]
pub trait TeacherRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<Teacher>, String>;
    async fn find_by_id(&self, id: u64) -> Result<Option<Teacher>, String>;
    async fn insert(&self, teacher: NewTeacher, now: DateTime<Utc>) -> Result<Teacher, String>;
}

#[async_trait]
pub trait SessionRepository: Send + Sync {
    async fn find_all(&self) -> Result<Vec<YogaSession>, String>;
    async fn find_by_id(&self, id: u64) -> Result<Option<YogaSession>, String>;
    async fn insert(&self, draft: SessionDraft, now: DateTime<Utc>) -> Result<YogaSession, String>;
    // Returns None when no session has this id.
    async fn update(
        &self,
        id: u64,
        draft: SessionDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<YogaSession>, String>;
    async fn delete(&self, id: u64) -> Result<bool, String>;
    // Append a participant. None when the session is missing, Some(false)
    // when the user already participates. Check and write are one step.
    async fn add_participant(
        &self,
        id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<bool>, String>;
    // Remove a participant. None when the session is missing, Some(false)
    // when the user was not participating.
    async fn remove_participant(
        &self,
        id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<bool>, String>;
    // Drop a user from every participant list; returns how many sessions changed.
    async fn remove_user_everywhere(&self, user_id: u64) -> Result<usize, String>;
}

// Port for bearer token storage used by auth use cases.
#[async_trait]
pub trait TokenStore: Send + Sync {
    async fn insert(&self, token: String, access: AccessToken) -> Result<(), String>;
    async fn get(&self, token: &str) -> Result<Option<AccessToken>, String>;
    async fn remove(&self, token: &str) -> Result<bool, String>;
    async fn revoke_user(&self, user_id: u64) -> Result<usize, String>;
    // Drop every token whose expiry is at or before `now`.
    async fn purge_expired(&self, now: u64) -> Result<usize, String>;
}

// Port for retrieving the current time.
pub trait Clock: Send + Sync {
    fn now_utc(&self) -> DateTime<Utc>;

    fn now_epoch_seconds(&self) -> u64 {
        u64::try_from(self.now_utc().timestamp()).unwrap_or_default()
    }
}
