use chrono::{DateTime, Utc};

// Registered studio member. The password hash never leaves the server.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct User {
    pub id: u64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// User fields before the repository assigns an id.
#[derive(Clone, Debug)]
pub struct NewUser {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub admin: bool,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Teacher {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Clone, Debug)]
pub struct NewTeacher {
    pub first_name: String,
    pub last_name: String,
}

// A scheduled yoga session and the ordered list of participating user ids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct YogaSession {
    pub id: u64,
    pub name: String,
    pub date: DateTime<Utc>,
    pub description: String,
    // None once the teacher record is gone.
    pub teacher_id: Option<u64>,
    pub users: Vec<u64>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

// Validated client-editable session fields (create and update).
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SessionDraft {
    pub name: String,
    pub date: DateTime<Utc>,
    pub description: String,
    pub teacher_id: u64,
}

// Bearer token record held in the token table.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AccessToken {
    pub user_id: u64,
    pub email: String,
    pub expires_at: u64,
}
