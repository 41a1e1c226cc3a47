use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, de::Error as _};

use crate::domain::entities::{Teacher, User, YogaSession};
use crate::use_cases::login::{LoginOutcome, TOKEN_TYPE};
use crate::use_cases::sessions::SessionInput;

// Request payload for login. Missing fields arrive blank and fail validation.
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Request payload for account registration.
#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

// Response payload for a successful login.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionInformationResponse {
    pub token: String,
    #[serde(rename = "type")]
    pub token_type: String,
    pub id: u64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub admin: bool,
}

impl From<LoginOutcome> for SessionInformationResponse {
    fn from(outcome: LoginOutcome) -> Self {
        Self {
            token: outcome.token,
            token_type: TOKEN_TYPE.to_string(),
            id: outcome.user.id,
            username: outcome.user.email,
            first_name: outcome.user.first_name,
            last_name: outcome.user.last_name,
            admin: outcome.user.admin,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// Simple error envelope for JSON responses.
#[derive(Debug, Serialize)]
pub struct ErrorResponse {
    pub message: String,
}

// Body returned when a protected route is called without a live token.
#[derive(Debug, Serialize)]
pub struct UnauthorizedResponse {
    pub status: u16,
    pub error: String,
    pub message: String,
    pub path: String,
}

// Yoga session as exchanged with clients. On input only name, date,
// teacher_id and description are read.
#[derive(Debug, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SessionDto {
    pub id: Option<u64>,
    pub name: String,
    #[serde(deserialize_with = "lenient_date")]
    pub date: Option<DateTime<Utc>>,
    pub teacher_id: Option<u64>,
    pub description: String,
    pub users: Vec<u64>,
    #[serde(rename = "createdAt")]
    pub created_at: Option<DateTime<Utc>>,
    #[serde(rename = "updatedAt")]
    pub updated_at: Option<DateTime<Utc>>,
}

impl From<YogaSession> for SessionDto {
    fn from(session: YogaSession) -> Self {
        Self {
            id: Some(session.id),
            name: session.name,
            date: Some(session.date),
            teacher_id: session.teacher_id,
            description: session.description,
            users: session.users,
            created_at: Some(session.created_at),
            updated_at: Some(session.updated_at),
        }
    }
}

impl From<SessionDto> for SessionInput {
    fn from(dto: SessionDto) -> Self {
        Self {
            name: dto.name,
            date: dto.date,
            description: dto.description,
            teacher_id: dto.teacher_id,
        }
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TeacherDto {
    pub id: u64,
    pub last_name: String,
    pub first_name: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<Teacher> for TeacherDto {
    fn from(teacher: Teacher) -> Self {
        Self {
            id: teacher.id,
            last_name: teacher.last_name,
            first_name: teacher.first_name,
            created_at: teacher.created_at,
            updated_at: teacher.updated_at,
        }
    }
}

// Public view of a user; the password hash is never serialized.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserDto {
    pub id: u64,
    pub email: String,
    pub last_name: String,
    pub first_name: String,
    pub admin: bool,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<User> for UserDto {
    fn from(user: User) -> Self {
        Self {
            id: user.id,
            email: user.email,
            last_name: user.last_name,
            first_name: user.first_name,
            admin: user.admin,
            created_at: user.created_at,
            updated_at: user.updated_at,
        }
    }
}

// Accepts RFC 3339, a zone-less `YYYY-MM-DDTHH:MM:SS` (read as UTC) or a
// bare `YYYY-MM-DD` (midnight UTC).
pub fn parse_date(value: &str) -> Option<DateTime<Utc>> {
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn lenient_date<'de, D>(deserializer: D) -> Result<Option<DateTime<Utc>>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    raw.map(|value| {
        parse_date(&value).ok_or_else(|| D::Error::custom(format!("invalid date `{value}`")))
    })
    .transpose()
}
