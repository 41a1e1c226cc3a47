use async_trait::async_trait;
use chrono::{DateTime, Utc};
use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use std::collections::HashMap;

use crate::domain::entities::{NewTeacher, NewUser, SessionDraft, Teacher, User, YogaSession};
use crate::domain::ports::{SessionRepository, TeacherRepository, UserRepository};

// PostgreSQL-backed repositories. Ids are BIGSERIAL on the database side.

const ADD_PARTICIPANT: &str = r#"
    INSERT INTO participate (session_id, user_id) VALUES ($1, $2)
    ON CONFLICT (session_id, user_id) DO NOTHING
"#;
const REMOVE_PARTICIPANT: &str = "DELETE FROM participate WHERE session_id = $1 AND user_id = $2";

#[derive(Clone)]
pub struct PostgresUsers {
    pub db: PgPool,
}

#[derive(Clone)]
pub struct PostgresTeachers {
    pub db: PgPool,
}

#[derive(Clone)]
pub struct PostgresSessions {
    pub db: PgPool,
}

fn db_id(id: u64) -> Result<i64, String> {
    i64::try_from(id).map_err(|_| format!("id {id} out of range"))
}

fn row_id(row: &PgRow, column: &str) -> Result<u64, sqlx::Error> {
    let raw: i64 = row.try_get(column)?;
    u64::try_from(raw).map_err(|e| sqlx::Error::Decode(Box::new(e)))
}

fn db_error(err: sqlx::Error) -> String {
    err.to_string()
}

fn user_from_row(row: &PgRow) -> Result<User, sqlx::Error> {
    Ok(User {
        id: row_id(row, "id")?,
        email: row.try_get("email")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        password_hash: row.try_get("password_hash")?,
        admin: row.try_get("admin")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn teacher_from_row(row: &PgRow) -> Result<Teacher, sqlx::Error> {
    Ok(Teacher {
        id: row_id(row, "id")?,
        first_name: row.try_get("first_name")?,
        last_name: row.try_get("last_name")?,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

fn session_from_row(row: &PgRow, users: Vec<u64>) -> Result<YogaSession, sqlx::Error> {
    let teacher_id: Option<i64> = row.try_get("teacher_id")?;
    Ok(YogaSession {
        id: row_id(row, "id")?,
        name: row.try_get("name")?,
        date: row.try_get("date")?,
        description: row.try_get("description")?,
        teacher_id: teacher_id.and_then(|id| u64::try_from(id).ok()),
        users,
        created_at: row.try_get("created_at")?,
        updated_at: row.try_get("updated_at")?,
    })
}

const USER_COLUMNS: &str =
    "id, email, first_name, last_name, password_hash, admin, created_at, updated_at";
const TEACHER_COLUMNS: &str = "id, first_name, last_name, created_at, updated_at";
const SESSION_COLUMNS: &str =
    "id, name, date, description, teacher_id, created_at, updated_at";

#[async_trait]
impl UserRepository for PostgresUsers {
    async fn find_by_id(&self, id: u64) -> Result<Option<User>, String> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE id = $1"))
            .bind(db_id(id)?)
            .fetch_optional(&self.db)
            .await
            .map_err(db_error)?;

        row.as_ref().map(user_from_row).transpose().map_err(db_error)
    }

    async fn find_by_email(&self, email: &str) -> Result<Option<User>, String> {
        let row = sqlx::query(&format!("SELECT {USER_COLUMNS} FROM users WHERE email = $1"))
            .bind(email)
            .fetch_optional(&self.db)
            .await
            .map_err(db_error)?;

        row.as_ref().map(user_from_row).transpose().map_err(db_error)
    }

    async fn insert(&self, user: NewUser, now: DateTime<Utc>) -> Result<User, String> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO users (email, first_name, last_name, password_hash, admin, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $6, $6)
            RETURNING {USER_COLUMNS}
            "#
        ))
        .bind(&user.email)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.password_hash)
        .bind(user.admin)
        .bind(now)
        .fetch_one(&self.db)
        .await
        .map_err(db_error)?;

        user_from_row(&row).map_err(db_error)
    }

    async fn delete(&self, id: u64) -> Result<bool, String> {
        let result = sqlx::query("DELETE FROM users WHERE id = $1")
            .bind(db_id(id)?)
            .execute(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }
}

#[async_trait]
impl TeacherRepository for PostgresTeachers {
    async fn find_all(&self) -> Result<Vec<Teacher>, String> {
        let rows = sqlx::query(&format!("SELECT {TEACHER_COLUMNS} FROM teachers ORDER BY id"))
            .fetch_all(&self.db)
            .await
            .map_err(db_error)?;

        rows.iter()
            .map(teacher_from_row)
            .collect::<Result<_, _>>()
            .map_err(db_error)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<Teacher>, String> {
        let row = sqlx::query(&format!(
            "SELECT {TEACHER_COLUMNS} FROM teachers WHERE id = $1"
        ))
        .bind(db_id(id)?)
        .fetch_optional(&self.db)
        .await
        .map_err(db_error)?;

        row.as_ref().map(teacher_from_row).transpose().map_err(db_error)
    }

    async fn insert(&self, teacher: NewTeacher, now: DateTime<Utc>) -> Result<Teacher, String> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO teachers (first_name, last_name, created_at, updated_at)
            VALUES ($1, $2, $3, $3)
            RETURNING {TEACHER_COLUMNS}
            "#
        ))
        .bind(&teacher.first_name)
        .bind(&teacher.last_name)
        .bind(now)
        .fetch_one(&self.db)
        .await
        .map_err(db_error)?;

        teacher_from_row(&row).map_err(db_error)
    }
}

impl PostgresSessions {
    // Participant ids per session, in join order.
    async fn participants(&self, session_id: Option<i64>) -> Result<HashMap<u64, Vec<u64>>, String> {
        let rows = sqlx::query(
            r#"
            SELECT session_id, user_id FROM participate
            WHERE $1::BIGINT IS NULL OR session_id = $1
            ORDER BY position
            "#,
        )
        .bind(session_id)
        .fetch_all(&self.db)
        .await
        .map_err(db_error)?;

        let mut by_session: HashMap<u64, Vec<u64>> = HashMap::new();
        for row in &rows {
            let session = row_id(row, "session_id").map_err(db_error)?;
            let user = row_id(row, "user_id").map_err(db_error)?;
            by_session.entry(session).or_default().push(user);
        }
        Ok(by_session)
    }

    // Runs one participant statement with the session row locked, so the
    // existence check, the change and the timestamp bump commit together.
    async fn change_participant(
        &self,
        statement: &str,
        id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<bool>, String> {
        let id = db_id(id)?;
        let user_id = db_id(user_id)?;
        let mut tx = self.db.begin().await.map_err(db_error)?;

        let session = sqlx::query("SELECT id FROM sessions WHERE id = $1 FOR UPDATE")
            .bind(id)
            .fetch_optional(&mut *tx)
            .await
            .map_err(db_error)?;
        if session.is_none() {
            return Ok(None);
        }

        let changed = sqlx::query(statement)
            .bind(id)
            .bind(user_id)
            .execute(&mut *tx)
            .await
            .map_err(db_error)?
            .rows_affected()
            > 0;
        if changed {
            sqlx::query("UPDATE sessions SET updated_at = $2 WHERE id = $1")
                .bind(id)
                .bind(now)
                .execute(&mut *tx)
                .await
                .map_err(db_error)?;
        }

        tx.commit().await.map_err(db_error)?;
        Ok(Some(changed))
    }

    async fn load(&self, id: i64) -> Result<Option<YogaSession>, String> {
        let row = sqlx::query(&format!(
            "SELECT {SESSION_COLUMNS} FROM sessions WHERE id = $1"
        ))
        .bind(id)
        .fetch_optional(&self.db)
        .await
        .map_err(db_error)?;
        let Some(row) = row else {
            return Ok(None);
        };

        let mut participants = self.participants(Some(id)).await?;
        let users = participants.remove(&row_id(&row, "id").map_err(db_error)?);
        session_from_row(&row, users.unwrap_or_default())
            .map(Some)
            .map_err(db_error)
    }
}

#[async_trait]
impl SessionRepository for PostgresSessions {
    async fn find_all(&self) -> Result<Vec<YogaSession>, String> {
        let rows = sqlx::query(&format!("SELECT {SESSION_COLUMNS} FROM sessions ORDER BY id"))
            .fetch_all(&self.db)
            .await
            .map_err(db_error)?;
        let mut participants = self.participants(None).await?;

        rows.iter()
            .map(|row| {
                let users = participants.remove(&row_id(row, "id")?).unwrap_or_default();
                session_from_row(row, users)
            })
            .collect::<Result<_, _>>()
            .map_err(db_error)
    }

    async fn find_by_id(&self, id: u64) -> Result<Option<YogaSession>, String> {
        self.load(db_id(id)?).await
    }

    async fn insert(&self, draft: SessionDraft, now: DateTime<Utc>) -> Result<YogaSession, String> {
        let row = sqlx::query(&format!(
            r#"
            INSERT INTO sessions (name, date, description, teacher_id, created_at, updated_at)
            VALUES ($1, $2, $3, $4, $5, $5)
            RETURNING {SESSION_COLUMNS}
            "#
        ))
        .bind(&draft.name)
        .bind(draft.date)
        .bind(&draft.description)
        .bind(db_id(draft.teacher_id)?)
        .bind(now)
        .fetch_one(&self.db)
        .await
        .map_err(db_error)?;

        session_from_row(&row, Vec::new()).map_err(db_error)
    }

    async fn update(
        &self,
        id: u64,
        draft: SessionDraft,
        now: DateTime<Utc>,
    ) -> Result<Option<YogaSession>, String> {
        let id = db_id(id)?;
        let result = sqlx::query(
            r#"
            UPDATE sessions
            SET name = $2, date = $3, description = $4, teacher_id = $5, updated_at = $6
            WHERE id = $1
            "#,
        )
        .bind(id)
        .bind(&draft.name)
        .bind(draft.date)
        .bind(&draft.description)
        .bind(db_id(draft.teacher_id)?)
        .bind(now)
        .execute(&self.db)
        .await
        .map_err(db_error)?;

        if result.rows_affected() == 0 {
            return Ok(None);
        }
        self.load(id).await
    }

    async fn delete(&self, id: u64) -> Result<bool, String> {
        let result = sqlx::query("DELETE FROM sessions WHERE id = $1")
            .bind(db_id(id)?)
            .execute(&self.db)
            .await
            .map_err(db_error)?;

        Ok(result.rows_affected() > 0)
    }

    async fn add_participant(
        &self,
        id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<bool>, String> {
        self.change_participant(ADD_PARTICIPANT, id, user_id, now).await
    }

    async fn remove_participant(
        &self,
        id: u64,
        user_id: u64,
        now: DateTime<Utc>,
    ) -> Result<Option<bool>, String> {
        self.change_participant(REMOVE_PARTICIPANT, id, user_id, now).await
    }

    async fn remove_user_everywhere(&self, user_id: u64) -> Result<usize, String> {
        let result = sqlx::query("DELETE FROM participate WHERE user_id = $1")
            .bind(db_id(user_id)?)
            .execute(&self.db)
            .await
            .map_err(db_error)?;

        Ok(usize::try_from(result.rows_affected()).unwrap_or(usize::MAX))
    }
}
