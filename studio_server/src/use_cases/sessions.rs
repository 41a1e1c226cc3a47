use std::sync::Arc;

use chrono::{DateTime, Utc};

use crate::domain::entities::{SessionDraft, YogaSession};
use crate::domain::errors::StudioError;
use crate::domain::ports::{Clock, SessionRepository, TeacherRepository};

const NAME_MAX_LEN: usize = 50;
const DESCRIPTION_MAX_LEN: usize = 2500;

// Unvalidated session fields as submitted by a client.
#[derive(Clone, Debug, Default)]
pub struct SessionInput {
    pub name: String,
    pub date: Option<DateTime<Utc>>,
    pub description: String,
    pub teacher_id: Option<u64>,
}

// Session CRUD use cases sharing one set of dependencies.
pub struct SessionCatalog<C> {
    pub clock: C,
    pub sessions: Arc<dyn SessionRepository>,
    pub teachers: Arc<dyn TeacherRepository>,
}

impl<C> SessionCatalog<C>
where
    C: Clock,
{
    pub async fn list(&self) -> Result<Vec<YogaSession>, StudioError> {
        self.sessions
            .find_all()
            .await
            .map_err(|_| StudioError::StorageFailure)
    }

    pub async fn find(&self, id: u64) -> Result<YogaSession, StudioError> {
        self.sessions
            .find_by_id(id)
            .await
            .map_err(|_| StudioError::StorageFailure)?
            .ok_or(StudioError::NotFound("session"))
    }

    pub async fn create(&self, input: SessionInput) -> Result<YogaSession, StudioError> {
        let draft = self.validate(input).await?;

        self.sessions
            .insert(draft, self.clock.now_utc())
            .await
            .map_err(|_| StudioError::StorageFailure)
    }

    pub async fn update(&self, id: u64, input: SessionInput) -> Result<YogaSession, StudioError> {
        let draft = self.validate(input).await?;

        self.sessions
            .update(id, draft, self.clock.now_utc())
            .await
            .map_err(|_| StudioError::StorageFailure)?
            .ok_or(StudioError::NotFound("session"))
    }

    pub async fn delete(&self, id: u64) -> Result<(), StudioError> {
        let deleted = self
            .sessions
            .delete(id)
            .await
            .map_err(|_| StudioError::StorageFailure)?;

        if deleted {
            Ok(())
        } else {
            Err(StudioError::NotFound("session"))
        }
    }

    async fn validate(&self, input: SessionInput) -> Result<SessionDraft, StudioError> {
        let name = require_text("name", input.name, NAME_MAX_LEN)?;
        let description = require_text("description", input.description, DESCRIPTION_MAX_LEN)?;
        let date = input
            .date
            .ok_or_else(|| StudioError::validation("date is required"))?;
        let teacher_id = input
            .teacher_id
            .ok_or_else(|| StudioError::validation("teacher_id is required"))?;

        let teacher = self
            .teachers
            .find_by_id(teacher_id)
            .await
            .map_err(|_| StudioError::StorageFailure)?;
        if teacher.is_none() {
            return Err(StudioError::validation("teacher_id does not match a teacher"));
        }

        Ok(SessionDraft {
            name,
            date,
            description,
            teacher_id,
        })
    }
}

fn require_text(field: &str, value: String, max_len: usize) -> Result<String, StudioError> {
    if value.trim().is_empty() {
        return Err(StudioError::validation(format!("{field} is required")));
    }
    if value.chars().count() > max_len {
        return Err(StudioError::validation(format!(
            "{field} must be at most {max_len} characters"
        )));
    }
    Ok(value)
}
