use std::sync::Arc;

use crate::domain::entities::Teacher;
use crate::domain::errors::StudioError;
use crate::domain::ports::TeacherRepository;

// Read-only teacher lookups.
pub struct TeacherDirectory {
    pub teachers: Arc<dyn TeacherRepository>,
}

impl TeacherDirectory {
    pub async fn list(&self) -> Result<Vec<Teacher>, StudioError> {
        self.teachers
            .find_all()
            .await
            .map_err(|_| StudioError::StorageFailure)
    }

    pub async fn find(&self, id: u64) -> Result<Teacher, StudioError> {
        self.teachers
            .find_by_id(id)
            .await
            .map_err(|_| StudioError::StorageFailure)?
            .ok_or(StudioError::NotFound("teacher"))
    }
}
