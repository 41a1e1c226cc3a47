use std::sync::Arc;

use crate::domain::errors::StudioError;
use crate::domain::ports::{Clock, SessionRepository, UserRepository};

// Adds and removes users from a session's participant list.
pub struct ParticipationUseCase<C> {
    pub clock: C,
    pub sessions: Arc<dyn SessionRepository>,
    pub users: Arc<dyn UserRepository>,
}

impl<C> ParticipationUseCase<C>
where
    C: Clock,
{
    pub async fn participate(&self, session_id: u64, user_id: u64) -> Result<(), StudioError> {
        self.sessions
            .find_by_id(session_id)
            .await
            .map_err(|_| StudioError::StorageFailure)?
            .ok_or(StudioError::NotFound("session"))?;
        self.users
            .find_by_id(user_id)
            .await
            .map_err(|_| StudioError::StorageFailure)?
            .ok_or(StudioError::NotFound("user"))?;

        let added = self
            .sessions
            .add_participant(session_id, user_id, self.clock.now_utc())
            .await
            .map_err(|_| StudioError::StorageFailure)?
            .ok_or(StudioError::NotFound("session"))?;

        if added {
            Ok(())
        } else {
            Err(StudioError::AlreadyParticipating)
        }
    }

    // The user record itself is not required to leave.
    pub async fn leave(&self, session_id: u64, user_id: u64) -> Result<(), StudioError> {
        let removed = self
            .sessions
            .remove_participant(session_id, user_id, self.clock.now_utc())
            .await
            .map_err(|_| StudioError::StorageFailure)?
            .ok_or(StudioError::NotFound("session"))?;

        if removed {
            Ok(())
        } else {
            Err(StudioError::NotParticipating)
        }
    }
}
