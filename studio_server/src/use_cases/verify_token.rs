use std::sync::Arc;

use crate::domain::errors::StudioError;
use crate::domain::ports::{Clock, TokenStore};

// Caller identity resolved from a bearer token.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Identity {
    pub user_id: u64,
    pub email: String,
}

// Token verification use case with injected dependencies.
pub struct VerifyTokenUseCase<C> {
    pub clock: C,
    pub tokens: Arc<dyn TokenStore>,
}

impl<C> VerifyTokenUseCase<C>
where
    C: Clock,
{
    pub async fn execute(&self, token: &str) -> Result<Identity, StudioError> {
        let access = self
            .tokens
            .get(token)
            .await
            .map_err(|_| StudioError::StorageFailure)?
            .ok_or(StudioError::InvalidToken)?;

        if access.expires_at <= self.clock.now_epoch_seconds() {
            // Best-effort cleanup of expired token.
            let _ = self.tokens.remove(token).await;
            return Err(StudioError::TokenExpired);
        }

        Ok(Identity {
            user_id: access.user_id,
            email: access.email,
        })
    }
}
