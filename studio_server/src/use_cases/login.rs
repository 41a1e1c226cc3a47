use std::sync::Arc;

use uuid::Uuid;

use crate::domain::entities::{AccessToken, User};
use crate::domain::errors::StudioError;
use crate::domain::password::verify_password;
use crate::domain::ports::{Clock, TokenStore, UserRepository};

// Token type label handed back to clients with every token.
pub const TOKEN_TYPE: &str = "Bearer";

// Credentials submitted to the login use case.
pub struct LoginCommand {
    pub email: String,
    pub password: String,
}

// Issued token plus the authenticated user profile.
pub struct LoginOutcome {
    pub token: String,
    pub expires_at: u64,
    pub user: User,
}

// Login use case with injected dependencies.
pub struct LoginUseCase<C> {
    pub clock: C,
    pub users: Arc<dyn UserRepository>,
    pub tokens: Arc<dyn TokenStore>,
    pub ttl_seconds: u64,
}

impl<C> LoginUseCase<C>
where
    C: Clock,
{
    pub async fn execute(&self, command: LoginCommand) -> Result<LoginOutcome, StudioError> {
        if command.email.trim().is_empty() {
            return Err(StudioError::validation("email is required"));
        }
        if command.password.is_empty() {
            return Err(StudioError::validation("password is required"));
        }

        let user = self
            .users
            .find_by_email(command.email.trim())
            .await
            .map_err(|_| StudioError::StorageFailure)?
            .ok_or(StudioError::BadCredentials)?;

        // Same error for unknown email and wrong password.
        if !verify_password(&command.password, &user.password_hash) {
            return Err(StudioError::BadCredentials);
        }

        let now = self.clock.now_epoch_seconds();
        // Sweep stale tokens on each login so the table stays bounded.
        match self.tokens.purge_expired(now).await {
            Ok(0) => {}
            Ok(purged) => tracing::debug!(purged, "expired tokens purged"),
            Err(error) => tracing::warn!(%error, "token purge failed"),
        }

        let token = Uuid::new_v4().to_string();
        let expires_at = now.saturating_add(self.ttl_seconds);

        self.tokens
            .insert(
                token.clone(),
                AccessToken {
                    user_id: user.id,
                    email: user.email.clone(),
                    expires_at,
                },
            )
            .await
            .map_err(|_| StudioError::StorageFailure)?;

        Ok(LoginOutcome {
            token,
            expires_at,
            user,
        })
    }
}
