use std::sync::Arc;

use crate::domain::{
    AuthProvider, AuthProviderError, LoginRequest, RegisterRequest, SessionInformation,
};
use crate::use_cases::session_store::SessionStore;

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthFlowError {
    #[error("invalid credentials")]
    InvalidCredentials,
    #[error("request rejected ({status}): {message}")]
    Rejected { status: u16, message: String },
    #[error("studio API unavailable: {0}")]
    Unavailable(String),
}

impl From<AuthProviderError> for AuthFlowError {
    fn from(err: AuthProviderError) -> Self {
        match err {
            AuthProviderError::Upstream { status: 401, .. } => Self::InvalidCredentials,
            AuthProviderError::Upstream { status, message } if (400..500).contains(&status) => {
                Self::Rejected {
                    status,
                    message: message.unwrap_or_else(|| "request rejected".to_string()),
                }
            }
            other => Self::Unavailable(other.to_string()),
        }
    }
}

// Exchanges credentials and records the session only on success.
pub struct LoginUseCase {
    pub provider: Arc<dyn AuthProvider>,
    pub store: SessionStore,
}

impl LoginUseCase {
    #[tracing::instrument(name = "login", skip_all, fields(email = %request.email))]
    pub async fn execute(&self, request: LoginRequest) -> Result<SessionInformation, AuthFlowError> {
        let info = self.provider.login(request).await.map_err(|err| {
            tracing::warn!(error = %err, "login failed");
            AuthFlowError::from(err)
        })?;

        self.store.log_in(info.clone());
        tracing::info!(user_id = info.id, "logged in");
        Ok(info)
    }
}

// Creates an account. Registration does not log the user in.
pub struct RegisterUseCase {
    pub provider: Arc<dyn AuthProvider>,
}

impl RegisterUseCase {
    #[tracing::instrument(name = "register", skip_all, fields(email = %request.email))]
    pub async fn execute(&self, request: RegisterRequest) -> Result<(), AuthFlowError> {
        self.provider
            .register(request)
            .await
            .map_err(AuthFlowError::from)?;

        tracing::info!("account registered");
        Ok(())
    }
}

pub struct LogoutUseCase {
    pub store: SessionStore,
}

impl LogoutUseCase {
    pub fn execute(&self) {
        self.store.log_out();
        tracing::info!("logged out");
    }
}
