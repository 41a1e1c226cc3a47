use async_trait::async_trait;
use serde::Serialize;

use crate::domain::SessionInformation;

// Credentials sent to `POST /api/auth/login`.
#[derive(Clone, Debug, Serialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

// Account fields sent to `POST /api/auth/register`.
#[derive(Clone, Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

// Failure reported by an auth provider. Upstream keeps the HTTP status and
// the `message` of the error body, when there was one.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum AuthProviderError {
    #[error("auth transport error: {0}")]
    Transport(String),
    #[error("auth upstream error {status}: {}", .message.as_deref().unwrap_or("no message"))]
    Upstream { status: u16, message: Option<String> },
    #[error("auth response decode error: {0}")]
    Decode(String),
}

// The use cases depend on this trait, not the concrete HTTP client.
#[async_trait]
pub trait AuthProvider: Send + Sync {
    async fn login(&self, req: LoginRequest) -> Result<SessionInformation, AuthProviderError>;
    async fn register(&self, req: RegisterRequest) -> Result<(), AuthProviderError>;
}
