// Domain-level errors for studio workflows.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum StudioError {
    #[error("{0}")]
    Validation(String),
    #[error("Bad credentials")]
    BadCredentials,
    #[error("Error: Email is already taken!")]
    EmailTaken,
    #[error("invalid session token")]
    InvalidToken,
    #[error("session expired")]
    TokenExpired,
    #[error("{0} not found")]
    NotFound(&'static str),
    #[error("user already participates in this session")]
    AlreadyParticipating,
    #[error("user does not participate in this session")]
    NotParticipating,
    #[error("cannot delete another user's account")]
    NotAccountOwner,
    #[error("storage error")]
    StorageFailure,
}

impl StudioError {
    pub fn validation(message: impl Into<String>) -> Self {
        Self::Validation(message.into())
    }
}
