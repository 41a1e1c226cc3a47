// HTTP handlers grouped by resource.

pub mod auth;
pub mod sessions;
pub mod teachers;
pub mod users;

use axum::{Json, extract::rejection::JsonRejection, http::StatusCode};

use crate::domain::errors::StudioError;
use crate::interface_adapters::protocol::ErrorResponse;

pub type HandlerError = (StatusCode, Json<ErrorResponse>);

// Helper to build a JSON error response.
fn error_response(status: StatusCode, message: String) -> HandlerError {
    (status, Json(ErrorResponse { message }))
}

// Unwraps a JSON body, turning malformed or mistyped input into a 400
// with the usual `{message}` envelope.
pub fn json_payload<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, HandlerError> {
    match payload {
        Ok(Json(value)) => Ok(value),
        Err(rejection) => {
            tracing::debug!(status = %rejection.status(), "rejected request body");
            Err(error_response(StatusCode::BAD_REQUEST, rejection.body_text()))
        }
    }
}

// Maps domain errors to HTTP responses.
pub fn map_studio_error(err: StudioError) -> HandlerError {
    let status = match &err {
        StudioError::Validation(_)
        | StudioError::EmailTaken
        | StudioError::AlreadyParticipating
        | StudioError::NotParticipating => StatusCode::BAD_REQUEST,
        StudioError::BadCredentials
        | StudioError::InvalidToken
        | StudioError::TokenExpired
        | StudioError::NotAccountOwner => StatusCode::UNAUTHORIZED,
        StudioError::NotFound(_) => StatusCode::NOT_FOUND,
        StudioError::StorageFailure => {
            tracing::error!("storage failure while handling request");
            StatusCode::BAD_GATEWAY
        }
    };

    error_response(status, err.to_string())
}
