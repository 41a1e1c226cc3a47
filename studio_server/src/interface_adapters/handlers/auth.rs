use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
};

use crate::interface_adapters::handlers::{HandlerError, json_payload, map_studio_error};
use crate::interface_adapters::protocol::{
    LoginRequest, MessageResponse, RegisterRequest, SessionInformationResponse,
};
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::login::{LoginCommand, LoginUseCase};
use crate::use_cases::register::{RegisterCommand, RegisterUseCase};

// Exchange credentials for a bearer token and the caller's profile.
#[tracing::instrument(skip_all, fields(email = tracing::field::Empty))]
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> Result<Json<SessionInformationResponse>, HandlerError> {
    let payload = json_payload(payload)?;
    tracing::Span::current().record("email", payload.email.as_str());
    let use_case = LoginUseCase {
        clock: SystemClock,
        users: state.users.clone(),
        tokens: state.tokens.clone(),
        ttl_seconds: state.token_ttl_seconds,
    };

    let outcome = use_case
        .execute(LoginCommand {
            email: payload.email,
            password: payload.password,
        })
        .await
        .map_err(map_studio_error)?;

    tracing::info!(user_id = outcome.user.id, "user logged in");
    Ok(Json(SessionInformationResponse::from(outcome)))
}

#[tracing::instrument(skip_all, fields(email = tracing::field::Empty))]
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> Result<Json<MessageResponse>, HandlerError> {
    let payload = json_payload(payload)?;
    tracing::Span::current().record("email", payload.email.as_str());
    let use_case = RegisterUseCase {
        clock: SystemClock,
        users: state.users.clone(),
    };

    let user = use_case
        .execute(RegisterCommand {
            email: payload.email,
            first_name: payload.first_name,
            last_name: payload.last_name,
            password: payload.password,
        })
        .await
        .map_err(map_studio_error)?;

    tracing::info!(user_id = user.id, "user registered");
    Ok(Json(MessageResponse::new("User registered successfully!")))
}
