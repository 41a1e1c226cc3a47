use axum::{
    Json,
    extract::{Path, State, rejection::JsonRejection},
};

use crate::interface_adapters::auth::AuthenticatedUser;
use crate::interface_adapters::handlers::{HandlerError, json_payload, map_studio_error};
use crate::interface_adapters::protocol::{MessageResponse, SessionDto};
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::participation::ParticipationUseCase;
use crate::use_cases::sessions::SessionCatalog;

fn catalog(state: &AppState) -> SessionCatalog<SystemClock> {
    SessionCatalog {
        clock: SystemClock,
        sessions: state.sessions.clone(),
        teachers: state.teachers.clone(),
    }
}

fn participation(state: &AppState) -> ParticipationUseCase<SystemClock> {
    ParticipationUseCase {
        clock: SystemClock,
        sessions: state.sessions.clone(),
        users: state.users.clone(),
    }
}

pub async fn list_sessions(
    _caller: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<SessionDto>>, HandlerError> {
    let sessions = catalog(&state).list().await.map_err(map_studio_error)?;

    Ok(Json(sessions.into_iter().map(SessionDto::from).collect()))
}

pub async fn find_session(
    _caller: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<SessionDto>, HandlerError> {
    let session = catalog(&state).find(id).await.map_err(map_studio_error)?;

    Ok(Json(session.into()))
}

#[tracing::instrument(skip_all, fields(user_id = caller.user_id))]
pub async fn create_session(
    AuthenticatedUser(caller): AuthenticatedUser,
    State(state): State<AppState>,
    payload: Result<Json<SessionDto>, JsonRejection>,
) -> Result<Json<SessionDto>, HandlerError> {
    let payload = json_payload(payload)?;
    let session = catalog(&state)
        .create(payload.into())
        .await
        .map_err(map_studio_error)?;

    tracing::info!(session_id = session.id, "session created");
    Ok(Json(session.into()))
}

#[tracing::instrument(skip_all, fields(user_id = caller.user_id, session_id = id))]
pub async fn update_session(
    AuthenticatedUser(caller): AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<u64>,
    payload: Result<Json<SessionDto>, JsonRejection>,
) -> Result<Json<SessionDto>, HandlerError> {
    let payload = json_payload(payload)?;
    let session = catalog(&state)
        .update(id, payload.into())
        .await
        .map_err(map_studio_error)?;

    tracing::info!("session updated");
    Ok(Json(session.into()))
}

#[tracing::instrument(skip_all, fields(user_id = caller.user_id, session_id = id))]
pub async fn delete_session(
    AuthenticatedUser(caller): AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, HandlerError> {
    catalog(&state).delete(id).await.map_err(map_studio_error)?;

    tracing::info!("session deleted");
    Ok(Json(MessageResponse::new("Session deleted")))
}

#[tracing::instrument(
    skip_all,
    fields(caller_id = caller.user_id, session_id = session_id, user_id = user_id)
)]
pub async fn participate(
    AuthenticatedUser(caller): AuthenticatedUser,
    State(state): State<AppState>,
    Path((session_id, user_id)): Path<(u64, u64)>,
) -> Result<Json<MessageResponse>, HandlerError> {
    participation(&state)
        .participate(session_id, user_id)
        .await
        .map_err(map_studio_error)?;

    Ok(Json(MessageResponse::new("Participation recorded")))
}

#[tracing::instrument(
    skip_all,
    fields(caller_id = caller.user_id, session_id = session_id, user_id = user_id)
)]
pub async fn leave_session(
    AuthenticatedUser(caller): AuthenticatedUser,
    State(state): State<AppState>,
    Path((session_id, user_id)): Path<(u64, u64)>,
) -> Result<Json<MessageResponse>, HandlerError> {
    participation(&state)
        .leave(session_id, user_id)
        .await
        .map_err(map_studio_error)?;

    Ok(Json(MessageResponse::new("Participation removed")))
}
