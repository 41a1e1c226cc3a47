use axum::{
    Json,
    extract::{Path, State},
};

use crate::interface_adapters::auth::AuthenticatedUser;
use crate::interface_adapters::handlers::{HandlerError, map_studio_error};
use crate::interface_adapters::protocol::{MessageResponse, UserDto};
use crate::interface_adapters::state::AppState;
use crate::use_cases::accounts::AccountUseCase;

fn accounts(state: &AppState) -> AccountUseCase {
    AccountUseCase {
        users: state.users.clone(),
        sessions: state.sessions.clone(),
        tokens: state.tokens.clone(),
    }
}

pub async fn find_user(
    _caller: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<UserDto>, HandlerError> {
    let user = accounts(&state).find(id).await.map_err(map_studio_error)?;

    Ok(Json(user.into()))
}

// Only the account owner may delete an account.
#[tracing::instrument(skip_all, fields(caller_id = caller.user_id, user_id = id))]
pub async fn delete_user(
    AuthenticatedUser(caller): AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<MessageResponse>, HandlerError> {
    accounts(&state)
        .delete(id, caller.user_id)
        .await
        .map_err(map_studio_error)?;

    Ok(Json(MessageResponse::new("Account deleted")))
}
