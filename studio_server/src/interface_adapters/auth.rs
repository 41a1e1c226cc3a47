use axum::{
    Json,
    extract::FromRequestParts,
    http::{StatusCode, header::AUTHORIZATION, request::Parts},
    response::{IntoResponse, Response},
};

use crate::domain::errors::StudioError;
use crate::interface_adapters::handlers::map_studio_error;
use crate::interface_adapters::protocol::UnauthorizedResponse;
use crate::interface_adapters::state::{AppState, SystemClock};
use crate::use_cases::verify_token::{Identity, VerifyTokenUseCase};

const MISSING_CREDENTIALS: &str = "Full authentication is required to access this resource";

// Caller identity for protected routes, resolved from `Authorization: Bearer <token>`.
#[derive(Clone, Debug)]
pub struct AuthenticatedUser(pub Identity);

impl FromRequestParts<AppState> for AuthenticatedUser {
    type Rejection = Response;

    async fn from_request_parts(parts: &mut Parts, state: &AppState) -> Result<Self, Self::Rejection> {
        let path = parts.uri.path().to_string();
        let Some(token) = bearer_token(parts) else {
            return Err(unauthorized(MISSING_CREDENTIALS, path));
        };

        let use_case = VerifyTokenUseCase {
            clock: SystemClock,
            tokens: state.tokens.clone(),
        };

        match use_case.execute(token).await {
            Ok(identity) => Ok(Self(identity)),
            Err(err @ (StudioError::InvalidToken | StudioError::TokenExpired)) => {
                tracing::debug!(%path, error = %err, "rejected bearer token");
                Err(unauthorized(&err.to_string(), path))
            }
            Err(err) => Err(map_studio_error(err).into_response()),
        }
    }
}

fn bearer_token(parts: &Parts) -> Option<&str> {
    parts
        .headers
        .get(AUTHORIZATION)?
        .to_str()
        .ok()?
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

fn unauthorized(message: &str, path: String) -> Response {
    let status = StatusCode::UNAUTHORIZED;
    (
        status,
        Json(UnauthorizedResponse {
            status: status.as_u16(),
            error: "Unauthorized".to_string(),
            message: message.to_string(),
            path,
        }),
    )
        .into_response()
}
