use crate::interface_adapters::handlers::auth::{login, register};
use crate::interface_adapters::handlers::sessions::{
    create_session, delete_session, find_session, leave_session, list_sessions, participate,
    update_session,
};
use crate::interface_adapters::handlers::teachers::{find_teacher, list_teachers};
use crate::interface_adapters::handlers::users::{delete_user, find_user};
use crate::interface_adapters::state::AppState;
use axum::{
    Router,
    routing::{get, post},
};

pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/session", get(list_sessions).post(create_session))
        .route(
            "/api/session/{id}",
            get(find_session).put(update_session).delete(delete_session),
        )
        .route(
            "/api/session/{id}/participate/{user_id}",
            post(participate).delete(leave_session),
        )
        .route("/api/teacher", get(list_teachers))
        .route("/api/teacher/{id}", get(find_teacher))
        .route("/api/user/{id}", get(find_user).delete(delete_user))
        .with_state(state)
}
