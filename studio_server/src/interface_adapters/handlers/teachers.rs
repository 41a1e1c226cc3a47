use axum::{
    Json,
    extract::{Path, State},
};

use crate::interface_adapters::auth::AuthenticatedUser;
use crate::interface_adapters::handlers::{HandlerError, map_studio_error};
use crate::interface_adapters::protocol::TeacherDto;
use crate::interface_adapters::state::AppState;
use crate::use_cases::teachers::TeacherDirectory;

pub async fn list_teachers(
    _caller: AuthenticatedUser,
    State(state): State<AppState>,
) -> Result<Json<Vec<TeacherDto>>, HandlerError> {
    let directory = TeacherDirectory {
        teachers: state.teachers.clone(),
    };
    let teachers = directory.list().await.map_err(map_studio_error)?;

    Ok(Json(teachers.into_iter().map(TeacherDto::from).collect()))
}

pub async fn find_teacher(
    _caller: AuthenticatedUser,
    State(state): State<AppState>,
    Path(id): Path<u64>,
) -> Result<Json<TeacherDto>, HandlerError> {
    let directory = TeacherDirectory {
        teachers: state.teachers.clone(),
    };
    let teacher = directory.find(id).await.map_err(map_studio_error)?;

    Ok(Json(teacher.into()))
}
