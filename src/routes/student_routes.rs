use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use uuid::Uuid;
use validator::Validate;

use crate::dto::student_dto::RegisterStudentPayload;
use crate::error::{Error, Result};
use crate::models::student::Student;
use crate::AppState;

#[utoipa::path(
    post,
    path = "/api/students",
    request_body = RegisterStudentPayload,
    responses(
        (status = 201, description = "Student registered", body = Student),
        (status = 400, description = "Invalid payload")
    )
)]
#[axum::debug_handler]
pub async fn register_student(
    State(state): State<AppState>,
    Json(payload): Json<RegisterStudentPayload>,
) -> Result<impl IntoResponse> {
    payload.validate()?;
    let student = state
        .student_service
        .create(payload.name, payload.email)
        .await?;
    Ok((StatusCode::CREATED, Json(student)))
}

pub async fn get_student(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let student = state
        .student_service
        .get(id)
        .await?
        .ok_or_else(|| Error::NotFound("Student not found".to_string()))?;
    Ok(Json(student))
}
