use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use std::path::PathBuf;
use tokio::fs;
use uuid::Uuid;

use crate::config::get_config;
use crate::dto::resume_dto::AnalyzeResumeResponse;
use crate::error::{Error, Result};
use crate::services::extractor_service::ResumeFileType;
use crate::AppState;

async fn save_resume_file(file_type: ResumeFileType, data: &Bytes) -> Result<(PathBuf, String)> {
    let dir = std::path::Path::new(&get_config().uploads_dir).join("resumes");
    fs::create_dir_all(&dir)
        .await
        .map_err(|e| Error::Internal(format!("Failed to create uploads directory: {}", e)))?;

    let stored_name = format!("{}.{}", Uuid::new_v4(), file_type.extension());
    let stored_path = dir.join(&stored_name);
    fs::write(&stored_path, data).await.map_err(|e| {
        tracing::error!("Failed to write resume file: {}", e);
        Error::Internal(format!("Failed to save file: {}", e))
    })?;

    Ok((stored_path, format!("/uploads/resumes/{}", stored_name)))
}

/// Upload-and-analyze entry point. The declared media type is validated
/// before any disk or database work, so a rejected upload leaves nothing
/// behind.
#[utoipa::path(
    post,
    path = "/api/students/{id}/resume",
    params(
        ("id" = Uuid, Path, description = "Student identifier")
    ),
    responses(
        (status = 201, description = "Resume analyzed and stored"),
        (status = 404, description = "Student not found"),
        (status = 415, description = "Declared media type is not PDF or DOCX"),
        (status = 422, description = "The file could not be parsed")
    )
)]
pub async fn analyze_resume(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
    mut multipart: Multipart,
) -> Result<impl IntoResponse> {
    let mut upload: Option<(String, Option<String>, Bytes)> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        tracing::error!("Failed to get next field: {}", e);
        Error::BadRequest(e.to_string())
    })? {
        if field.name() == Some("resume") {
            let file_name = field.file_name().unwrap_or("resume.bin").to_string();
            let content_type = field.content_type().map(|ct| ct.to_string());
            let data = field.bytes().await.map_err(|e| {
                tracing::error!("Failed to read resume bytes: {}", e);
                Error::BadRequest("Failed to read file upload".to_string())
            })?;
            if !data.is_empty() {
                upload = Some((file_name, content_type, data));
            }
        }
    }

    let (file_name, content_type, data) =
        upload.ok_or_else(|| Error::BadRequest("A resume file is required".to_string()))?;
    let file_type = ResumeFileType::from_upload(content_type.as_deref(), &file_name)?;

    state
        .student_service
        .get(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("Student not found".to_string()))?;

    let (stored_path, resume_url) = save_resume_file(file_type, &data).await?;
    let outcome = state
        .analysis_service
        .analyze_upload(user_id, &stored_path, &resume_url, &file_name, file_type)
        .await?;

    let warning = (!outcome.profile_synced).then(|| {
        "The analysis was saved but the student profile could not be updated".to_string()
    });

    Ok((
        StatusCode::CREATED,
        Json(AnalyzeResumeResponse {
            analysis: outcome.analysis,
            profile_synced: outcome.profile_synced,
            warning,
        }),
    ))
}

pub async fn latest_analysis(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let analysis = state
        .analysis_service
        .latest_for_user(user_id)
        .await?
        .ok_or_else(|| Error::NotFound("No resume analysis found for this student".to_string()))?;
    Ok(Json(analysis))
}

pub async fn analysis_history(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse> {
    let analyses = state.analysis_service.list_for_user(user_id).await?;
    Ok(Json(analyses))
}
