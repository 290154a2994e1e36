//! Axum route handlers for the Session API.

use axum::{
    extract::{Multipart, Path, State},
    http::StatusCode,
    Json,
};
use bytes::Bytes;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::AppError;
use crate::extraction::extract_text_blocking;
use crate::session::SessionView;
use crate::state::AppState;

pub const MAX_CANDIDATE_NAME_CHARS: usize = 200;

const ACCEPTED_UPLOAD_TYPES: &[&str] = &["application/pdf", "application/octet-stream"];

/// An uploaded file part: raw bytes plus the content type the client declared.
#[derive(Debug)]
struct UploadedFile {
    bytes: Bytes,
    content_type: Option<String>,
}

#[derive(Debug, Default)]
struct UploadForm {
    job_description: Option<UploadedFile>,
    resume: Option<UploadedFile>,
    candidate_name: Option<String>,
}

/// POST /api/v1/sessions
///
/// Multipart fields: `job_description` (PDF), `resume` (PDF), `candidate_name`.
/// All three are required. Extracts both documents and opens a session.
pub async fn handle_create_session(
    State(state): State<AppState>,
    multipart: Multipart,
) -> Result<(StatusCode, Json<SessionView>), AppError> {
    let form = read_upload_form(multipart).await?;

    let candidate_name = validate_candidate_name(form.candidate_name.as_deref())?;
    let job_file = require_pdf("job_description", form.job_description)?;
    let resume_file = require_pdf("resume", form.resume)?;

    let job_description = extract_text_blocking(job_file.bytes).await?;
    let resume_text = extract_text_blocking(resume_file.bytes).await?;

    let session = state
        .sessions
        .create(candidate_name, job_description, resume_text)
        .await;
    info!(
        "Opened session {} (job description {} chars, resume {} chars)",
        session.id,
        session.job_description.chars().count(),
        session.resume_text.chars().count()
    );

    Ok((StatusCode::CREATED, Json(SessionView::from(&session))))
}

/// GET /api/v1/sessions/:id
pub async fn handle_get_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<Json<SessionView>, AppError> {
    let session = state
        .sessions
        .get(id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {id} not found")))?;
    Ok(Json(SessionView::from(&session)))
}

/// DELETE /api/v1/sessions/:id
pub async fn handle_delete_session(
    State(state): State<AppState>,
    Path(id): Path<Uuid>,
) -> Result<StatusCode, AppError> {
    if state.sessions.remove(id).await {
        Ok(StatusCode::NO_CONTENT)
    } else {
        Err(AppError::NotFound(format!("Session {id} not found")))
    }
}

async fn read_upload_form(mut multipart: Multipart) -> Result<UploadForm, AppError> {
    let mut form = UploadForm::default();

    while let Some(field) = multipart
        .next_field()
        .await
        .map_err(|e| AppError::Validation(format!("Malformed upload: {}", e.body_text())))?
    {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "job_description" | "resume" => {
                let content_type = field.content_type().map(str::to_string);
                let bytes = field.bytes().await.map_err(|e| {
                    AppError::Validation(format!("Could not read '{name}': {}", e.body_text()))
                })?;
                // Browsers send an empty part when no file was picked.
                let upload = (!bytes.is_empty()).then_some(UploadedFile {
                    bytes,
                    content_type,
                });
                if name == "job_description" {
                    form.job_description = upload;
                } else {
                    form.resume = upload;
                }
            }
            "candidate_name" => {
                let text = field.text().await.map_err(|e| {
                    AppError::Validation(format!(
                        "Could not read 'candidate_name': {}",
                        e.body_text()
                    ))
                })?;
                form.candidate_name = Some(text);
            }
            other => warn!("Ignoring unexpected upload field '{other}'"),
        }
    }

    Ok(form)
}

fn require_pdf(field: &str, upload: Option<UploadedFile>) -> Result<UploadedFile, AppError> {
    let upload =
        upload.ok_or_else(|| AppError::Validation(format!("'{field}' PDF is required")))?;

    if let Some(content_type) = upload.content_type.as_deref() {
        let essence = content_type
            .split(';')
            .next()
            .unwrap_or_default()
            .trim()
            .to_ascii_lowercase();
        if !ACCEPTED_UPLOAD_TYPES.contains(&essence.as_str()) {
            warn!("Rejected '{field}' upload with content type {content_type}");
            return Err(AppError::Validation(format!(
                "'{field}' must be a PDF (got {content_type})"
            )));
        }
    }

    Ok(upload)
}

fn validate_candidate_name(raw: Option<&str>) -> Result<String, AppError> {
    let name = raw.map(str::trim).unwrap_or_default();
    if name.is_empty() {
        return Err(AppError::Validation(
            "candidate_name cannot be empty".to_string(),
        ));
    }
    if name.chars().count() > MAX_CANDIDATE_NAME_CHARS {
        return Err(AppError::Validation(format!(
            "candidate_name must be at most {MAX_CANDIDATE_NAME_CHARS} characters"
        )));
    }
    Ok(name.to_string())
}
