//! Axum route handlers for the Generation API.

use axum::{
    extract::{Path, State},
    http::{header, HeaderValue},
    response::{IntoResponse, Response},
    Json,
};
use chrono::{DateTime, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::errors::AppError;
use crate::generation::download::{content_disposition, download_filename, DOWNLOAD_CONTENT_TYPE};
use crate::generation::generator::{generate_interview_questions, GeneratedQuestions};
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct GenerateResponse {
    pub session_id: Uuid,
    pub questions: GeneratedQuestions,
    pub questions_text: String,
    pub download_filename: String,
    pub download_url: String,
    pub generated_at: DateTime<Utc>,
}

/// POST /api/v1/sessions/:id/questions
///
/// Builds fresh indices over the session's texts and asks the LLM for
/// interview questions. Replaces any earlier result for the session.
pub async fn handle_generate_questions(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Json<GenerateResponse>, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let questions = generate_interview_questions(
        &session.candidate_name,
        &session.job_description,
        &session.resume_text,
        state.embedder.as_ref(),
        state.llm.as_ref(),
    )
    .await?;

    // The session may have expired or been deleted while the LLM was working.
    let session = state
        .sessions
        .store_questions(session_id, questions.clone())
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    Ok(Json(GenerateResponse {
        session_id,
        questions_text: questions.render(),
        questions,
        download_filename: download_filename(&session.candidate_name),
        download_url: format!("/api/v1/sessions/{session_id}/questions/download"),
        generated_at: session.generated_at.unwrap_or_else(Utc::now),
    }))
}

/// GET /api/v1/sessions/:id/questions/download
///
/// Returns the rendered questions as a UTF-8 `.md` attachment.
pub async fn handle_download_questions(
    State(state): State<AppState>,
    Path(session_id): Path<Uuid>,
) -> Result<Response, AppError> {
    let session = state
        .sessions
        .get(session_id)
        .await
        .ok_or_else(|| AppError::NotFound(format!("Session {session_id} not found")))?;

    let questions = session.questions.as_ref().ok_or_else(|| {
        AppError::NotFound(format!(
            "No interview questions generated yet for session {session_id}"
        ))
    })?;

    let disposition = HeaderValue::from_str(&content_disposition(&session.candidate_name))
        .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid Content-Disposition: {e}")))?;

    Ok((
        [
            (
                header::CONTENT_TYPE,
                HeaderValue::from_static(DOWNLOAD_CONTENT_TYPE),
            ),
            (header::CONTENT_DISPOSITION, disposition),
        ],
        questions.render(),
    )
        .into_response())
}
