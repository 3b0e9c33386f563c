//! Axum route handlers for resume upload and the session's current resume.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use bytes::Bytes;
use chrono::Utc;
use tracing::info;

use crate::errors::AppError;
use crate::extraction::{extract_text, secure_filename, DocumentKind};
use crate::models::resume::ResumeProfile;
use crate::resume::parser::structure_resume;
use crate::session::{Session, SessionId};
use crate::state::AppState;

/// Multipart field carrying the resume document.
const RESUME_FIELD: &str = "resume";

struct UploadedFile {
    filename: String,
    data: Bytes,
}

/// POST /upload-resume
///
/// Extracts the document's text, has the model structure it, stores the
/// profile in the caller's session (replacing any earlier one) and returns it.
pub async fn handle_upload_resume(
    State(state): State<AppState>,
    session: Session,
    mut multipart: Multipart,
) -> Result<impl IntoResponse, AppError> {
    let upload = read_upload(&mut multipart)
        .await?
        .ok_or_else(|| AppError::Validation("No file uploaded".to_string()))?;

    if upload.filename.is_empty() {
        return Err(AppError::Validation("No file selected".to_string()));
    }

    let kind = DocumentKind::from_filename(&upload.filename)
        .ok_or_else(|| AppError::UnsupportedFile("Invalid file type".to_string()))?;

    if upload.data.len() > state.config.max_upload_bytes {
        return Err(AppError::PayloadTooLarge);
    }

    info!(
        "Resume upload '{}' ({:?}, {} bytes) for session {}",
        secure_filename(&upload.filename),
        kind,
        upload.data.len(),
        session.id
    );

    let raw_text = extract_text(kind, upload.data).await?;
    if raw_text.trim().is_empty() {
        return Err(AppError::Validation(
            "No text could be extracted from the uploaded file".to_string(),
        ));
    }

    let extracted = structure_resume(&raw_text, &state.llm).await?;
    let profile = ResumeProfile::from_extraction(extracted, raw_text, Utc::now());

    state.sessions.store_resume(session.id, &profile).await?;

    let cookie = session
        .id
        .set_cookie_header(state.config.session_ttl_secs);
    Ok(([(header::SET_COOKIE, cookie)], Json(profile)))
}

/// GET /resume
///
/// Returns the resume held in the caller's session.
pub async fn handle_get_resume(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<ResumeProfile>, AppError> {
    load_session_resume(&state, session)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::NotFound("No resume in session".to_string()))
}

/// DELETE /resume
///
/// Forgets the session's resume and expires the cookie.
pub async fn handle_clear_resume(
    State(state): State<AppState>,
    session: Session,
) -> Result<impl IntoResponse, AppError> {
    if !session.is_new {
        state.sessions.clear(session.id).await?;
    }
    Ok((
        StatusCode::NO_CONTENT,
        [(header::SET_COOKIE, SessionId::expired_cookie_header())],
    ))
}

/// Looks up the caller's resume, skipping the store for fresh sessions.
pub async fn load_session_resume(
    state: &AppState,
    session: Session,
) -> Result<Option<ResumeProfile>, AppError> {
    if session.is_new {
        return Ok(None);
    }
    Ok(state.sessions.load_resume(session.id).await?)
}

/// Reads the `resume` field from the multipart body, skipping any others.
async fn read_upload(multipart: &mut Multipart) -> Result<Option<UploadedFile>, AppError> {
    while let Some(field) = multipart.next_field().await.map_err(multipart_error)? {
        if field.name() != Some(RESUME_FIELD) {
            continue;
        }
        let filename = field.file_name().unwrap_or_default().trim().to_string();
        let data = field.bytes().await.map_err(multipart_error)?;
        return Ok(Some(UploadedFile { filename, data }));
    }
    Ok(None)
}

fn multipart_error(err: MultipartError) -> AppError {
    if err.status() == StatusCode::PAYLOAD_TOO_LARGE {
        AppError::PayloadTooLarge
    } else {
        AppError::Validation(format!("Invalid upload: {}", err.body_text()))
    }
}
