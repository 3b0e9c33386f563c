//! Axum route handler for cover letter generation.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::cover_letter::generator::write_cover_letter;
use crate::errors::AppError;
use crate::jobs::handlers::json_body;
use crate::models::job::JobPosting;
use crate::resume::handlers::load_session_resume;
use crate::session::Session;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CoverLetterRequest {
    #[serde(default)]
    pub job: Option<JobPosting>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CoverLetterResponse {
    pub cover_letter: String,
}

/// POST /generate-cover-letter
///
/// Requires a resume in the caller's session.
pub async fn handle_generate_cover_letter(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<CoverLetterRequest>, JsonRejection>,
) -> Result<Json<CoverLetterResponse>, AppError> {
    let resume = load_session_resume(&state, session)
        .await?
        .ok_or_else(|| AppError::Validation("Resume not found".to_string()))?;

    let job = json_body(payload)?
        .job
        .ok_or_else(|| AppError::Validation("Job is required".to_string()))?;

    let cover_letter = write_cover_letter(&resume, &job, &state.llm).await?;
    Ok(Json(CoverLetterResponse { cover_letter }))
}
