//! Axum route handlers for the job search and ranking API.

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use serde::Deserialize;
use tracing::info;

use crate::errors::AppError;
use crate::jobs::search::generate_jobs;
use crate::models::job::JobPosting;
use crate::models::lenient;
use crate::resume::handlers::load_session_resume;
use crate::session::Session;
use crate::state::AppState;

// ────────────────────────────────────────────────────────────────────────────
// Request types
// ────────────────────────────────────────────────────────────────────────────

#[derive(Debug, Deserialize)]
pub struct SearchJobsRequest {
    #[serde(default)]
    pub query: Option<String>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
}

#[derive(Debug, Deserialize)]
pub struct RankJobsRequest {
    #[serde(default)]
    pub jobs: Vec<JobPosting>,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub skills: Vec<String>,
}

/// Turns axum's plain-text JSON rejection into the API's JSON error shape.
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> Result<T, AppError> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::Validation(rejection.body_text()))
}

/// Skills from the request, or the session resume's skills when none were sent.
async fn resolve_skills(
    state: &AppState,
    session: Session,
    requested: Vec<String>,
) -> Result<Vec<String>, AppError> {
    if !requested.is_empty() {
        return Ok(requested);
    }
    Ok(load_session_resume(state, session)
        .await?
        .map(|resume| resume.skills)
        .unwrap_or_default())
}

// ────────────────────────────────────────────────────────────────────────────
// Handlers
// ────────────────────────────────────────────────────────────────────────────

/// POST /search-jobs
///
/// Generates postings for the query and returns them ranked best-first.
pub async fn handle_search_jobs(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<SearchJobsRequest>, JsonRejection>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let request = json_body(payload)?;

    let query = request
        .query
        .as_deref()
        .map(str::trim)
        .filter(|q| !q.is_empty())
        .ok_or_else(|| AppError::Validation("Query is required".to_string()))?;

    let skills = resolve_skills(&state, session, request.skills).await?;
    info!("Searching jobs for '{}' with {} skills", query, skills.len());

    let jobs = generate_jobs(query, &skills, &state.llm).await?;
    let ranked = state.ranker.rank(jobs, &skills).await;

    Ok(Json(ranked))
}

/// POST /rank-jobs
///
/// Ranks caller-supplied postings. Never fails on model trouble: postings
/// come back with the fallback fit instead.
pub async fn handle_rank_jobs(
    State(state): State<AppState>,
    session: Session,
    payload: Result<Json<RankJobsRequest>, JsonRejection>,
) -> Result<Json<Vec<JobPosting>>, AppError> {
    let request = json_body(payload)?;
    if request.jobs.is_empty() {
        return Ok(Json(Vec::new()));
    }

    let skills = resolve_skills(&state, session, request.skills).await?;
    info!(
        "Ranking {} postings with the {} ranker",
        request.jobs.len(),
        state.ranker.backend()
    );

    Ok(Json(state.ranker.rank(request.jobs, &skills).await))
}
