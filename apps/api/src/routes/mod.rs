pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::cover_letter::handlers::handle_generate_cover_letter;
use crate::jobs::handlers::{handle_rank_jobs, handle_search_jobs};
use crate::resume::handlers::{handle_clear_resume, handle_get_resume, handle_upload_resume};
use crate::state::AppState;

/// Headroom for multipart boundaries and part headers on top of the file itself.
/// The upload handler enforces `max_upload_bytes` on the file exactly.
const MULTIPART_OVERHEAD_BYTES: usize = 16 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state
        .config
        .max_upload_bytes
        .saturating_add(MULTIPART_OVERHEAD_BYTES);

    Router::new()
        .route("/health", get(health::health_handler))
        // Resume
        .route("/upload-resume", post(handle_upload_resume))
        .route("/resume", get(handle_get_resume).delete(handle_clear_resume))
        // Jobs
        .route("/search-jobs", post(handle_search_jobs))
        .route("/rank-jobs", post(handle_rank_jobs))
        // Cover letters
        .route("/generate-cover-letter", post(handle_generate_cover_letter))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}
