use std::sync::Arc;

use crate::config::Config;
use crate::jobs::ranking::JobRanker;
use crate::llm_client::LlmClient;
use crate::session::SessionStore;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    pub llm: LlmClient,
    pub config: Config,
    /// Where session resumes live. Memory by default, Redis when `REDIS_URL` is set.
    pub sessions: Arc<dyn SessionStore>,
    /// Pluggable job ranker. Default: LlmJobRanker. Swap via `JOB_RANKER`.
    pub ranker: Arc<dyn JobRanker>,
}
