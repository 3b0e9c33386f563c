mod config;
mod cover_letter;
mod errors;
mod extraction;
mod jobs;
mod llm_client;
mod models;
mod resume;
mod routes;
mod session;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::{Config, RankerBackend};
use crate::jobs::ranking::{JobRanker, KeywordJobRanker, LlmJobRanker};
use crate::llm_client::LlmClient;
use crate::routes::build_router;
use crate::session::{MemorySessionStore, RedisSessionStore, SessionStore};
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<()> {
    // Load configuration first (fails on missing required env vars)
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!(
                "{}={},tower_http=info",
                env!("CARGO_CRATE_NAME"),
                &config.rust_log
            ))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting JobTrack API v{}", env!("CARGO_PKG_VERSION"));

    // Initialize LLM client
    let llm = LlmClient::new(config.openai_api_key.clone(), &config.openai_base_url)?;
    info!(
        "LLM client initialized (model: {}, key: {})",
        llm_client::MODEL,
        config.masked_api_key()
    );

    // Session store: Redis when configured, process memory otherwise
    let sessions: Arc<dyn SessionStore> = match &config.redis_url {
        Some(url) => {
            let client = redis::Client::open(url.as_str())?;
            Arc::new(RedisSessionStore::new(client, config.session_ttl_secs))
        }
        None => Arc::new(MemorySessionStore::new(config.session_ttl_secs)),
    };
    info!("Session store: {}", sessions.backend());

    let ranker: Arc<dyn JobRanker> = match config.ranker {
        RankerBackend::Llm => Arc::new(LlmJobRanker(llm.clone())),
        RankerBackend::Keyword => Arc::new(KeywordJobRanker),
    };
    info!("Job ranker: {}", ranker.backend());

    // Build app state
    let state = AppState {
        llm,
        config: config.clone(),
        sessions,
        ranker,
    };

    // Build router
    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive());

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
