//! Job search — asks the model for postings that match a query and skill set.

use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::jobs::prompts::JOB_SEARCH_PROMPT;
use crate::jobs::skills_phrase;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{LlmClient, CREATIVE_TEMPERATURE};
use crate::models::job::JobPosting;

/// Number of postings requested per search.
pub const JOB_COUNT: usize = 8;

/// Generates postings for `query`. The result is unranked.
pub async fn generate_jobs(
    query: &str,
    skills: &[String],
    llm: &LlmClient,
) -> Result<Vec<JobPosting>, AppError> {
    let count = JOB_COUNT.to_string();
    let skills = skills_phrase(skills);
    let prompt = fill_template(
        JOB_SEARCH_PROMPT,
        &[
            ("count", count.as_str()),
            ("skills", skills.as_str()),
            ("query", query),
            ("json_only", JSON_ONLY_INSTRUCTION),
        ],
    );

    let reply: Value = llm
        .complete_json(&prompt, CREATIVE_TEMPERATURE)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    let jobs = postings_from_reply(reply)?;
    info!("Generated {} job postings for query '{}'", jobs.len(), query);
    Ok(jobs)
}

/// Pulls the list out of a model reply.
///
/// Accepts a bare array, or an object wrapping the array under any key
/// (models sometimes answer `{"jobs": [...]}`).
pub(crate) fn list_from_reply(reply: Value) -> Result<Vec<Value>, AppError> {
    match reply {
        Value::Array(items) => Ok(items),
        Value::Object(map) => map
            .into_iter()
            .find_map(|(_, v)| match v {
                Value::Array(items) => Some(items),
                _ => None,
            })
            .ok_or_else(|| AppError::Llm("model reply contained no list".to_string())),
        _ => Err(AppError::Llm("model reply was not a list".to_string())),
    }
}

/// Decodes postings from a model reply. Entries that are not objects are dropped.
pub fn postings_from_reply(reply: Value) -> Result<Vec<JobPosting>, AppError> {
    let items = list_from_reply(reply)?;

    let total = items.len();
    let jobs: Vec<JobPosting> = items
        .into_iter()
        .filter(Value::is_object)
        .filter_map(|item| serde_json::from_value(item).ok())
        .collect();

    if jobs.len() < total {
        warn!("Dropped {} malformed job entries", total - jobs.len());
    }
    Ok(jobs)
}
