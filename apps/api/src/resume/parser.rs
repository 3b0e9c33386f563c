use tracing::info;

use crate::errors::AppError;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{LlmClient, PRECISE_TEMPERATURE};
use crate::models::resume::ExtractedResume;
use crate::resume::prompts::RESUME_EXTRACT_PROMPT;

/// Asks the model to structure raw resume text into profile fields.
pub async fn structure_resume(raw_text: &str, llm: &LlmClient) -> Result<ExtractedResume, AppError> {
    let prompt = fill_template(
        RESUME_EXTRACT_PROMPT,
        &[("json_only", JSON_ONLY_INSTRUCTION), ("resume_text", raw_text)],
    );

    let extracted: ExtractedResume = llm
        .complete_json(&prompt, PRECISE_TEMPERATURE)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    info!(
        "Resume structured: {} skills, {} experience entries, {} education entries",
        extracted.skills.len(),
        extracted.experience.len(),
        extracted.education.len()
    );
    Ok(extracted)
}
