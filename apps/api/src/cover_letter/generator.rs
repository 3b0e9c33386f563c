use tracing::info;

use crate::cover_letter::prompts::COVER_LETTER_PROMPT;
use crate::errors::AppError;
use crate::llm_client::prompts::fill_template;
use crate::llm_client::{LlmClient, CREATIVE_TEMPERATURE};
use crate::models::job::JobPosting;
use crate::models::resume::ResumeProfile;

fn or_unspecified(value: String) -> String {
    if value.trim().is_empty() {
        "Not specified".to_string()
    } else {
        value
    }
}

/// Builds the cover letter prompt for `resume` applying to `job`.
pub fn build_prompt(resume: &ResumeProfile, job: &JobPosting) -> String {
    let skills = or_unspecified(resume.skills.join(", "));
    let experience = or_unspecified(resume.experience.join("; "));
    let title = or_unspecified(job.title.clone());
    let company = or_unspecified(job.company.clone());
    let requirements = or_unspecified(job.requirements.join(", "));
    let description = or_unspecified(job.description.clone());

    fill_template(
        COVER_LETTER_PROMPT,
        &[
            ("applicant", resume.display_name()),
            ("skills", skills.as_str()),
            ("experience", experience.as_str()),
            ("title", title.as_str()),
            ("company", company.as_str()),
            ("requirements", requirements.as_str()),
            ("description", description.as_str()),
        ],
    )
}

/// Drafts a cover letter. The model's text is returned as-is, trimmed.
pub async fn write_cover_letter(
    resume: &ResumeProfile,
    job: &JobPosting,
    llm: &LlmClient,
) -> Result<String, AppError> {
    let prompt = build_prompt(resume, job);
    let letter = llm
        .complete(&prompt, CREATIVE_TEMPERATURE)
        .await
        .map_err(|e| AppError::Llm(e.to_string()))?;

    info!(
        "Drafted cover letter ({} chars) for '{}' at '{}'",
        letter.len(),
        job.title,
        job.company
    );
    Ok(letter.trim().to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::resume::ExtractedResume;
    use chrono::Utc;

    fn resume() -> ResumeProfile {
        ResumeProfile::from_extraction(
            ExtractedResume {
                name: Some("Ada Lovelace".into()),
                skills: vec!["Rust".into(), "SQL".into()],
                experience: vec!["Engineer at Acme".into(), "Analyst at Initech".into()],
                ..Default::default()
            },
            "raw".into(),
            Utc::now(),
        )
    }

    #[test]
    fn test_prompt_joins_skills_and_experience() {
        let job = JobPosting {
            title: "Backend Engineer".into(),
            company: "Globex".into(),
            requirements: vec!["Rust".into(), "Kafka".into()],
            description: "Build pipelines".into(),
            ..Default::default()
        };
        let prompt = build_prompt(&resume(), &job);
        assert!(prompt.contains("Applicant: Ada Lovelace"));
        assert!(prompt.contains("Skills: Rust, SQL"));
        assert!(prompt.contains("Experience: Engineer at Acme; Analyst at Initech"));
        assert!(prompt.contains("Requirements: Rust, Kafka"));
        assert!(prompt.contains("Company: Globex"));
    }

    #[test]
    fn test_prompt_marks_missing_fields() {
        let prompt = build_prompt(&resume(), &JobPosting::default());
        assert!(prompt.contains("Job Title: Not specified"));
        assert!(prompt.contains("Requirements: Not specified"));
    }
}
