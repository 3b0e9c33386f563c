// Resume extraction prompt templates.

/// Resume structuring prompt. Replace `{json_only}` and `{resume_text}` before sending.
pub const RESUME_EXTRACT_PROMPT: &str = r#"Extract key information from this resume and return a JSON object with exactly this structure:
{
  "name": "full name",
  "email": "email address",
  "phone": "phone number",
  "skills": ["skill1", "skill2"],
  "experience": ["job title at company"],
  "education": ["degree from school"],
  "summary": "brief professional summary"
}

Use null for any scalar field that the resume does not state. Use an empty list when a section is missing.
{json_only}

Resume text:
{resume_text}"#;
