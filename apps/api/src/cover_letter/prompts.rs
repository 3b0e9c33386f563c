// Cover letter prompt templates.

/// Replace `{applicant}`, `{skills}`, `{experience}`, `{title}`, `{company}`,
/// `{requirements}` and `{description}` before sending.
pub const COVER_LETTER_PROMPT: &str = r#"Write a professional, tailored cover letter for this job application:

Applicant: {applicant}
Skills: {skills}
Experience: {experience}

Job Title: {title}
Company: {company}
Requirements: {requirements}
Description: {description}

Write a compelling 3-paragraph cover letter that highlights relevant skills and experience. Make it professional but personable. Only mention skills and experience listed above."#;
