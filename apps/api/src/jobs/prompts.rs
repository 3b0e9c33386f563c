// Job search and ranking prompt templates.

/// Job generation prompt. Replace `{count}`, `{skills}`, `{query}` and `{json_only}`.
pub const JOB_SEARCH_PROMPT: &str = r#"Generate {count} realistic job listings for someone with these skills: {skills}
Search query: {query}

Return a JSON array with exactly this structure:
[{
  "id": "unique-id",
  "title": "Job Title",
  "company": "Company Name",
  "location": "City, State/Remote",
  "salary": "$XX,000 - $XX,000",
  "description": "Job description...",
  "requirements": ["req1", "req2"],
  "postedDate": "YYYY-MM-DD",
  "url": "https://example.com/job"
}]

Every listing must have a distinct "id".
{json_only}"#;

/// Fit ranking prompt. Replace `{skills}`, `{jobs_json}` and `{json_only}`.
/// Each job in `{jobs_json}` carries a numeric `key` the reply refers back to.
pub const JOB_RANK_PROMPT: &str = r#"Rank these jobs by fit for someone with skills: {skills}

Jobs: {jobs_json}

Return a JSON array with one entry per job above, sorted by fit (best first). Refer to each job only by its "key", copied exactly, and give a "fitScore" (integer 0-100) and a one-sentence "fitReason":
[{
  "key": 0,
  "fitScore": 85,
  "fitReason": "Strong match because..."
}]
{json_only}"#;
