// Job search, fit ranking and their HTTP handlers.
// Generation and semantic ranking both go through llm_client.

pub mod handlers;
pub mod prompts;
pub mod ranking;
pub mod search;

/// Joins skills for prompt text, naming the gap when there are none.
pub(crate) fn skills_phrase(skills: &[String]) -> String {
    if skills.is_empty() {
        "(no skills provided)".to_string()
    } else {
        skills.join(", ")
    }
}
