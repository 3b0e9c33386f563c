// Cover letter drafting for a chosen posting, from the session's resume.

pub mod generator;
pub mod handlers;
pub mod prompts;
