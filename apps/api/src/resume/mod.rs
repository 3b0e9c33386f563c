// Resume upload: text extraction, model structuring and session storage.

pub mod handlers;
pub mod parser;
pub mod prompts;
