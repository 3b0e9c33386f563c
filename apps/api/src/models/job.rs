use serde::{Deserialize, Serialize};

use crate::models::lenient;

/// Score given to every posting when fit could not be computed.
pub const FALLBACK_FIT_SCORE: u8 = 50;
pub const FALLBACK_FIT_REASON: &str = "Unable to calculate fit";

/// A generated job posting, optionally annotated with a fit score.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPosting {
    #[serde(default, deserialize_with = "lenient::string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub title: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub company: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub location: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub salary: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub description: String,
    #[serde(default, deserialize_with = "lenient::string_list")]
    pub requirements: Vec<String>,
    #[serde(default, deserialize_with = "lenient::string")]
    pub posted_date: String,
    #[serde(default, deserialize_with = "lenient::string")]
    pub url: String,
    #[serde(
        default,
        deserialize_with = "lenient::opt_fit_score",
        skip_serializing_if = "Option::is_none"
    )]
    pub fit_score: Option<u8>,
    #[serde(
        default,
        deserialize_with = "lenient::opt_string",
        skip_serializing_if = "Option::is_none"
    )]
    pub fit_reason: Option<String>,
}

impl JobPosting {
    /// Marks the posting with the placeholder fit used when ranking fails.
    pub fn with_fallback_fit(mut self) -> Self {
        self.fit_score = Some(FALLBACK_FIT_SCORE);
        self.fit_reason = Some(FALLBACK_FIT_REASON.to_string());
        self
    }

    /// The posting without any ranking annotations, as sent to a ranker.
    pub fn unranked(&self) -> Self {
        Self {
            fit_score: None,
            fit_reason: None,
            ..self.clone()
        }
    }
}
