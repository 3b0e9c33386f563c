//! Job ranking — pluggable, trait-based rankers that score postings against a skill set.
//!
//! Default: `LlmJobRanker` (semantic, via the model).
//! Alternative: `KeywordJobRanker` (pure-Rust, deterministic, no model call).
//!
//! `AppState` holds an `Arc<dyn JobRanker>`, chosen at startup via `JOB_RANKER`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{info, warn};

use crate::errors::AppError;
use crate::jobs::prompts::JOB_RANK_PROMPT;
use crate::jobs::search::list_from_reply;
use crate::jobs::skills_phrase;
use crate::llm_client::prompts::{fill_template, JSON_ONLY_INSTRUCTION};
use crate::llm_client::{LlmClient, PRECISE_TEMPERATURE};
use crate::models::job::{JobPosting, FALLBACK_FIT_REASON, FALLBACK_FIT_SCORE};
use crate::models::lenient;

// ────────────────────────────────────────────────────────────────────────────
// Trait definition
// ────────────────────────────────────────────────────────────────────────────

/// The ranker trait. Ranking never fails: a backend that cannot score a
/// posting gives it the fallback fit instead.
///
/// Output invariants: every posting carries a score in 0–100 and a reason,
/// and postings are ordered best-first.
#[async_trait]
pub trait JobRanker: Send + Sync {
    async fn rank(&self, jobs: Vec<JobPosting>, skills: &[String]) -> Vec<JobPosting>;

    /// Backend label for logs.
    fn backend(&self) -> &'static str;
}

/// Every posting with the placeholder fit, in input order.
pub fn fallback_ranking(jobs: Vec<JobPosting>) -> Vec<JobPosting> {
    jobs.into_iter()
        .map(|job| job.unranked().with_fallback_fit())
        .collect()
}

/// Fills missing fit annotations and sorts best-first.
/// The sort is stable, so ties keep the order the ranker gave them.
fn finalize(mut jobs: Vec<JobPosting>) -> Vec<JobPosting> {
    for job in &mut jobs {
        if job.fit_score.is_none() {
            job.fit_score = Some(FALLBACK_FIT_SCORE);
            job.fit_reason = Some(FALLBACK_FIT_REASON.to_string());
        } else if job.fit_reason.is_none() {
            job.fit_reason = Some("No reason provided".to_string());
        }
    }
    jobs.sort_by(|a, b| b.fit_score.cmp(&a.fit_score));
    jobs
}

// ────────────────────────────────────────────────────────────────────────────
// LlmJobRanker — default implementation
// ────────────────────────────────────────────────────────────────────────────

/// Semantic ranker: the model scores and orders the postings.
///
/// Postings go out under their position in the input (`key`) rather than
/// their `id`, which comes from the model too and may be missing or repeated.
pub struct LlmJobRanker(pub LlmClient);

/// What the model sees of a posting.
#[derive(Debug, Serialize)]
struct RankCandidate<'a> {
    key: usize,
    title: &'a str,
    company: &'a str,
    location: &'a str,
    description: &'a str,
    requirements: &'a [String],
}

/// One scored entry of the model's reply.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
struct RankedEntry {
    #[serde(default, deserialize_with = "lenient::opt_index")]
    key: Option<usize>,
    #[serde(default, deserialize_with = "lenient::opt_fit_score")]
    fit_score: Option<u8>,
    #[serde(default, deserialize_with = "lenient::opt_string")]
    fit_reason: Option<String>,
}

impl LlmJobRanker {
    async fn request_ranking(
        &self,
        jobs: &[JobPosting],
        skills: &[String],
    ) -> Result<Vec<RankedEntry>, AppError> {
        let candidates: Vec<RankCandidate<'_>> = jobs
            .iter()
            .enumerate()
            .map(|(key, job)| RankCandidate {
                key,
                title: &job.title,
                company: &job.company,
                location: &job.location,
                description: &job.description,
                requirements: &job.requirements,
            })
            .collect();
        let jobs_json = serde_json::to_string(&candidates).map_err(anyhow::Error::from)?;
        let skills = skills_phrase(skills);
        let prompt = fill_template(
            JOB_RANK_PROMPT,
            &[
                ("skills", skills.as_str()),
                ("jobs_json", jobs_json.as_str()),
                ("json_only", JSON_ONLY_INSTRUCTION),
            ],
        );

        let reply: Value = self
            .0
            .complete_json(&prompt, PRECISE_TEMPERATURE)
            .await
            .map_err(|e| AppError::Llm(e.to_string()))?;

        Ok(list_from_reply(reply)?
            .into_iter()
            .filter(Value::is_object)
            .filter_map(|item| serde_json::from_value(item).ok())
            .collect())
    }
}

#[async_trait]
impl JobRanker for LlmJobRanker {
    async fn rank(&self, jobs: Vec<JobPosting>, skills: &[String]) -> Vec<JobPosting> {
        if jobs.is_empty() {
            return jobs;
        }

        match self.request_ranking(&jobs, skills).await {
            Ok(entries) if !entries.is_empty() => {
                info!("Ranked {} postings via LLM", entries.len());
                finalize(merge_ranked(jobs, entries))
            }
            Ok(_) => {
                warn!("LLM ranking returned no entries; using fallback fit");
                fallback_ranking(jobs)
            }
            Err(e) => {
                warn!("LLM ranking failed; using fallback fit: {e}");
                fallback_ranking(jobs)
            }
        }
    }

    fn backend(&self) -> &'static str {
        "llm"
    }
}

/// Applies the model's scores to the postings that were sent.
///
/// The result is always a permutation of `input`:
/// - entries are applied in reply order, each claiming the posting at `key`;
/// - unknown, missing and already-claimed keys are ignored;
/// - postings no entry claimed are appended with the fallback fit.
fn merge_ranked(input: Vec<JobPosting>, entries: Vec<RankedEntry>) -> Vec<JobPosting> {
    let mut slots: Vec<Option<JobPosting>> = input.into_iter().map(Some).collect();
    let mut ignored = 0usize;

    let mut merged: Vec<JobPosting> = Vec::with_capacity(slots.len());
    for entry in entries {
        let claimed = match entry.key {
            Some(key) => slots.get_mut(key).and_then(Option::take),
            None => None,
        };
        match claimed {
            Some(job) => merged.push(JobPosting {
                fit_score: entry.fit_score,
                fit_reason: entry.fit_reason,
                ..job
            }),
            None => ignored += 1,
        }
    }
    if ignored > 0 {
        warn!("Ignored {ignored} ranking entries with unknown or repeated keys");
    }

    let unscored: Vec<JobPosting> = slots
        .into_iter()
        .flatten()
        .map(|job| job.unranked().with_fallback_fit())
        .collect();
    if !unscored.is_empty() {
        warn!("LLM ranking omitted {} postings", unscored.len());
    }
    merged.extend(unscored);
    merged
}

// ────────────────────────────────────────────────────────────────────────────
// KeywordJobRanker — deterministic alternative
// ────────────────────────────────────────────────────────────────────────────

/// Pure-Rust keyword ranker. Fast, deterministic, no model call.
///
/// Algorithm, per posting requirement:
///    - requirement equals or mentions a skill → strength 1.0
///    - a skill mentions the requirement (e.g. "PostgreSQL" for "SQL") → 0.6
///    - otherwise → 0.0
/// fit_score = mean strength × 100, rounded.
/// Postings without requirements are matched against title and description.
pub struct KeywordJobRanker;

#[async_trait]
impl JobRanker for KeywordJobRanker {
    async fn rank(&self, jobs: Vec<JobPosting>, skills: &[String]) -> Vec<JobPosting> {
        let skills: Vec<String> = skills
            .iter()
            .map(|s| s.trim().to_lowercase())
            .filter(|s| !s.is_empty())
            .collect();

        let scored = jobs
            .into_iter()
            .map(|job| {
                let (score, reason) = keyword_fit(&job, &skills);
                JobPosting {
                    fit_score: Some(score),
                    fit_reason: Some(reason),
                    ..job
                }
            })
            .collect();
        finalize(scored)
    }

    fn backend(&self) -> &'static str {
        "keyword"
    }
}

fn requirement_strength(requirement: &str, skills: &[String]) -> f32 {
    let requirement = requirement.to_lowercase();
    skills
        .iter()
        .map(|skill| {
            // Single letters ("C", "R") would match inside almost any word.
            let mentions = skill.len() > 1 && requirement.contains(skill.as_str());
            if requirement == *skill || mentions {
                1.0
            } else if skill.contains(requirement.as_str()) {
                0.6
            } else {
                0.0
            }
        })
        .fold(0.0_f32, f32::max)
}

fn keyword_fit(job: &JobPosting, skills: &[String]) -> (u8, String) {
    if skills.is_empty() {
        return (FALLBACK_FIT_SCORE, "No skills provided to compare".to_string());
    }

    let requirements: Vec<&str> = job
        .requirements
        .iter()
        .map(|r| r.trim())
        .filter(|r| !r.is_empty())
        .collect();

    if requirements.is_empty() {
        let text = format!("{} {}", job.title, job.description).to_lowercase();
        let mentioned: Vec<&str> = skills
            .iter()
            .filter(|s| text.contains(s.as_str()))
            .map(String::as_str)
            .collect();
        let score = ((mentioned.len() as f32 / skills.len() as f32) * 100.0).round() as u8;
        let reason = if mentioned.is_empty() {
            "No listed requirements and none of your skills are mentioned".to_string()
        } else {
            format!("No listed requirements; mentions {}", mentioned.join(", "))
        };
        return (score.min(100), reason);
    }

    let strengths: Vec<f32> = requirements
        .iter()
        .map(|r| requirement_strength(r, skills))
        .collect();
    let total: f32 = strengths.iter().sum();
    let score = ((total / strengths.len() as f32) * 100.0).round() as u8;

    let matched = strengths.iter().filter(|s| **s >= 0.6).count();
    let missing: Vec<&str> = requirements
        .iter()
        .zip(&strengths)
        .filter(|(_, s)| **s < 0.6)
        .map(|(r, _)| *r)
        .take(3)
        .collect();

    let reason = if missing.is_empty() {
        format!("Covers all {} listed requirements", requirements.len())
    } else {
        format!(
            "Covers {matched} of {} requirements; missing {}",
            requirements.len(),
            missing.join(", ")
        )
    };
    (score.min(100), reason)
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
