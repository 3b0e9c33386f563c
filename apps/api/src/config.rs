use anyhow::{Context, Result};

const DEFAULT_OPENAI_BASE_URL: &str = "https://api.openai.com/v1";
const DEFAULT_SESSION_TTL_SECS: u64 = 86_400;
const DEFAULT_MAX_UPLOAD_BYTES: usize = 16 * 1024 * 1024;

/// Which backend ranks job postings by fit.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum RankerBackend {
    #[default]
    Llm,
    Keyword,
}

impl RankerBackend {
    fn parse(value: &str) -> Result<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "llm" => Ok(RankerBackend::Llm),
            "keyword" => Ok(RankerBackend::Keyword),
            other => anyhow::bail!("JOB_RANKER must be 'llm' or 'keyword', got '{other}'"),
        }
    }
}

/// Application configuration loaded from environment variables.
/// Startup fails if required variables are missing or malformed.
#[derive(Debug, Clone)]
pub struct Config {
    pub openai_api_key: String,
    pub openai_base_url: String,
    /// Unset means sessions live in process memory.
    pub redis_url: Option<String>,
    pub session_ttl_secs: u64,
    pub max_upload_bytes: usize,
    pub ranker: RankerBackend,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            openai_api_key: require_env("OPENAI_API_KEY")?,
            openai_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or_else(|_| DEFAULT_OPENAI_BASE_URL.to_string()),
            redis_url: optional_env("REDIS_URL"),
            session_ttl_secs: parse_env("SESSION_TTL_SECS", DEFAULT_SESSION_TTL_SECS)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
            ranker: match optional_env("JOB_RANKER") {
                Some(v) => RankerBackend::parse(&v)?,
                None => RankerBackend::default(),
            },
            port: parse_env("PORT", 5000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }

    /// The API key shortened for startup logs.
    pub fn masked_api_key(&self) -> String {
        let prefix: String = self.openai_api_key.chars().take(10).collect();
        format!("{prefix}...")
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.trim().is_empty())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match optional_env(key) {
        Some(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config_with_key(key: &str) -> Config {
        Config {
            openai_api_key: key.to_string(),
            openai_base_url: DEFAULT_OPENAI_BASE_URL.to_string(),
            redis_url: None,
            session_ttl_secs: DEFAULT_SESSION_TTL_SECS,
            max_upload_bytes: DEFAULT_MAX_UPLOAD_BYTES,
            ranker: RankerBackend::Llm,
            port: 5000,
            rust_log: "info".to_string(),
        }
    }

    #[test]
    fn test_ranker_backend_parses_case_insensitively() {
        assert_eq!(RankerBackend::parse("LLM").unwrap(), RankerBackend::Llm);
        assert_eq!(
            RankerBackend::parse(" keyword ").unwrap(),
            RankerBackend::Keyword
        );
    }

    #[test]
    fn test_ranker_backend_rejects_unknown() {
        assert!(RankerBackend::parse("random").is_err());
    }

    #[test]
    fn test_masked_api_key_keeps_ten_chars() {
        let config = config_with_key("sk-proj-abcdefghijklmnop");
        assert_eq!(config.masked_api_key(), "sk-proj-ab...");
    }

    #[test]
    fn test_masked_api_key_short_key() {
        let config = config_with_key("sk-1");
        assert_eq!(config.masked_api_key(), "sk-1...");
    }
}
