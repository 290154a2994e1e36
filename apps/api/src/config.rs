use std::fmt;
use std::str::FromStr;

use anyhow::{Context, Result};

pub const DEFAULT_GROQ_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_GROQ_MODEL: &str = "llama3-8b-8192";
pub const DEFAULT_HF_INFERENCE_URL: &str =
    "https://api-inference.huggingface.co/pipeline/feature-extraction";
pub const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";

/// Application configuration loaded from environment variables.
/// Fails at startup if either provider credential is missing.
#[derive(Clone)]
pub struct Config {
    pub groq_api_key: String,
    pub groq_api_url: String,
    pub llm_model: String,
    pub huggingface_api_key: String,
    pub hf_inference_url: String,
    pub embedding_model: String,
    pub request_timeout_secs: u64,
    pub max_upload_bytes: usize,
    pub session_ttl_secs: u64,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            groq_api_key: require_env("GROQ_API_KEY")?,
            groq_api_url: env_or("GROQ_API_URL", DEFAULT_GROQ_API_URL),
            llm_model: env_or("GROQ_MODEL", DEFAULT_GROQ_MODEL),
            huggingface_api_key: require_env("HUGGINGFACE_API_KEY")?,
            hf_inference_url: env_or("HF_INFERENCE_URL", DEFAULT_HF_INFERENCE_URL),
            embedding_model: env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
            request_timeout_secs: parse_env("REQUEST_TIMEOUT_SECS", 120)?,
            max_upload_bytes: parse_env("MAX_UPLOAD_BYTES", 10 * 1024 * 1024)?,
            session_ttl_secs: parse_env("SESSION_TTL_SECS", 3600)?,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
    }
}

// Keys stay out of logs even when the whole config is printed.
impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("groq_api_key", &"<redacted>")
            .field("groq_api_url", &self.groq_api_url)
            .field("llm_model", &self.llm_model)
            .field("huggingface_api_key", &"<redacted>")
            .field("hf_inference_url", &self.hf_inference_url)
            .field("embedding_model", &self.embedding_model)
            .field("request_timeout_secs", &self.request_timeout_secs)
            .field("max_upload_bytes", &self.max_upload_bytes)
            .field("session_ttl_secs", &self.session_ttl_secs)
            .field("port", &self.port)
            .field("rust_log", &self.rust_log)
            .finish()
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

fn env_or(key: &str, default: &str) -> String {
    std::env::var(key).unwrap_or_else(|_| default.to_string())
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} must be a valid number, got '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
impl Config {
    /// Config pointing at unroutable endpoints; tests swap in mock providers.
    pub fn for_tests() -> Self {
        Config {
            groq_api_key: "test-groq-key".to_string(),
            groq_api_url: "http://127.0.0.1:9/chat".to_string(),
            llm_model: DEFAULT_GROQ_MODEL.to_string(),
            huggingface_api_key: "test-hf-key".to_string(),
            hf_inference_url: "http://127.0.0.1:9/embed".to_string(),
            embedding_model: DEFAULT_EMBEDDING_MODEL.to_string(),
            request_timeout_secs: 5,
            max_upload_bytes: 10 * 1024 * 1024,
            session_ttl_secs: 3600,
            port: 0,
            rust_log: "debug".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_debug_output_redacts_keys() {
        let config = Config::for_tests();
        let printed = format!("{config:?}");
        assert!(!printed.contains("test-groq-key"));
        assert!(!printed.contains("test-hf-key"));
        assert!(printed.contains("<redacted>"));
        assert!(printed.contains(DEFAULT_GROQ_MODEL));
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u64 = parse_env("INTERVIEW_API_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("INTERVIEW_API_TEST_BAD_NUMBER", "twelve");
        let result: Result<u16> = parse_env("INTERVIEW_API_TEST_BAD_NUMBER", 8080);
        let err = result.unwrap_err().to_string();
        assert!(err.contains("INTERVIEW_API_TEST_BAD_NUMBER"), "{err}");
    }

    #[test]
    fn test_require_env_names_missing_variable() {
        let err = require_env("INTERVIEW_API_TEST_MISSING_KEY")
            .unwrap_err()
            .to_string();
        assert!(err.contains("INTERVIEW_API_TEST_MISSING_KEY"));
    }
}
