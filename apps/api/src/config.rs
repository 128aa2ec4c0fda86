use std::path::PathBuf;

use anyhow::{Context, Result};

pub const DEFAULT_COMPLETION_API_URL: &str = "https://api.groq.com/openai/v1/chat/completions";
pub const DEFAULT_COMPLETION_MODEL: &str = "llama3-8b-8192";

/// Application configuration loaded from environment variables.
/// Fails at startup if the completion API key is missing.
#[derive(Debug, Clone)]
pub struct Config {
    pub completion_api_key: String,
    pub completion_api_url: String,
    pub completion_model: String,
    pub completion_max_tokens: u32,
    pub completion_temperature: f32,
    pub completion_timeout_secs: u64,
    pub upload_dir: PathBuf,
    /// Request body cap for the upload routes.
    pub max_upload_bytes: usize,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        Ok(Config {
            completion_api_key: api_key_from_env()?,
            completion_api_url: std::env::var("COMPLETION_API_URL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_API_URL.to_string()),
            completion_model: std::env::var("COMPLETION_MODEL")
                .unwrap_or_else(|_| DEFAULT_COMPLETION_MODEL.to_string()),
            completion_max_tokens: parse_env("COMPLETION_MAX_TOKENS", 1000)?,
            completion_temperature: parse_env("COMPLETION_TEMPERATURE", 0.7)?,
            completion_timeout_secs: parse_env("COMPLETION_TIMEOUT_SECS", 120)?,
            upload_dir: std::env::var("UPLOAD_DIR")
                .map(PathBuf::from)
                .unwrap_or_else(|_| PathBuf::from("uploads")),
            max_upload_bytes: parse_env::<usize>("MAX_UPLOAD_MB", 16)? * 1024 * 1024,
            port: parse_env("PORT", 8080)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

/// Completion API key. Older deployments export it as `Groq_API_KEY`.
fn api_key_from_env() -> Result<String> {
    std::env::var("GROQ_API_KEY")
        .or_else(|_| std::env::var("Groq_API_KEY"))
        .context(
            "Required environment variable 'GROQ_API_KEY' (or legacy 'Groq_API_KEY') is not set",
        )
}

fn parse_env<T>(key: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .with_context(|| format!("{key} has an invalid value: '{raw}'")),
        Err(_) => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u32 = parse_env("SCREENER_TEST_UNSET_VARIABLE", 42).unwrap();
        assert_eq!(value, 42);
    }

    #[test]
    fn test_parse_env_reads_and_trims_value() {
        std::env::set_var("SCREENER_TEST_TEMPERATURE", " 0.25 ");
        let value: f32 = parse_env("SCREENER_TEST_TEMPERATURE", 0.7).unwrap();
        assert!((value - 0.25).abs() < f32::EPSILON);
    }

    #[test]
    fn test_parse_env_rejects_garbage() {
        std::env::set_var("SCREENER_TEST_PORT", "not-a-port");
        let result: Result<u16> = parse_env("SCREENER_TEST_PORT", 8080);
        let message = result.unwrap_err().to_string();
        assert!(message.contains("SCREENER_TEST_PORT"));
    }

    #[test]
    fn test_missing_api_key_names_both_variables() {
        if std::env::var("GROQ_API_KEY").is_ok() || std::env::var("Groq_API_KEY").is_ok() {
            return;
        }
        let message = api_key_from_env().unwrap_err().to_string();
        assert!(message.contains("'GROQ_API_KEY'"));
        assert!(message.contains("'Groq_API_KEY'"));
    }
}
