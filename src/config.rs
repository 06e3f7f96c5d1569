use std::str::FromStr;
use std::time::Duration;

use crate::error::ConfigError;

const DEFAULT_MODEL: &str = "gemini-2.5-flash";
const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";
const DEFAULT_TIMEOUT_SECS: u64 = 120;
const DEFAULT_INITIAL_QUIZ_SIZE: usize = 30;
const DEFAULT_BATCH_SIZE: usize = 10;
// getFile refuses anything bigger
const DEFAULT_MAX_UPLOAD_BYTES: u64 = 20 * 1024 * 1024;

#[derive(Debug, Clone)]
pub struct Config {
    pub gemini_api_key: String,
    pub gemini_model: String,
    pub gemini_base_url: String,
    pub request_timeout: Duration,
    pub initial_quiz_size: usize,
    pub batch_size: usize,
    pub max_upload_bytes: u64,
}

impl Config {
    /// Reads the process environment; `main` loads `.env` into it first.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let gemini_api_key = lookup("GEMINI_API_KEY")
            .filter(|key| !key.trim().is_empty())
            .ok_or(ConfigError::Missing("GEMINI_API_KEY"))?;

        let gemini_base_url = lookup("GEMINI_BASE_URL")
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
            .trim_end_matches('/')
            .to_string();

        let timeout_secs: u64 = parse_var(&lookup, "GEMINI_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)?;
        let initial_quiz_size: usize =
            parse_var(&lookup, "QUIZ_INITIAL_SIZE", DEFAULT_INITIAL_QUIZ_SIZE)?;
        let batch_size: usize = parse_var(&lookup, "QUIZ_BATCH_SIZE", DEFAULT_BATCH_SIZE)?;

        if initial_quiz_size == 0 {
            return Err(ConfigError::Invalid {
                name: "QUIZ_INITIAL_SIZE",
                value: "0".to_string(),
            });
        }
        if batch_size == 0 {
            return Err(ConfigError::Invalid {
                name: "QUIZ_BATCH_SIZE",
                value: "0".to_string(),
            });
        }

        Ok(Self {
            gemini_api_key,
            gemini_model: lookup("GEMINI_MODEL").unwrap_or_else(|| DEFAULT_MODEL.to_string()),
            gemini_base_url,
            request_timeout: Duration::from_secs(timeout_secs),
            initial_quiz_size,
            batch_size,
            max_upload_bytes: parse_var(&lookup, "MAX_UPLOAD_BYTES", DEFAULT_MAX_UPLOAD_BYTES)?,
        })
    }
}

fn parse_var<F, T>(lookup: &F, name: &'static str, default: T) -> Result<T, ConfigError>
where
    F: Fn(&str) -> Option<String>,
    T: FromStr,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => {
            let parsed = value.trim().parse();
            parsed.map_err(|_| ConfigError::Invalid { name, value })
        }
    }
}
