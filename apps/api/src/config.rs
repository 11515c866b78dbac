use std::str::FromStr;

use anyhow::{Context, Result};

use crate::generation::ContentLimits;

const DEFAULT_MODEL: &str = "gpt2-medium";
const DEFAULT_CORS_ORIGINS: &str = "http://localhost:3000,http://localhost:8080";

/// Application configuration loaded from environment variables.
/// Every value has a default; startup fails only on values that do not parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub port: u16,
    pub rust_log: String,
    pub environment: String,
    pub generation_model: String,
    pub generation_api_url: String,
    pub generation_api_token: Option<String>,
    pub generation_timeout_secs: u64,
    pub cors_origins: Vec<String>,
    pub limits: ContentLimits,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let generation_model =
            std::env::var("GENERATION_MODEL").unwrap_or_else(|_| DEFAULT_MODEL.to_string());
        let generation_api_url = std::env::var("GENERATION_API_URL").unwrap_or_else(|_| {
            format!("https://api-inference.huggingface.co/models/{generation_model}")
        });
        let defaults = ContentLimits::default();
        let limits = ContentLimits {
            max_summary_words: parse_env("MAX_SUMMARY_WORDS", defaults.max_summary_words)?,
            max_skills: parse_env("MAX_SKILLS", defaults.max_skills)?,
        };
        anyhow::ensure!(
            limits.max_summary_words > 0 && limits.max_skills > 0,
            "MAX_SUMMARY_WORDS and MAX_SKILLS must be at least 1"
        );

        Ok(Config {
            port: parse_env("PORT", 8000)?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
            environment: std::env::var("ENVIRONMENT")
                .unwrap_or_else(|_| "development".to_string()),
            generation_model,
            generation_api_url,
            generation_api_token: std::env::var("GENERATION_API_TOKEN")
                .ok()
                .filter(|t| !t.trim().is_empty()),
            generation_timeout_secs: parse_env("GENERATION_TIMEOUT_SECS", 60)?,
            cors_origins: split_origins(
                &std::env::var("CORS_ORIGINS").unwrap_or_else(|_| DEFAULT_CORS_ORIGINS.to_string()),
            ),
            limits,
        })
    }
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
            .with_context(|| format!("Environment variable '{key}' has an invalid value: {raw}")),
        Err(_) => Ok(default),
    }
}

/// Splits a comma-separated origin list, dropping blanks.
fn split_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|o| !o.is_empty())
        .map(str::to_string)
        .collect()
}
