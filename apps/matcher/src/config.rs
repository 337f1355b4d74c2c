use std::str::FromStr;

use anyhow::{bail, Context, Result};

use crate::matching::aggregate::ScoreWeights;

const DEFAULT_DATA_API_URL: &str = "https://iit-api-1.onrender.com";
const DEFAULT_EMBEDDING_MODEL: &str = "sentence-transformers/all-MiniLM-L6-v2";
const DEFAULT_EMBEDDING_API_URL: &str = "https://api-inference.huggingface.co/pipeline/feature-extraction/sentence-transformers/all-MiniLM-L6-v2";

/// Which `Embedder` implementation to build at startup.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EmbeddingBackend {
    Hash,
    Api,
}

impl FromStr for EmbeddingBackend {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "hash" => Ok(EmbeddingBackend::Hash),
            "api" => Ok(EmbeddingBackend::Api),
            other => bail!("unknown embedding backend '{other}' (expected 'hash' or 'api')"),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EmbeddingConfig {
    pub backend: EmbeddingBackend,
    pub api_url: String,
    pub api_key: Option<String>,
    /// "huggingface" | "openai" | "custom"
    pub provider: String,
    pub model: String,
    /// Hash backend only; hosted models fix their own dimension.
    pub dimension: usize,
    pub max_tokens: usize,
}

/// Application configuration loaded from environment variables.
/// Startup fails if a required variable is missing or a number doesn't parse.
#[derive(Debug, Clone)]
pub struct Config {
    pub data_api_url: String,
    pub data_api_token: String,
    pub embedding: EmbeddingConfig,
    /// Weights for the configurable Aggregator (`/api/aggregate-score`).
    pub score_weights: ScoreWeights,
    pub port: u16,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let score_weights = ScoreWeights {
            skills: parse_env("SCORE_WEIGHT_SKILLS", 0.5)?,
            experience: parse_env("SCORE_WEIGHT_EXPERIENCE", 0.3)?,
            education: parse_env("SCORE_WEIGHT_EDUCATION", 0.2)?,
        };
        score_weights
            .validate()
            .context("SCORE_WEIGHT_* variables are invalid")?;

        Ok(Config {
            data_api_url: env_or("DATA_API_URL", DEFAULT_DATA_API_URL),
            data_api_token: require_env("DATA_API_TOKEN")?,
            embedding: EmbeddingConfig {
                backend: parse_env("EMBEDDING_BACKEND", EmbeddingBackend::Hash)?,
                api_url: env_or("EMBEDDING_API_URL", DEFAULT_EMBEDDING_API_URL),
                api_key: std::env::var("EMBEDDING_API_KEY").ok(),
                provider: env_or("EMBEDDING_PROVIDER", "huggingface"),
                model: env_or("EMBEDDING_MODEL", DEFAULT_EMBEDDING_MODEL),
                dimension: parse_env("EMBEDDING_DIMENSION", 384)?,
                max_tokens: parse_env("EMBEDDING_MAX_TOKENS", 256)?,
            },
            score_weights,
            port: parse_env("PORT", 8080)?,
            rust_log: env_or("RUST_LOG", "info"),
        })
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
    T::Err: std::fmt::Display,
{
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map_err(|e| anyhow::anyhow!("{key} has invalid value '{raw}': {e}")),
        Err(_) => Ok(default),
    }
}

/// Config with offline defaults for unit tests.
#[cfg(test)]
pub(crate) fn test_config() -> Config {
    Config {
        data_api_url: "http://127.0.0.1:9".to_string(),
        data_api_token: "test-token".to_string(),
        embedding: EmbeddingConfig {
            backend: EmbeddingBackend::Hash,
            api_url: "http://127.0.0.1:9/embed".to_string(),
            api_key: None,
            provider: "custom".to_string(),
            model: DEFAULT_EMBEDDING_MODEL.to_string(),
            dimension: 64,
            max_tokens: 256,
        },
        score_weights: ScoreWeights::default(),
        port: 0,
        rust_log: "debug".to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!(
            "hash".parse::<EmbeddingBackend>().unwrap(),
            EmbeddingBackend::Hash
        );
        assert_eq!(
            " API ".parse::<EmbeddingBackend>().unwrap(),
            EmbeddingBackend::Api
        );
        assert!("onnx".parse::<EmbeddingBackend>().is_err());
    }

    #[test]
    fn test_parse_env_uses_default_when_unset() {
        let value: u16 = parse_env("MATCHER_TEST_SURELY_UNSET_VAR", 4242).unwrap();
        assert_eq!(value, 4242);
    }
}
