//! Embedding Provider: maps text to fixed-length vectors and scores vector sets pairwise.
//!
//! Default: `HashEmbedder` (offline, deterministic feature hashing).
//! Hosted: `ApiEmbedder` (sentence-transformer style HTTP endpoint).
//!
//! One provider is built at startup and shared as `Arc<dyn Embedder>`; nothing in the
//! matching code holds a global model handle.

use std::sync::Arc;

use async_trait::async_trait;
use thiserror::Error;
use tracing::{info, warn};

use crate::config::{EmbeddingBackend, EmbeddingConfig};

pub mod api;
pub mod hash;

#[cfg(test)]
pub(crate) mod testing;

pub use api::ApiEmbedder;
pub use hash::HashEmbedder;

/// A single embedding vector.
pub type Vector = Vec<f32>;

#[derive(Debug, Error)]
pub enum EmbeddingError {
    #[error("Embedding model unavailable: {0}")]
    Unavailable(String),

    #[error("Input {index} has {tokens} tokens, model limit is {limit}")]
    InputTooLong {
        index: usize,
        tokens: usize,
        limit: usize,
    },

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Malformed embedding response: {0}")]
    Parse(String),

    #[error("Expected {expected} embeddings, got {actual}")]
    CountMismatch { expected: usize, actual: usize },
}

/// The embedding provider trait. Implement this to swap models without touching
/// the matchers or the orchestrator.
#[async_trait]
pub trait Embedder: Send + Sync {
    /// Backend label ("hash", "api") for logs and `/health`.
    fn name(&self) -> &'static str;

    /// Per-input token limit. Inputs above it are rejected, never truncated.
    fn max_input_tokens(&self) -> usize;

    /// Encodes every text into one vector, preserving order.
    async fn encode(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingError>;

    /// `|a| x |b|` cosine similarity matrix.
    fn similarity(&self, a: &[Vector], b: &[Vector]) -> Vec<Vec<f32>> {
        similarity_matrix(a, b)
    }
}

/// Builds the provider selected by `EMBEDDING_BACKEND`.
pub fn build_embedder(config: &EmbeddingConfig) -> Result<Arc<dyn Embedder>, EmbeddingError> {
    let embedder: Arc<dyn Embedder> = match config.backend {
        EmbeddingBackend::Hash => Arc::new(HashEmbedder::new(config.dimension, config.max_tokens)),
        EmbeddingBackend::Api => Arc::new(ApiEmbedder::new(config)?),
    };
    info!(
        "Embedding provider initialized (backend: {}, model: {})",
        embedder.name(),
        config.model
    );
    Ok(embedder)
}

/// Cosine similarity in [-1.0, 1.0].
/// Zero vectors and dimension mismatches score 0.0.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        warn!(
            a_len = a.len(),
            b_len = b.len(),
            "embedding dimension mismatch; returning zero similarity"
        );
        return 0.0;
    }

    let dot: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    (dot / (norm_a * norm_b)).clamp(-1.0, 1.0)
}

/// Row `i`, column `j` holds `cosine_similarity(a[i], b[j])`.
pub fn similarity_matrix(a: &[Vector], b: &[Vector]) -> Vec<Vec<f32>> {
    a.iter()
        .map(|row| b.iter().map(|col| cosine_similarity(row, col)).collect())
        .collect()
}

/// Whitespace token count. Close enough to word-piece counts for limit checks
/// on short resume fields.
pub fn count_tokens(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Rejects the batch if any input exceeds `limit` tokens.
pub fn check_token_limit(texts: &[String], limit: usize) -> Result<(), EmbeddingError> {
    for (index, text) in texts.iter().enumerate() {
        let tokens = count_tokens(text);
        if tokens > limit {
            return Err(EmbeddingError::InputTooLong {
                index,
                tokens,
                limit,
            });
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_identical_vectors_is_one() {
        let sim = cosine_similarity(&[1.0, 2.0, 3.0], &[1.0, 2.0, 3.0]);
        assert!((sim - 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_opposite_vectors_is_minus_one() {
        let sim = cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]);
        assert!((sim + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_orthogonal_vectors_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_zero_vector_is_zero() {
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 1.0]), 0.0);
    }

    #[test]
    fn test_cosine_dimension_mismatch_is_zero() {
        assert_eq!(cosine_similarity(&[1.0, 0.0, 0.0], &[1.0, 0.0]), 0.0);
    }

    #[test]
    fn test_similarity_matrix_shape_and_bounds() {
        let a = vec![vec![1.0, 0.0], vec![0.5, 0.5], vec![-1.0, 0.2]];
        let b = vec![vec![0.0, 1.0], vec![1.0, 1.0]];
        let matrix = similarity_matrix(&a, &b);

        assert_eq!(matrix.len(), 3);
        assert!(matrix.iter().all(|row| row.len() == 2));
        assert!(matrix
            .iter()
            .flatten()
            .all(|v| (-1.0..=1.0).contains(v)));
    }

    #[test]
    fn test_token_limit_reports_offending_index() {
        let texts = vec!["short".to_string(), "one two three four".to_string()];
        match check_token_limit(&texts, 3) {
            Err(EmbeddingError::InputTooLong {
                index,
                tokens,
                limit,
            }) => {
                assert_eq!(index, 1);
                assert_eq!(tokens, 4);
                assert_eq!(limit, 3);
            }
            other => panic!("Expected InputTooLong, got {other:?}"),
        }
    }

    #[test]
    fn test_token_limit_accepts_inputs_at_limit() {
        let texts = vec!["one two three".to_string()];
        assert!(check_token_limit(&texts, 3).is_ok());
    }
}
