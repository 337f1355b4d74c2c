// Matching engine: four field matchers, the weighted aggregator and the
// candidate x job orchestrator. All similarity goes through `embedding::Embedder`.

use thiserror::Error;

use crate::data_source::DataSourceError;
use crate::embedding::EmbeddingError;

pub mod aggregate;
pub mod education;
pub mod engine;
pub mod experience;
pub mod handlers;
pub mod projects;
pub mod skills;

pub use engine::MatchEngine;

#[derive(Debug, Error)]
pub enum MatchError {
    #[error("Invalid experience requirement format: {0}")]
    InvalidRequirementFormat(String),

    #[error("Malformed {field} JSON: {reason}")]
    MalformedRequirementJson { field: &'static str, reason: String },

    #[error("Invalid weights: {0}")]
    InvalidWeights(String),

    #[error("Embedding failed: {0}")]
    Embedding(#[from] EmbeddingError),

    #[error("Data source failed: {0}")]
    DataSource(#[from] DataSourceError),
}

/// Mean over rows of each row's maximum. Empty matrix or empty rows score 0.0.
pub(crate) fn mean_of_row_maxima(matrix: &[Vec<f32>]) -> f64 {
    let maxima: Vec<f64> = matrix
        .iter()
        .filter_map(|row| row.iter().copied().reduce(f32::max))
        .map(f64::from)
        .collect();

    if maxima.is_empty() {
        return 0.0;
    }
    maxima.iter().sum::<f64>() / maxima.len() as f64
}

/// Largest cell in the matrix, or 0.0 when empty.
pub(crate) fn matrix_max(matrix: &[Vec<f32>]) -> f64 {
    matrix
        .iter()
        .flatten()
        .copied()
        .reduce(f32::max)
        .map(f64::from)
        .unwrap_or(0.0)
}
