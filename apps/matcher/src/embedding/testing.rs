//! Test embedders with hand-picked vectors.

use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};

use async_trait::async_trait;

use super::{Embedder, EmbeddingError, Vector};

/// Returns a fixed vector per known text; unknown text is an error so tests
/// notice when a matcher encodes something unexpected.
pub struct FixedEmbedder {
    vectors: HashMap<String, Vector>,
    calls: AtomicUsize,
}

impl FixedEmbedder {
    pub fn new(entries: &[(&str, &[f32])]) -> Self {
        Self {
            vectors: entries
                .iter()
                .map(|(text, v)| (text.to_string(), v.to_vec()))
                .collect(),
            calls: AtomicUsize::new(0),
        }
    }

    /// Number of `encode` calls made so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Embedder for FixedEmbedder {
    fn name(&self) -> &'static str {
        "fixed"
    }

    fn max_input_tokens(&self) -> usize {
        usize::MAX
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        texts
            .iter()
            .map(|t| {
                self.vectors
                    .get(t)
                    .cloned()
                    .ok_or_else(|| EmbeddingError::Unavailable(format!("no fixture for '{t}'")))
            })
            .collect()
    }
}

/// Always fails, as an unreachable model would.
pub struct UnavailableEmbedder;

#[async_trait]
impl Embedder for UnavailableEmbedder {
    fn name(&self) -> &'static str {
        "unavailable"
    }

    fn max_input_tokens(&self) -> usize {
        0
    }

    async fn encode(&self, _texts: &[String]) -> Result<Vec<Vector>, EmbeddingError> {
        Err(EmbeddingError::Unavailable("model offline".to_string()))
    }
}
