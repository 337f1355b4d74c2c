use std::hash::{Hash, Hasher};

use async_trait::async_trait;
use siphasher::sip::SipHasher13;
use tracing::debug;

use super::{check_token_limit, Embedder, EmbeddingError, Vector};

// Fixed keys keep vectors stable across processes and toolchains.
// Changing them changes every embedding.
const HASH_SEED_K0: u64 = 0x5d1f_0c3a_7e29_b644;
const HASH_SEED_K1: u64 = 0xa4c8_13f7_9b02_e6d5;

const WORD_WEIGHT: f32 = 1.0;
const TRIGRAM_WEIGHT: f32 = 0.5;

/// Deterministic feature-hashing embedder.
///
/// Features per text:
/// - every lower-cased alphanumeric word (weight 1.0)
/// - every character trigram of `#word#` (weight 0.5), so "developer" and
///   "development" land close together
///
/// Each feature is hashed to a bucket with a hash-derived sign, then the vector is
/// L2-normalized. No model download, no network; used offline and in tests.
pub struct HashEmbedder {
    dimension: usize,
    max_tokens: usize,
}

impl HashEmbedder {
    pub fn new(dimension: usize, max_tokens: usize) -> Self {
        Self {
            dimension: dimension.max(1),
            max_tokens,
        }
    }

    /// Returns (bucket index, sign) for a feature.
    fn bucket(&self, feature: &str) -> (usize, f32) {
        let mut hasher = SipHasher13::new_with_keys(HASH_SEED_K0, HASH_SEED_K1);
        feature.hash(&mut hasher);
        let h = hasher.finish();
        let sign = if h >> 63 == 0 { 1.0 } else { -1.0 };
        ((h % self.dimension as u64) as usize, sign)
    }

    fn add_feature(&self, vector: &mut [f32], feature: &str, weight: f32) {
        let (idx, sign) = self.bucket(feature);
        vector[idx] += sign * weight;
    }

    /// Embeds a single text. Blank text yields the zero vector.
    pub fn embed_one(&self, text: &str) -> Vector {
        let mut vector = vec![0.0f32; self.dimension];
        let lowered = text.to_lowercase();

        for word in lowered
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| !w.is_empty())
        {
            self.add_feature(&mut vector, &format!("w:{word}"), WORD_WEIGHT);

            let padded: Vec<char> = format!("#{word}#").chars().collect();
            for tri in padded.windows(3) {
                let tri: String = tri.iter().collect();
                self.add_feature(&mut vector, &format!("t:{tri}"), TRIGRAM_WEIGHT);
            }
        }

        let norm: f32 = vector.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut vector {
                *v /= norm;
            }
        }
        vector
    }
}

#[async_trait]
impl Embedder for HashEmbedder {
    fn name(&self) -> &'static str {
        "hash"
    }

    fn max_input_tokens(&self) -> usize {
        self.max_tokens
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingError> {
        check_token_limit(texts, self.max_input_tokens())?;
        debug!(batch = texts.len(), "hash embedder encoding batch");
        Ok(texts.iter().map(|t| self.embed_one(t)).collect())
    }
}
