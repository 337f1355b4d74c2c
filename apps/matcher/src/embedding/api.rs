//! Hosted embedding client: sentence-transformer models behind an HTTP endpoint.
//!
//! One batched request per `encode` call. Retries on 429 and 5xx with exponential
//! backoff; every other failure is returned to the caller unchanged.

use async_trait::async_trait;
use reqwest::Client;
use serde_json::{json, Value};
use tracing::{debug, warn};

use super::{check_token_limit, Embedder, EmbeddingError, Vector};
use crate::config::EmbeddingConfig;

const MAX_RETRIES: u32 = 3;
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Request/response shape spoken by the endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiProvider {
    /// `{"inputs": [...]}` → `[[f32]]`
    HuggingFace,
    /// `{"input": [...], "model": ...}` → `{"data": [{"embedding": [f32]}]}`
    OpenAi,
    /// `{"texts": [...]}` → `{"embeddings": [[f32]]}`
    Custom,
}

impl ApiProvider {
    pub fn parse(name: &str) -> Self {
        match name.trim().to_ascii_lowercase().as_str() {
            "hf" | "huggingface" => ApiProvider::HuggingFace,
            "openai" => ApiProvider::OpenAi,
            _ => ApiProvider::Custom,
        }
    }
}

pub struct ApiEmbedder {
    client: Client,
    url: String,
    api_key: Option<String>,
    provider: ApiProvider,
    model: String,
    max_tokens: usize,
}

impl ApiEmbedder {
    pub fn new(config: &EmbeddingConfig) -> Result<Self, EmbeddingError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            url: config.api_url.clone(),
            api_key: config.api_key.clone(),
            provider: ApiProvider::parse(&config.provider),
            model: config.model.clone(),
            max_tokens: config.max_tokens,
        })
    }

    fn payload(&self, texts: &[String]) -> Value {
        match self.provider {
            ApiProvider::HuggingFace => json!({ "inputs": texts }),
            ApiProvider::OpenAi => json!({ "input": texts, "model": self.model }),
            ApiProvider::Custom => json!({ "texts": texts }),
        }
    }

    async fn post_with_retry(&self, payload: &Value) -> Result<Value, EmbeddingError> {
        let mut last_error: Option<EmbeddingError> = None;

        for attempt in 0..MAX_RETRIES {
            if attempt > 0 {
                // 1s, 2s
                let delay = std::time::Duration::from_millis(1000 * (1 << (attempt - 1)));
                warn!(
                    "Embedding call attempt {} failed, retrying after {}ms...",
                    attempt,
                    delay.as_millis()
                );
                tokio::time::sleep(delay).await;
            }

            let mut request = self
                .client
                .post(&self.url)
                .header("content-type", "application/json")
                .json(payload);
            if let Some(key) = &self.api_key {
                request = request.bearer_auth(key);
            }

            let response = match request.send().await {
                Ok(r) => r,
                Err(e) => {
                    last_error = Some(EmbeddingError::Http(e));
                    continue;
                }
            };

            let status = response.status();

            // HF returns 503 while the model is loading
            if status.as_u16() == 429 || status.is_server_error() {
                let body = response.text().await.unwrap_or_default();
                warn!("Embedding API returned {}: {}", status, body);
                last_error = Some(EmbeddingError::Api {
                    status: status.as_u16(),
                    message: body,
                });
                continue;
            }

            if !status.is_success() {
                let message = response.text().await.unwrap_or_default();
                return Err(EmbeddingError::Api {
                    status: status.as_u16(),
                    message,
                });
            }

            return Ok(response.json::<Value>().await?);
        }

        Err(last_error.unwrap_or_else(|| {
            EmbeddingError::Unavailable(format!("no response after {MAX_RETRIES} attempts"))
        }))
    }
}

#[async_trait]
impl Embedder for ApiEmbedder {
    fn name(&self) -> &'static str {
        "api"
    }

    fn max_input_tokens(&self) -> usize {
        self.max_tokens
    }

    async fn encode(&self, texts: &[String]) -> Result<Vec<Vector>, EmbeddingError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        check_token_limit(texts, self.max_input_tokens())?;

        let payload = self.payload(texts);
        let response = self.post_with_retry(&payload).await?;
        let vectors = parse_embeddings(response)?;

        if vectors.len() != texts.len() {
            return Err(EmbeddingError::CountMismatch {
                expected: texts.len(),
                actual: vectors.len(),
            });
        }

        debug!(
            batch = texts.len(),
            dimension = vectors.first().map(|v| v.len()).unwrap_or(0),
            "embedding API call succeeded"
        );
        Ok(vectors)
    }
}

/// Accepts `[[f32]]`, `[f32]`, `{"embeddings": ...}` and `{"data": [{"embedding": [f32]}]}`.
fn parse_embeddings(value: Value) -> Result<Vec<Vector>, EmbeddingError> {
    match value {
        Value::Object(mut map) => {
            if let Some(embeddings) = map.remove("embeddings") {
                return parse_collection(embeddings);
            }
            if let Some(Value::Array(items)) = map.remove("data") {
                return items
                    .into_iter()
                    .map(|item| match item {
                        Value::Object(mut obj) => obj
                            .remove("embedding")
                            .ok_or_else(|| {
                                EmbeddingError::Parse("missing `embedding` in data item".into())
                            })
                            .and_then(parse_vector),
                        _ => Err(EmbeddingError::Parse(
                            "unexpected entry inside `data` array".into(),
                        )),
                    })
                    .collect();
            }
            if let Some(Value::String(message)) = map.remove("error") {
                return Err(EmbeddingError::Unavailable(message));
            }
            Err(EmbeddingError::Parse("unsupported response shape".into()))
        }
        other => parse_collection(other),
    }
}

fn parse_collection(value: Value) -> Result<Vec<Vector>, EmbeddingError> {
    match value {
        Value::Array(items) if items.iter().all(|i| i.is_array()) => {
            items.into_iter().map(parse_vector).collect()
        }
        other => parse_vector(other).map(|v| vec![v]),
    }
}

fn parse_vector(value: Value) -> Result<Vector, EmbeddingError> {
    match value {
        Value::Array(values) => values
            .into_iter()
            .map(|v| {
                v.as_f64().map(|f| f as f32).ok_or_else(|| {
                    EmbeddingError::Parse(format!("embedding entries must be numbers, got {v}"))
                })
            })
            .collect(),
        other => Err(EmbeddingError::Parse(format!(
            "embedding vector must be an array, got {other}"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_parse() {
        assert_eq!(ApiProvider::parse("HuggingFace"), ApiProvider::HuggingFace);
        assert_eq!(ApiProvider::parse("hf"), ApiProvider::HuggingFace);
        assert_eq!(ApiProvider::parse("openai"), ApiProvider::OpenAi);
        assert_eq!(ApiProvider::parse("anything"), ApiProvider::Custom);
    }

    #[test]
    fn test_parse_nested_arrays() {
        let vectors = parse_embeddings(json!([[0.1, 0.2], [0.3, 0.4]])).unwrap();
        assert_eq!(vectors.len(), 2);
        assert_eq!(vectors[1], vec![0.3_f32, 0.4_f32]);
    }

    #[test]
    fn test_parse_openai_data_shape() {
        let body = json!({
            "data": [
                {"embedding": [1.0, 0.0], "index": 0},
                {"embedding": [0.0, 1.0], "index": 1}
            ],
            "model": "text-embedding-3-small"
        });
        let vectors = parse_embeddings(body).unwrap();
        assert_eq!(vectors, vec![vec![1.0, 0.0], vec![0.0, 1.0]]);
    }

    #[test]
    fn test_parse_embeddings_key() {
        let vectors = parse_embeddings(json!({"embeddings": [[0.5, 0.5]]})).unwrap();
        assert_eq!(vectors, vec![vec![0.5, 0.5]]);
    }

    #[test]
    fn test_parse_single_flat_vector() {
        let vectors = parse_embeddings(json!([0.5, 0.25])).unwrap();
        assert_eq!(vectors, vec![vec![0.5, 0.25]]);
    }

    #[test]
    fn test_parse_error_body_is_unavailable() {
        let err = parse_embeddings(json!({"error": "Model is currently loading"})).unwrap_err();
        assert!(matches!(err, EmbeddingError::Unavailable(_)));
    }

    #[test]
    fn test_parse_rejects_non_numeric_entries() {
        let err = parse_embeddings(json!([["a", "b"]])).unwrap_err();
        assert!(matches!(err, EmbeddingError::Parse(_)));
    }

    #[test]
    fn test_payload_shapes() {
        let mut config = crate::config::test_config().embedding;
        let texts = vec!["Rust".to_string()];

        config.provider = "huggingface".to_string();
        let hf = ApiEmbedder::new(&config).unwrap();
        assert_eq!(hf.payload(&texts), json!({"inputs": ["Rust"]}));

        config.provider = "openai".to_string();
        config.model = "text-embedding-3-small".to_string();
        let openai = ApiEmbedder::new(&config).unwrap();
        assert_eq!(
            openai.payload(&texts),
            json!({"input": ["Rust"], "model": "text-embedding-3-small"})
        );

        config.provider = "custom".to_string();
        let custom = ApiEmbedder::new(&config).unwrap();
        assert_eq!(custom.payload(&texts), json!({"texts": ["Rust"]}));
    }

    #[tokio::test]
    async fn test_empty_batch_skips_network() {
        let config = crate::config::test_config().embedding;
        let embedder = ApiEmbedder::new(&config).unwrap();
        assert!(embedder.encode(&[]).await.unwrap().is_empty());
    }
}
