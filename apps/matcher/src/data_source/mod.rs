//! Data Source: where resumes and job descriptions come from.
//!
//! The matching engine holds an `Arc<dyn DataSource>`; production uses `HttpDataSource`.

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use serde_json::Value;
use thiserror::Error;
use tracing::warn;

use crate::models::{CandidateRecord, JobRecord};

pub mod http;

#[cfg(test)]
pub(crate) mod testing;

pub use http::HttpDataSource;

#[derive(Debug, Error)]
pub enum DataSourceError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Data API error (status {status}): {message}")]
    Api { status: u16, message: String },

    #[error("Unexpected {kind} payload: {reason}")]
    Decode { kind: &'static str, reason: String },
}

#[async_trait]
pub trait DataSource: Send + Sync {
    /// `GET resumes`
    async fn fetch_candidates(&self) -> Result<Vec<CandidateRecord>, DataSourceError>;

    /// `GET job-descriptions`
    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, DataSourceError>;
}

/// Decodes a JSON array of records one by one. Entries that are not JSON objects
/// are skipped with a warning; record types decode wrongly-typed fields as missing,
/// so every object yields a record.
pub fn decode_records<T: DeserializeOwned>(
    kind: &'static str,
    body: Value,
) -> Result<Vec<T>, DataSourceError> {
    let items = match body {
        Value::Array(items) => items,
        other => {
            return Err(DataSourceError::Decode {
                kind,
                reason: format!("expected a JSON array, got {}", json_kind(&other)),
            })
        }
    };

    let total = items.len();
    let records: Vec<T> = items
        .into_iter()
        .enumerate()
        .filter_map(|(index, item)| {
            if !item.is_object() {
                warn!(kind, index, "skipping {} record", json_kind(&item));
                return None;
            }
            match serde_json::from_value(item) {
                Ok(record) => Some(record),
                Err(e) => {
                    warn!(kind, index, "skipping undecodable record: {e}");
                    None
                }
            }
        })
        .collect();

    if records.len() < total {
        warn!(
            kind,
            kept = records.len(),
            total,
            "some records were skipped"
        );
    }
    Ok(records)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_decode_records_skips_only_non_objects() {
        let body = json!([
            {"name": "Asha", "technicalSkills": ["Rust"]},
            {"name": 42, "technicalSkills": ["Go", 3]},
            "not a record",
            null,
            {"name": "Ben"}
        ]);

        let records: Vec<CandidateRecord> = decode_records("resume", body).unwrap();
        assert_eq!(records.len(), 3);
        assert_eq!(records[0].name.as_deref(), Some("Asha"));
        assert_eq!(records[1].name, None);
        assert_eq!(records[1].technical_skills, Some(vec!["Go".to_string()]));
        assert_eq!(records[2].name.as_deref(), Some("Ben"));
    }

    #[test]
    fn test_decode_records_rejects_non_array() {
        let err = decode_records::<JobRecord>("job", json!({"jobs": []})).unwrap_err();
        match err {
            DataSourceError::Decode { kind, reason } => {
                assert_eq!(kind, "job");
                assert!(reason.contains("an object"));
            }
            other => panic!("Expected Decode, got {other:?}"),
        }
    }

    #[test]
    fn test_decode_records_empty_array() {
        let records: Vec<JobRecord> = decode_records("job", json!([])).unwrap();
        assert!(records.is_empty());
    }
}
