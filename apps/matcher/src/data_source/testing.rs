use async_trait::async_trait;
use serde_json::Value;

use super::{DataSource, DataSourceError};
use crate::models::{CandidateRecord, JobRecord};

/// Serves records decoded from in-test JSON.
pub struct StaticDataSource {
    candidates: Vec<Value>,
    jobs: Vec<Value>,
}

impl StaticDataSource {
    pub fn new(candidates: Vec<Value>, jobs: Vec<Value>) -> Self {
        Self { candidates, jobs }
    }
}

#[async_trait]
impl DataSource for StaticDataSource {
    async fn fetch_candidates(&self) -> Result<Vec<CandidateRecord>, DataSourceError> {
        super::decode_records("resume", Value::Array(self.candidates.clone()))
    }

    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, DataSourceError> {
        super::decode_records("job", Value::Array(self.jobs.clone()))
    }
}

/// Fails every request with a 503.
pub struct DownDataSource;

#[async_trait]
impl DataSource for DownDataSource {
    async fn fetch_candidates(&self) -> Result<Vec<CandidateRecord>, DataSourceError> {
        Err(DataSourceError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }

    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, DataSourceError> {
        Err(DataSourceError::Api {
            status: 503,
            message: "service unavailable".to_string(),
        })
    }
}
