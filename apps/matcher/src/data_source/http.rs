use async_trait::async_trait;
use reqwest::Client;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{debug, error, info};

use super::{decode_records, DataSource, DataSourceError};
use crate::models::{CandidateRecord, JobRecord};

const RESUMES_PATH: &str = "/api/resumes";
const JOBS_PATH: &str = "/api/job-descriptions";
const REQUEST_TIMEOUT_SECS: u64 = 60;

/// Remote resume/job API authenticated with a bearer token.
pub struct HttpDataSource {
    client: Client,
    base_url: String,
    api_token: String,
}

impl HttpDataSource {
    pub fn new(base_url: &str, api_token: &str) -> Result<Self, DataSourceError> {
        let client = Client::builder()
            .timeout(std::time::Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_token: api_token.to_string(),
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get_records<T: DeserializeOwned>(
        &self,
        kind: &'static str,
        path: &str,
    ) -> Result<Vec<T>, DataSourceError> {
        let url = self.url(path);
        debug!("GET {url}");

        let response = self
            .client
            .get(&url)
            .bearer_auth(&self.api_token)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let message = response.text().await.unwrap_or_default();
            error!("Data API error {}: {}", status, message);
            return Err(DataSourceError::Api {
                status: status.as_u16(),
                message,
            });
        }

        let body: Value = response.json().await?;
        let records = decode_records(kind, body)?;
        info!("Fetched {} {kind} records", records.len());
        Ok(records)
    }
}

#[async_trait]
impl DataSource for HttpDataSource {
    async fn fetch_candidates(&self) -> Result<Vec<CandidateRecord>, DataSourceError> {
        self.get_records("resume", RESUMES_PATH).await
    }

    async fn fetch_jobs(&self) -> Result<Vec<JobRecord>, DataSourceError> {
        self.get_records("job", JOBS_PATH).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_url_joins_without_double_slash() {
        let source = HttpDataSource::new("https://data.example.com/", "token").unwrap();
        assert_eq!(
            source.url(RESUMES_PATH),
            "https://data.example.com/api/resumes"
        );
        assert_eq!(
            source.url(JOBS_PATH),
            "https://data.example.com/api/job-descriptions"
        );
    }
}
