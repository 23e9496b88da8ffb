use crate::models::JobRecord;
use reqwest::{Client, StatusCode};
use serde_json::Value;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur when reading listings from the backend
#[derive(Debug, Error)]
pub enum ListingsError {
    #[error("HTTP request failed: {0}")]
    RequestError(#[from] reqwest::Error),

    #[error("API returned error: {0}")]
    ApiError(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Unauthorized: invalid API key")]
    Unauthorized,

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),
}

/// REST client for the hosted backend that stores job postings
///
/// The backend exposes tables PostgREST-style under `/rest/v1/{table}` and
/// authenticates with the project key in both `apikey` and `Authorization`.
pub struct ListingsClient {
    base_url: String,
    api_key: String,
    jobs_table: String,
    client: Client,
}

impl ListingsClient {
    /// Create a new listings client
    pub fn new(
        base_url: String,
        api_key: String,
        jobs_table: String,
        timeout: Duration,
    ) -> Result<Self, ListingsError> {
        let client = Client::builder().timeout(timeout).build()?;

        Ok(Self {
            base_url,
            api_key,
            jobs_table,
            client,
        })
    }

    fn table_url(&self) -> String {
        format!(
            "{}/rest/v1/{}",
            self.base_url.trim_end_matches('/'),
            urlencoding::encode(&self.jobs_table)
        )
    }

    async fn fetch_rows(&self, url: &str) -> Result<Vec<Value>, ListingsError> {
        let response = self
            .client
            .get(url)
            .header("apikey", &self.api_key)
            .bearer_auth(&self.api_key)
            .header("Accept", "application/json")
            .send()
            .await?;

        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ListingsError::Unauthorized);
        }
        if !status.is_success() {
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Listings backend returned {}: {}", status, body);
            return Err(ListingsError::ApiError(format!("Failed to fetch jobs: {}", status)));
        }

        let json: Value = response.json().await?;

        match json {
            Value::Array(rows) => Ok(rows),
            _ => Err(ListingsError::InvalidResponse("Expected an array of rows".into())),
        }
    }

    /// Fetch the most recent job postings, newest first
    ///
    /// Rows that cannot be read as a `JobRecord` are skipped so one bad
    /// posting does not hide the rest of the board.
    pub async fn list_jobs(&self, limit: usize) -> Result<Vec<JobRecord>, ListingsError> {
        let url = format!(
            "{}?select=*&order=posted_at.desc&limit={}",
            self.table_url(),
            limit
        );

        tracing::debug!("Fetching job listings from: {}", url);

        let rows = self.fetch_rows(&url).await?;
        let total = rows.len();

        let jobs: Vec<JobRecord> = rows
            .into_iter()
            .filter_map(|row| match serde_json::from_value::<JobRecord>(row) {
                Ok(job) => Some(job),
                Err(e) => {
                    tracing::warn!("Skipping malformed job row: {}", e);
                    None
                }
            })
            .collect();

        tracing::debug!("Loaded {} jobs ({} rows)", jobs.len(), total);

        Ok(jobs)
    }

    /// Get a single job by id
    pub async fn get_job(&self, job_id: &str) -> Result<JobRecord, ListingsError> {
        let url = format!(
            "{}?select=*&id=eq.{}&limit=1",
            self.table_url(),
            urlencoding::encode(job_id)
        );

        let rows = self.fetch_rows(&url).await?;

        let row = rows
            .into_iter()
            .next()
            .ok_or_else(|| ListingsError::NotFound(format!("Job {} not found", job_id)))?;

        serde_json::from_value(row)
            .map_err(|e| ListingsError::InvalidResponse(format!("Failed to parse job: {}", e)))
    }
}
