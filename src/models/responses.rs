use serde::{Deserialize, Serialize};
use crate::models::domain::{FilterSpec, JobRecord};

/// Response for the job search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchJobsResponse {
    pub jobs: Vec<JobRecord>,
    pub total: usize,
    pub matched: usize,
    #[serde(rename = "activeFilters")]
    pub active_filters: usize,
}

/// A user's current filters
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FiltersResponse {
    #[serde(rename = "userId")]
    pub user_id: Option<String>,
    pub filters: FilterSpec,
    #[serde(rename = "activeFilters")]
    pub active_filters: usize,
}

impl FiltersResponse {
    pub fn new(user_id: Option<String>, filters: FilterSpec) -> Self {
        let active_filters = filters.active_filter_count();
        Self {
            user_id,
            filters,
            active_filters,
        }
    }
}

/// Saved job ids for a user
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SavedJobsResponse {
    #[serde(rename = "userId")]
    pub user_id: String,
    #[serde(rename = "jobIds")]
    pub job_ids: Vec<String>,
    pub count: usize,
}

/// Health check response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
    pub timestamp: chrono::DateTime<chrono::Utc>,
}

/// Error response
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}
