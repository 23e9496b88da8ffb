use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError};

use crate::models::domain::{FilterSpec, SortOrder};

/// Request to search job listings
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SearchJobsRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId", default)]
    pub user_id: Option<String>,
    #[validate(custom(function = "validate_filter_ranges"))]
    #[serde(default)]
    pub filters: FilterSpec,
    #[serde(default)]
    pub sort: SortOrder,
    #[validate(range(min = 1, max = 500))]
    pub limit: Option<u16>,
}

/// Request to persist a user's filters
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SaveFiltersRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(custom(function = "validate_filter_ranges"))]
    pub filters: FilterSpec,
}

/// Request to save or unsave a job for a user
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct SavedJobRequest {
    #[validate(length(min = 1))]
    #[serde(alias = "user_id", rename = "userId")]
    pub user_id: String,
    #[validate(length(min = 1))]
    #[serde(alias = "job_id", rename = "jobId")]
    pub job_id: String,
}

fn validate_filter_ranges(filters: &FilterSpec) -> Result<(), ValidationError> {
    filters.check_ranges().map_err(|e| {
        let mut error = ValidationError::new("inverted_range");
        error.message = Some(e.to_string().into());
        error
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::domain::PayRange;

    #[test]
    fn test_search_request_defaults() {
        let req: SearchJobsRequest = serde_json::from_str("{}").unwrap();

        assert!(req.user_id.is_none());
        assert!(req.filters.is_default());
        assert_eq!(req.sort, SortOrder::Listed);
        assert!(req.validate().is_ok());
    }

    #[test]
    fn test_search_request_rejects_inverted_pay_range() {
        let req = SearchJobsRequest {
            user_id: Some("user_1".to_string()),
            filters: FilterSpec {
                pay_range: Some(PayRange::new(3000.0, 1000.0)),
                ..FilterSpec::default()
            },
            sort: SortOrder::Listed,
            limit: None,
        };

        assert!(req.validate().is_err());
    }

    #[test]
    fn test_search_request_rejects_empty_user_and_zero_limit() {
        let req: SearchJobsRequest =
            serde_json::from_str(r#"{"userId": "", "limit": 0}"#).unwrap();

        let errors = req.validate().unwrap_err();
        assert_eq!(errors.field_errors().len(), 2);
    }

    #[test]
    fn test_saved_job_request_aliases() {
        let req: SavedJobRequest =
            serde_json::from_str(r#"{"user_id": "u1", "job_id": "j9"}"#).unwrap();

        assert_eq!(req.user_id, "u1");
        assert_eq!(req.job_id, "j9");
        assert!(req.validate().is_ok());
    }
}
