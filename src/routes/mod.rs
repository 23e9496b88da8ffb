// Route exports
pub mod filters;
pub mod jobs;

use actix_web::{error, http::StatusCode, web, HttpResponse};
use serde::Deserialize;
use std::sync::Arc;

use crate::config::SearchSettings;
use crate::core::JobFilterEngine;
use crate::models::ErrorResponse;
use crate::services::{CacheManager, ListingsClient, PostgresClient};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub listings: Arc<ListingsClient>,
    pub cache: Arc<CacheManager>,
    pub postgres: Arc<PostgresClient>,
    pub engine: JobFilterEngine,
    pub search: SearchSettings,
    pub filters_ttl_secs: u64,
}

/// `?userId=` query parameter
#[derive(Debug, Deserialize)]
pub struct UserQuery {
    #[serde(rename = "userId", alias = "user_id")]
    pub user_id: String,
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1")
            .configure(jobs::configure)
            .configure(filters::configure),
    );
}

pub(crate) fn error_response(status: StatusCode, error: &str, message: impl Into<String>) -> HttpResponse {
    HttpResponse::build(status).json(ErrorResponse {
        error: error.to_string(),
        message: message.into(),
        status_code: status.as_u16(),
    })
}

/// JSON error response for malformed payloads
#[derive(Debug, serde::Serialize)]
pub struct JsonError {
    pub error: String,
    pub message: String,
    pub status_code: u16,
}

impl std::fmt::Display for JsonError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error, self.message)
    }
}

impl std::error::Error for JsonError {}

impl error::ResponseError for JsonError {
    fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.status_code).unwrap_or(StatusCode::BAD_REQUEST)
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(self)
    }
}

/// Handle JSON payload errors
pub fn handle_json_payload_error(err: error::JsonPayloadError, req: &actix_web::HttpRequest) -> actix_web::Error {
    tracing::info!("JSON payload error on {}: {}", req.path(), err);
    JsonError {
        error: "invalid_json".to_string(),
        message: format!("Invalid JSON: {}", err),
        status_code: 400,
    }
    .into()
}

/// Handle query payload errors
pub fn handle_query_payload_error(err: error::QueryPayloadError, _req: &actix_web::HttpRequest) -> actix_web::Error {
    JsonError {
        error: "invalid_query".to_string(),
        message: format!("Invalid query: {}", err),
        status_code: 400,
    }
    .into()
}
