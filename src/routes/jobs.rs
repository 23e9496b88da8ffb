use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use std::collections::HashSet;
use validator::Validate;

use crate::models::{
    HealthResponse, JobRecord, SavedJobRequest, SavedJobsResponse, SearchJobsRequest, SearchJobsResponse,
};
use crate::routes::{error_response, AppState, UserQuery};
use crate::services::{CacheError, CacheKey, ListingsError, PostgresError};

/// Configure all job-related routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/health", web::get().to(health_check))
        .route("/jobs/search", web::post().to(search_jobs))
        .route("/jobs/saved", web::get().to(list_saved_jobs))
        .route("/jobs/saved", web::post().to(save_job))
        .route("/jobs/saved", web::delete().to(unsave_job))
        .route("/jobs/{job_id}", web::get().to(get_job));
}

/// Health check endpoint
async fn health_check(state: web::Data<AppState>) -> impl Responder {
    let pg_healthy = state.postgres.health_check().await.unwrap_or(false);

    let status = if pg_healthy { "healthy" } else { "degraded" };

    HttpResponse::Ok().json(HealthResponse {
        status: status.to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        timestamp: chrono::Utc::now(),
    })
}

/// Current listings, from cache when possible
async fn load_listings(state: &AppState) -> Result<Vec<JobRecord>, ListingsError> {
    let fetch_limit = state.search.listings_fetch_limit;
    let key = CacheKey::listings(fetch_limit);

    match state.cache.get::<Vec<JobRecord>>(&key).await {
        Ok(jobs) => return Ok(jobs),
        Err(CacheError::CacheMiss(_)) => {}
        Err(e) => tracing::warn!("Listings cache read failed, falling back to backend: {}", e),
    }

    let jobs = state.listings.list_jobs(fetch_limit).await?;

    if let Err(e) = state.cache.set(&key, &jobs).await {
        tracing::warn!("Failed to cache listings: {}", e);
    }

    Ok(jobs)
}

/// Search job listings
///
/// POST /api/v1/jobs/search
///
/// Request body:
/// ```json
/// {
///   "userId": "string",
///   "filters": { "keyword": "nurse", "jobTypes": ["Full-time"], "payRange": [0, 2000] },
///   "sort": "newest",
///   "limit": 50
/// }
/// ```
async fn search_jobs(
    state: web::Data<AppState>,
    req: web::Json<SearchJobsRequest>,
) -> impl Responder {
    if let Err(errors) = req.validate() {
        tracing::info!("Validation failed for search request: {:?}", errors);
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let req = req.into_inner();

    if req.filters.saved_only && req.user_id.is_none() {
        return error_response(
            StatusCode::BAD_REQUEST,
            "Validation failed",
            "userId is required when savedOnly is set",
        );
    }

    let limit = req
        .limit
        .unwrap_or(state.search.default_limit)
        .min(state.search.max_limit) as usize;

    let jobs = match load_listings(&state).await {
        Ok(jobs) => jobs,
        Err(e) => {
            tracing::error!("Failed to load listings: {}", e);
            return error_response(
                StatusCode::INTERNAL_SERVER_ERROR,
                "Failed to load listings",
                e.to_string(),
            );
        }
    };

    let saved_ids = match (&req.user_id, req.filters.saved_only) {
        (Some(user_id), true) => {
            match saved_ids_or_unavailable(user_id, state.postgres.saved_job_set(user_id).await) {
                Ok(saved_ids) => saved_ids,
                Err(resp) => return resp,
            }
        }
        _ => HashSet::new(),
    };

    let result = state
        .engine
        .search(jobs, &req.filters, &saved_ids, req.sort, limit);

    if let Some(user_id) = &req.user_id {
        let key = CacheKey::filters(user_id);
        if let Err(e) = state.cache.set_with_ttl(&key, &req.filters, state.filters_ttl_secs).await {
            tracing::warn!("Failed to persist filters for {}: {}", user_id, e);
        }
    }

    tracing::info!(
        "Returning {} of {} matching jobs (from {} listings, {} active filters)",
        result.jobs.len(),
        result.matched,
        result.total_candidates,
        req.filters.active_filter_count()
    );

    HttpResponse::Ok().json(SearchJobsResponse {
        jobs: result.jobs,
        total: result.total_candidates,
        matched: result.matched,
        active_filters: req.filters.active_filter_count(),
    })
}

/// A failed lookup must not read as "no saved jobs"
fn saved_ids_or_unavailable(
    user_id: &str,
    lookup: Result<HashSet<String>, PostgresError>,
) -> Result<HashSet<String>, HttpResponse> {
    lookup.map_err(|e| {
        tracing::error!("Failed to fetch saved jobs for {}: {}", user_id, e);
        error_response(
            StatusCode::SERVICE_UNAVAILABLE,
            "Saved jobs unavailable",
            e.to_string(),
        )
    })
}

/// Get a single job
///
/// GET /api/v1/jobs/{job_id}
async fn get_job(state: web::Data<AppState>, path: web::Path<String>) -> impl Responder {
    let job_id = path.into_inner();

    match state.listings.get_job(&job_id).await {
        Ok(job) => HttpResponse::Ok().json(job),
        Err(ListingsError::NotFound(message)) => {
            error_response(StatusCode::NOT_FOUND, "Job not found", message)
        }
        Err(e) => {
            tracing::error!("Failed to fetch job {}: {}", job_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch job", e.to_string())
        }
    }
}

/// List saved jobs
///
/// GET /api/v1/jobs/saved?userId={userId}
async fn list_saved_jobs(state: web::Data<AppState>, query: web::Query<UserQuery>) -> impl Responder {
    let user_id = &query.user_id;

    match state.postgres.get_saved_job_ids(user_id).await {
        Ok(job_ids) => HttpResponse::Ok().json(SavedJobsResponse {
            user_id: user_id.clone(),
            count: job_ids.len(),
            job_ids,
        }),
        Err(e) => {
            tracing::error!("Failed to fetch saved jobs for {}: {}", user_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to fetch saved jobs", e.to_string())
        }
    }
}

/// Save a job
///
/// POST /api/v1/jobs/saved
///
/// Request body:
/// ```json
/// { "userId": "string", "jobId": "string" }
/// ```
async fn save_job(state: web::Data<AppState>, req: web::Json<SavedJobRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state.postgres.save_job(&req.user_id, &req.job_id).await {
        Ok(created) => {
            tracing::debug!("Saved job {} for {} (new: {})", req.job_id, req.user_id, created);
            HttpResponse::Ok().json(serde_json::json!({ "success": true, "created": created }))
        }
        Err(e) => {
            tracing::error!("Failed to save job {} for {}: {}", req.job_id, req.user_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save job", e.to_string())
        }
    }
}

/// Unsave a job
///
/// DELETE /api/v1/jobs/saved
async fn unsave_job(state: web::Data<AppState>, req: web::Json<SavedJobRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    match state.postgres.unsave_job(&req.user_id, &req.job_id).await {
        Ok(removed) => HttpResponse::Ok().json(serde_json::json!({ "success": true, "removed": removed })),
        Err(e) => {
            tracing::error!("Failed to unsave job {} for {}: {}", req.job_id, req.user_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to unsave job", e.to_string())
        }
    }
}
