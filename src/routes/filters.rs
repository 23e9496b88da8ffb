use actix_web::{http::StatusCode, web, HttpResponse, Responder};
use validator::Validate;

use crate::core::JobFilterEngine;
use crate::models::{FilterSpec, FiltersResponse, SaveFiltersRequest};
use crate::routes::{error_response, AppState, UserQuery};
use crate::services::{CacheError, CacheKey};

/// Configure filter persistence routes
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg
        .route("/filters/default", web::get().to(default_filters))
        .route("/filters", web::get().to(get_filters))
        .route("/filters", web::put().to(save_filters))
        .route("/filters", web::delete().to(reset_filters));
}

/// The all-pass filters
///
/// GET /api/v1/filters/default
pub async fn default_filters() -> impl Responder {
    HttpResponse::Ok().json(FiltersResponse::new(None, JobFilterEngine::new().reset_to_defaults()))
}

/// A user's persisted filters, or the defaults when none are stored
///
/// GET /api/v1/filters?userId={userId}
async fn get_filters(state: web::Data<AppState>, query: web::Query<UserQuery>) -> impl Responder {
    let user_id = query.into_inner().user_id;
    let key = CacheKey::filters(&user_id);

    let filters = match state.cache.get::<FilterSpec>(&key).await {
        Ok(filters) => filters,
        Err(CacheError::CacheMiss(_)) => state.engine.reset_to_defaults(),
        Err(e) => {
            tracing::warn!("Failed to read filters for {}, using defaults: {}", user_id, e);
            state.engine.reset_to_defaults()
        }
    };

    HttpResponse::Ok().json(FiltersResponse::new(Some(user_id), filters))
}

/// Persist a user's filters
///
/// PUT /api/v1/filters
///
/// Request body:
/// ```json
/// { "userId": "string", "filters": { "location": "Manila", "urgentOnly": true } }
/// ```
async fn save_filters(state: web::Data<AppState>, req: web::Json<SaveFiltersRequest>) -> impl Responder {
    if let Err(errors) = req.validate() {
        return error_response(StatusCode::BAD_REQUEST, "Validation failed", errors.to_string());
    }

    let SaveFiltersRequest { user_id, filters } = req.into_inner();
    let key = CacheKey::filters(&user_id);

    match state.cache.set_with_ttl(&key, &filters, state.filters_ttl_secs).await {
        Ok(()) => {
            tracing::debug!("Persisted {} active filters for {}", filters.active_filter_count(), user_id);
            HttpResponse::Ok().json(FiltersResponse::new(Some(user_id), filters))
        }
        Err(e) => {
            tracing::error!("Failed to persist filters for {}: {}", user_id, e);
            error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to save filters", e.to_string())
        }
    }
}

/// Clear a user's filters and return the defaults
///
/// DELETE /api/v1/filters?userId={userId}
async fn reset_filters(state: web::Data<AppState>, query: web::Query<UserQuery>) -> impl Responder {
    let user_id = query.into_inner().user_id;

    if let Err(e) = state.cache.delete(&CacheKey::filters(&user_id)).await {
        tracing::error!("Failed to reset filters for {}: {}", user_id, e);
        return error_response(StatusCode::INTERNAL_SERVER_ERROR, "Failed to reset filters", e.to_string());
    }

    HttpResponse::Ok().json(FiltersResponse::new(Some(user_id), state.engine.reset_to_defaults()))
}
