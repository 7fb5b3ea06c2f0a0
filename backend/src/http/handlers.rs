//! HTTP handlers for the REST API.
//!
//! Each handler corresponds to an API endpoint and delegates to the
//! service layer for business logic.

use axum::{
    extract::State,
    http::{Method, StatusCode, Uri},
    Json,
};
use tracing::info;

use super::dto::HealthResponse;
use super::error::AppError;
use super::extract::{JsonBody, PathParams, QueryParams};
use super::state::AppState;
use crate::db::services as db_services;
use crate::models::{Lesson, LessonId};
use crate::routes::landing::ServiceDescriptor;
use crate::routes::lessons::{patch_from_body, LessonUpdatedResponse, SearchQuery};
use crate::routes::orders::{validate_order, OrderCreatedResponse, OrderRequest};

/// Result type for handlers.
pub type HandlerResult<T> = Result<Json<T>, AppError>;

// =============================================================================
// Service metadata
// =============================================================================

/// GET /
pub async fn root() -> Json<ServiceDescriptor> {
    Json(ServiceDescriptor::current())
}

/// GET /health
///
/// Health check endpoint to verify the service is running and database is accessible.
pub async fn health_check(State(state): State<AppState>) -> HandlerResult<HealthResponse> {
    let db_status = match db_services::health_check(state.repository.as_ref()).await {
        Ok(true) => "connected".to_string(),
        Ok(false) => "disconnected".to_string(),
        Err(e) => {
            tracing::warn!(error = %e, "Health check failed");
            "error".to_string()
        }
    };

    Ok(Json(HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        database: db_status,
    }))
}

// =============================================================================
// Lessons
// =============================================================================

/// GET /lessons
pub async fn list_lessons(State(state): State<AppState>) -> HandlerResult<Vec<Lesson>> {
    let lessons = db_services::list_lessons(state.repository.as_ref()).await?;
    Ok(Json(lessons))
}

/// GET /search?q=
///
/// Without `q` (or with an empty one) this is the same as `GET /lessons`.
pub async fn search_lessons(
    State(state): State<AppState>,
    QueryParams(query): QueryParams<SearchQuery>,
) -> HandlerResult<Vec<Lesson>> {
    let lessons = db_services::search_lessons(state.repository.as_ref(), query.term()).await?;
    Ok(Json(lessons))
}

/// PUT /lessons/{id}
///
/// Merge the body into the lesson and return the lesson as it now reads.
pub async fn update_lesson(
    State(state): State<AppState>,
    PathParams(id): PathParams<String>,
    JsonBody(body): JsonBody,
) -> HandlerResult<LessonUpdatedResponse> {
    let id = LessonId::parse(&id)?;
    let patch = patch_from_body(body)
        .ok_or_else(|| AppError::BadRequest("Update body must be a JSON object".to_string()))?;

    let lesson = db_services::update_lesson(state.repository.as_ref(), &id, &patch).await?;
    info!(lesson_id = %id, fields = patch.len(), "Lesson updated");

    Ok(Json(LessonUpdatedResponse::new(lesson)))
}

// =============================================================================
// Orders
// =============================================================================

/// POST /orders
pub async fn create_order(
    State(state): State<AppState>,
    JsonBody(body): JsonBody,
) -> Result<(StatusCode, Json<OrderCreatedResponse>), AppError> {
    let new_order = validate_order(OrderRequest::from_body(body))?;
    let order = db_services::place_order(state.repository.as_ref(), new_order).await?;
    info!(order_id = %order.id, items = order.items.len(), "Order created");

    Ok((StatusCode::CREATED, Json(OrderCreatedResponse::new(order))))
}

// =============================================================================
// Fallback
// =============================================================================

/// Any unmatched method or path.
pub async fn not_found(method: Method, uri: Uri) -> AppError {
    AppError::RouteNotFound {
        method: method.to_string(),
        path: uri.path().to_string(),
    }
}
