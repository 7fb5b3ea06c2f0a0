//! Router configuration for the HTTP API.
//!
//! This module sets up all routes, middleware (CORS, panic recovery,
//! tracing, request logging) and creates the axum router ready for serving.

use std::any::Any;

use axum::{
    extract::DefaultBodyLimit,
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post, put},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    compression::CompressionLayer,
    cors::{Any as AnyOrigin, CorsLayer},
    trace::TraceLayer,
};
use tracing::error;

use super::error::ApiError;
use super::state::AppState;
use super::{handlers, images, logging};
use crate::routes::images_route;
use crate::routes::landing::ROOT_PATH;
use crate::routes::lessons::{LIST_LESSONS_PATH, SEARCH_LESSONS_PATH, UPDATE_LESSON_PATH};
use crate::routes::orders::CREATE_ORDER_PATH;

/// Create the main application router with all routes and middleware.
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    let body_limit = state.body_limit;

    Router::new()
        .route(ROOT_PATH, get(handlers::root))
        .route("/health", get(handlers::health_check))
        .route(LIST_LESSONS_PATH, get(handlers::list_lessons))
        .route(SEARCH_LESSONS_PATH, get(handlers::search_lessons))
        .route(CREATE_ORDER_PATH, post(handlers::create_order))
        .route(UPDATE_LESSON_PATH, put(handlers::update_lesson))
        .route(&images_route(), get(images::serve_image))
        .fallback(handlers::not_found)
        .method_not_allowed_fallback(handlers::not_found)
        // Innermost first: the logger sees the body before any handler does.
        .layer(DefaultBodyLimit::max(body_limit))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            logging::log_request,
        ))
        .layer(CompressionLayer::new())
        .layer(TraceLayer::new_for_http())
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(cors)
        .with_state(state)
}

fn panic_response(panic: Box<dyn Any + Send>) -> Response {
    let detail = panic
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| panic.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!(panic = detail, "Handler panicked");

    (StatusCode::INTERNAL_SERVER_ERROR, Json(ApiError::internal())).into_response()
}
