//! HTTP error handling and response types.
//!
//! Client errors carry a message naming the violated rule. Everything else
//! collapses to a generic 500 whose cause is logged and never sent back.

use axum::{
    extract::rejection::{PathRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use tracing::error;

use crate::db::repository::RepositoryError;
use crate::models::InvalidLessonId;
use crate::routes::orders::{OrderValidationError, REQUIRED_FIELDS};

/// Message of every 500 response.
pub const INTERNAL_ERROR_MESSAGE: &str = "Internal server error";

/// API error response body.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ApiError {
    /// Human-readable error message
    pub error: String,
    /// Error code for programmatic handling
    pub code: String,
    /// Optional structured context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Value>,
}

impl ApiError {
    pub fn new(code: impl Into<String>, error: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            code: code.into(),
            details: None,
        }
    }

    pub fn with_details(mut self, details: Value) -> Self {
        self.details = Some(details);
        self
    }

    pub fn internal() -> Self {
        Self::new("INTERNAL_ERROR", INTERNAL_ERROR_MESSAGE)
    }
}

/// Application error type for HTTP handlers.
#[derive(Debug)]
pub enum AppError {
    /// No route matched
    RouteNotFound { method: String, path: String },
    /// Requested image does not exist under the image root
    ImageNotFound(String),
    /// Invalid request (validation error)
    BadRequest(String),
    /// Order rejected by validation
    InvalidOrder(OrderValidationError),
    /// Body exceeded the configured limit
    PayloadTooLarge,
    /// Internal server error
    Internal(String),
    /// Repository error
    Repository(RepositoryError),
}

impl AppError {
    fn into_parts(self) -> (StatusCode, ApiError) {
        match self {
            AppError::RouteNotFound { method, path } => (
                StatusCode::NOT_FOUND,
                ApiError::new("NOT_FOUND", "Route not found")
                    .with_details(json!({ "method": method, "path": path })),
            ),
            AppError::ImageNotFound(path) => (
                StatusCode::NOT_FOUND,
                ApiError::new("NOT_FOUND", "Image not found")
                    .with_details(json!({ "path": path })),
            ),
            AppError::BadRequest(msg) => (
                StatusCode::BAD_REQUEST,
                ApiError::new("BAD_REQUEST", msg),
            ),
            AppError::InvalidOrder(err) => {
                let api = ApiError::new("VALIDATION_ERROR", err.to_string());
                let api = match err {
                    OrderValidationError::MissingFields => {
                        api.with_details(json!({ "required": REQUIRED_FIELDS }))
                    }
                    _ => api,
                };
                (StatusCode::BAD_REQUEST, api)
            }
            AppError::PayloadTooLarge => (
                StatusCode::PAYLOAD_TOO_LARGE,
                ApiError::new("PAYLOAD_TOO_LARGE", "Request body too large"),
            ),
            AppError::Internal(msg) => {
                error!(cause = %msg, "Request failed");
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::internal())
            }
            AppError::Repository(RepositoryError::NotFound { message, context }) => {
                let mut details = serde_json::Map::new();
                if let Some(entity) = context.entity {
                    details.insert("entity".to_string(), Value::String(entity));
                }
                if let Some(id) = context.entity_id {
                    details.insert("id".to_string(), Value::String(id));
                }
                let api = ApiError::new("NOT_FOUND", message);
                let api = if details.is_empty() {
                    api
                } else {
                    api.with_details(Value::Object(details))
                };
                (StatusCode::NOT_FOUND, api)
            }
            AppError::Repository(e) => {
                error!(error = %e, "Repository failure");
                (StatusCode::INTERNAL_SERVER_ERROR, ApiError::internal())
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error) = self.into_parts();
        (status, Json(error)).into_response()
    }
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Repository(err)
    }
}

impl From<OrderValidationError> for AppError {
    fn from(err: OrderValidationError) -> Self {
        AppError::InvalidOrder(err)
    }
}

impl From<InvalidLessonId> for AppError {
    fn from(err: InvalidLessonId) -> Self {
        AppError::BadRequest(err.to_string())
    }
}

impl From<QueryRejection> for AppError {
    fn from(rejection: QueryRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

impl From<PathRejection> for AppError {
    fn from(rejection: PathRejection) -> Self {
        AppError::BadRequest(rejection.body_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::ErrorContext;
    use crate::routes::lessons::SearchQuery;
    use axum::extract::Query;
    use axum::http::Uri;

    #[test]
    fn test_repository_not_found_maps_to_404_with_context() {
        let err = RepositoryError::not_found_with_context(
            "Lesson not found",
            ErrorContext::new("update_lesson")
                .with_entity("lesson")
                .with_entity_id("abc"),
        );
        let (status, body) = AppError::from(err).into_parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.error, "Lesson not found");
        assert_eq!(body.details, Some(json!({"entity": "lesson", "id": "abc"})));
    }

    #[test]
    fn test_store_failure_is_generic() {
        let err = RepositoryError::connection("socket closed on 10.0.0.5:27017");
        let (status, body) = AppError::from(err).into_parts();
        assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body.error, "Internal server error");
        assert!(body.details.is_none());
    }

    #[test]
    fn test_invalid_order_names_rule() {
        let (status, body) = AppError::from(OrderValidationError::InvalidPhone).into_parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.error, "Phone must contain numbers only");

        let (_, body) = AppError::from(OrderValidationError::MissingFields).into_parts();
        assert_eq!(
            body.details,
            Some(json!({"required": ["name", "phone", "items", "total"]}))
        );
    }

    #[test]
    fn test_query_rejection_is_json_bad_request() {
        let uri: Uri = "/search?q=a&q=b".parse().unwrap();
        let rejection = Query::<SearchQuery>::try_from_uri(&uri).unwrap_err();
        let (status, body) = AppError::from(rejection).into_parts();
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body.code, "BAD_REQUEST");
        assert!(body.error.contains("duplicate field"), "{}", body.error);
    }

    #[test]
    fn test_image_not_found_names_path() {
        let (status, body) = AppError::ImageNotFound("nope.png".to_string()).into_parts();
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body.details, Some(json!({"path": "nope.png"})));
    }
}
