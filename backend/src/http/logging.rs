//! Per-request logging middleware.
//!
//! Emits one `tracing` event per request carrying an RFC 3339 timestamp, the
//! method, the path, every header and, when non-empty, the JSON body
//! pretty-printed. The body is buffered and handed on unchanged.

use axum::{
    body::{to_bytes, Body, Bytes},
    extract::{Request, State},
    http::HeaderMap,
    middleware::Next,
    response::{IntoResponse, Response},
};
use chrono::{SecondsFormat, Utc};
use http_body_util::LengthLimitError;
use serde_json::Value;
use tracing::info;

use super::error::AppError;
use super::state::AppState;

pub async fn log_request(State(state): State<AppState>, request: Request, next: Next) -> Response {
    let (parts, body) = request.into_parts();

    let bytes = match to_bytes(body, state.body_limit).await {
        Ok(bytes) => bytes,
        Err(err) => {
            let err = err.into_inner();
            return if err.is::<LengthLimitError>() {
                AppError::PayloadTooLarge.into_response()
            } else {
                AppError::BadRequest(format!("Failed to read request body: {}", err))
                    .into_response()
            };
        }
    };

    let timestamp = Utc::now().to_rfc3339_opts(SecondsFormat::Millis, true);
    let headers = format_headers(&parts.headers);
    match pretty_body(&bytes) {
        Some(body) => info!(
            target: "educlass::request",
            "{} {} {}\nHeaders:\n{}\nBody:\n{}",
            timestamp,
            parts.method,
            parts.uri.path(),
            headers,
            body
        ),
        None => info!(
            target: "educlass::request",
            "{} {} {}\nHeaders:\n{}",
            timestamp,
            parts.method,
            parts.uri.path(),
            headers
        ),
    }

    next.run(Request::from_parts(parts, Body::from(bytes))).await
}

fn format_headers(headers: &HeaderMap) -> String {
    headers
        .iter()
        .map(|(name, value)| {
            format!("  {}: {}", name, value.to_str().unwrap_or("<non-ascii>"))
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Pretty-printed body, or `None` when there is nothing worth logging.
fn pretty_body(bytes: &Bytes) -> Option<String> {
    if bytes.is_empty() {
        return None;
    }
    let value: Value = serde_json::from_slice(bytes).ok()?;
    match &value {
        Value::Null => None,
        Value::Object(map) if map.is_empty() => None,
        _ => serde_json::to_string_pretty(&value).ok(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::http::HeaderValue;

    #[test]
    fn test_pretty_body_skips_empty_payloads() {
        assert_eq!(pretty_body(&Bytes::new()), None);
        assert_eq!(pretty_body(&Bytes::from_static(b"{}")), None);
        assert_eq!(pretty_body(&Bytes::from_static(b"name=jane")), None);
    }

    #[test]
    fn test_pretty_body_indents() {
        let body = pretty_body(&Bytes::from_static(br#"{"price":99}"#)).unwrap();
        assert_eq!(body, "{\n  \"price\": 99\n}");
    }

    #[test]
    fn test_format_headers_lists_each_header() {
        let mut headers = HeaderMap::new();
        headers.insert("content-type", HeaderValue::from_static("application/json"));
        headers.insert("x-trace", HeaderValue::from_static("abc"));
        let text = format_headers(&headers);
        assert!(text.contains("content-type: application/json"));
        assert!(text.contains("x-trace: abc"));
    }
}
