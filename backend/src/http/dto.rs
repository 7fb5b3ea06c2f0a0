//! Data Transfer Objects for the HTTP API.
//!
//! Route bodies live in [`crate::routes`]; only the transport-level health
//! probe is defined here.

use serde::{Deserialize, Serialize};

pub use crate::api::{
    Lesson, LessonUpdatedResponse, Order, OrderCreatedResponse, SearchQuery, ServiceDescriptor,
};

/// Health check response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,
    /// API version
    pub version: String,
    /// Database connection status
    pub database: String,
}
