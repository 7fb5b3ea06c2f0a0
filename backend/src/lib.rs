//! # EduClass Backend
//!
//! REST backend for browsing, searching and booking lessons.
//!
//! Lessons are seeded into the store by an external process; this crate
//! serves them, lets clients search them by free text, accepts orders and
//! applies partial updates to lesson records. The store is MongoDB in
//! production and an in-memory repository for tests and local development.
//!
//! ## Architecture
//!
//! - [`models`]: Lesson, order and search domain types
//! - [`db`]: Repository ports, MongoDB and in-memory adapters, service layer
//! - [`routes`]: Route-level request/response types and order validation
//! - [`config`]: Server settings read from the environment
//! - [`http`]: Axum router, middleware and handlers
//! - [`api`]: Flat re-export of every type that crosses the HTTP boundary

// Allow large error types - RepositoryError contains rich context for debugging
#![allow(clippy::result_large_err)]

pub mod api;
pub mod config;

pub mod db;
pub mod models;

pub mod routes;

#[cfg(feature = "http-server")]
pub mod http;
