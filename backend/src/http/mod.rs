//! HTTP server module for the EduClass backend.
//!
//! This module provides an axum-based HTTP server that exposes the lesson
//! catalog and order intake as a REST API. It reuses the service layer,
//! repository pattern and route types from the core library.
//!
//! # Architecture
//!
//! ```text
//! ┌──────────────────────────────────────────────────────────┐
//! │  HTTP Layer (axum handlers)                               │
//! │  - CORS, panic recovery, request logging                  │
//! │  - Lenient JSON body parsing                              │
//! │  - Static images                                          │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Route types (routes/)                                    │
//! │  - Order validation, response bodies                      │
//! └───────────────────┬──────────────────────────────────────┘
//!                     │
//! ┌───────────────────▼──────────────────────────────────────┐
//! │  Service + Repository Layer (db/)                         │
//! │  - MongoRepository / LocalRepository                      │
//! └──────────────────────────────────────────────────────────┘
//! ```

pub mod dto;
pub mod error;
pub mod extract;
pub mod handlers;
pub mod images;
pub mod logging;
pub mod router;
pub mod state;

pub use router::create_router;
pub use state::AppState;
