//! Application state for the HTTP server.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{ServerConfig, DEFAULT_BODY_LIMIT, DEFAULT_IMAGES_DIR};
use crate::db::repository::FullRepository;

/// Shared application state passed to all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Repository instance for database operations
    pub repository: Arc<dyn FullRepository>,
    /// Root directory of `/images`
    pub images_dir: Arc<PathBuf>,
    /// Maximum accepted request body, in bytes
    pub body_limit: usize,
}

impl AppState {
    /// Create a new application state with the given repository and default
    /// server settings.
    pub fn new(repository: Arc<dyn FullRepository>) -> Self {
        Self {
            repository,
            images_dir: Arc::new(PathBuf::from(DEFAULT_IMAGES_DIR)),
            body_limit: DEFAULT_BODY_LIMIT,
        }
    }

    pub fn from_config(repository: Arc<dyn FullRepository>, config: &ServerConfig) -> Self {
        Self {
            repository,
            images_dir: Arc::new(config.images_dir.clone()),
            body_limit: config.body_limit,
        }
    }

    pub fn with_images_dir(mut self, images_dir: impl Into<PathBuf>) -> Self {
        self.images_dir = Arc::new(images_dir.into());
        self
    }

    pub fn with_body_limit(mut self, body_limit: usize) -> Self {
        self.body_limit = body_limit;
        self
    }
}
