//! Database configuration and environment variable handling.

use std::env;

/// Configuration for connecting to MongoDB.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MongoConfig {
    /// Connection string
    pub uri: String,
}

impl MongoConfig {
    /// Create configuration from environment variables.
    ///
    /// # Environment Variables
    /// - `MONGODB_URI` (required): Connection string
    ///
    /// # Errors
    /// Returns an error if the variable is missing or empty.
    pub fn from_env() -> Result<Self, String> {
        let uri = env::var("MONGODB_URI")
            .map_err(|_| "MONGODB_URI environment variable not set".to_string())?;
        Self::with_uri(uri)
    }

    /// Create a configuration from a connection string.
    pub fn with_uri(uri: impl Into<String>) -> Result<Self, String> {
        let uri = uri.into();
        if uri.trim().is_empty() {
            return Err("MongoDB connection string is empty".to_string());
        }
        Ok(Self { uri })
    }
}
