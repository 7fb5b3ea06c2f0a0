//! Repository configuration file support.
//!
//! This module provides utilities for reading repository configuration from
//! TOML configuration files (`educlass.toml`).

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use super::factory::RepositoryType;
use super::repository::RepositoryError;
use crate::db::MongoConfig;

/// Repository configuration from file.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositoryConfig {
    pub repository: RepositorySettings,
    #[serde(default)]
    pub mongo: MongoSettings,
    #[serde(default)]
    pub local: LocalSettings,
}

/// Repository type settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RepositorySettings {
    #[serde(rename = "type")]
    pub repo_type: String,
}

/// MongoDB connection settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MongoSettings {
    #[serde(default)]
    pub uri: String,
}

/// In-memory repository settings.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LocalSettings {
    /// JSON array of lessons loaded at startup
    #[serde(default)]
    pub seed_file: Option<PathBuf>,
}

impl RepositoryConfig {
    /// Load repository configuration from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, RepositoryError> {
        let content = fs::read_to_string(path.as_ref()).map_err(|e| {
            RepositoryError::configuration(format!("Failed to read config file: {}", e))
        })?;

        Self::from_toml(&content)
    }

    /// Parse repository configuration from TOML text.
    pub fn from_toml(content: &str) -> Result<Self, RepositoryError> {
        toml::from_str(content).map_err(|e| {
            RepositoryError::configuration(format!("Failed to parse config file: {}", e))
        })
    }

    /// Get the repository type from configuration.
    pub fn repository_type(&self) -> Result<RepositoryType, String> {
        RepositoryType::from_str(&self.repository.repo_type)
    }

    pub fn seed_file(&self) -> Option<&Path> {
        self.local.seed_file.as_deref()
    }

    /// Convert to MongoConfig if this is a Mongo configuration.
    pub fn to_mongo_config(&self) -> Result<Option<MongoConfig>, RepositoryError> {
        let repo_type = self.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        if repo_type != RepositoryType::Mongo {
            return Ok(None);
        }

        if self.mongo.uri.is_empty() {
            return Err(RepositoryError::configuration(
                "Mongo repository requires 'mongo.uri' setting",
            ));
        }

        MongoConfig::with_uri(self.mongo.uri.clone())
            .map(Some)
            .map_err(RepositoryError::configuration)
    }
}
