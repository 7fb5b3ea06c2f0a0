//! Repository factory for dependency injection.
//!
//! This module provides utilities for creating and configuring repository instances
//! based on runtime configuration.

use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

use tracing::info;

use super::repo_config::RepositoryConfig;
use super::repositories::LocalRepository;
#[cfg(feature = "mongo-repo")]
use super::repositories::MongoRepository;
use super::repository::{FullRepository, RepositoryError, RepositoryResult};
use super::MongoConfig;

/// Repository type configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RepositoryType {
    /// MongoDB implementation
    Mongo,
    /// In-memory local repository
    Local,
}

impl FromStr for RepositoryType {
    type Err = String;

    /// Parse repository type from string ("mongo", "mongodb", "local", "memory").
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "mongo" | "mongodb" => Ok(Self::Mongo),
            "local" | "memory" => Ok(Self::Local),
            _ => Err(format!("Unknown repository type: {}", s)),
        }
    }
}

impl RepositoryType {
    /// Get repository type from environment variable.
    ///
    /// Reads `REPOSITORY_TYPE`. When unset, MongoDB is selected if that
    /// backend is compiled in, otherwise Local.
    pub fn from_env() -> Result<Self, String> {
        match std::env::var("REPOSITORY_TYPE") {
            Ok(val) => val.parse(),
            Err(_) => Ok(Self::default_backend()),
        }
    }

    // Priority: mongo > local
    fn default_backend() -> Self {
        if cfg!(feature = "mongo-repo") {
            Self::Mongo
        } else {
            Self::Local
        }
    }
}

/// Repository factory for creating repository instances.
///
/// # Example
/// ```ignore
/// use educlass::db::{MongoConfig, RepositoryFactory, RepositoryType};
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let config = MongoConfig::from_env()?;
///     let _mongo = RepositoryFactory::create(RepositoryType::Mongo, Some(&config)).await?;
///
///     let local_repo = RepositoryFactory::create_local();
///     Ok(())
/// }
/// ```
pub struct RepositoryFactory;

impl RepositoryFactory {
    /// Create a repository instance based on type.
    ///
    /// # Arguments
    /// * `repo_type` - Type of repository to create
    /// * `mongo_config` - Connection settings (required for Mongo)
    ///
    /// # Returns
    /// * `Ok(Arc<dyn FullRepository>)` - Shared repository instance
    /// * `Err(RepositoryError)` - If creation fails
    pub async fn create(
        repo_type: RepositoryType,
        mongo_config: Option<&MongoConfig>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        match repo_type {
            RepositoryType::Mongo => {
                let config = mongo_config.ok_or_else(|| {
                    RepositoryError::configuration("Mongo repository requires MongoConfig")
                })?;
                Self::create_mongo(config).await
            }
            RepositoryType::Local => Ok(Self::create_local()),
        }
    }

    /// Connect a MongoDB repository.
    #[cfg(feature = "mongo-repo")]
    pub async fn create_mongo(config: &MongoConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo = MongoRepository::connect(config).await?;
        Ok(Arc::new(repo))
    }

    /// Connect a MongoDB repository.
    #[cfg(not(feature = "mongo-repo"))]
    pub async fn create_mongo(_config: &MongoConfig) -> RepositoryResult<Arc<dyn FullRepository>> {
        Err(RepositoryError::configuration(
            "Mongo repository feature not enabled",
        ))
    }

    /// Create an empty in-memory local repository.
    pub fn create_local() -> Arc<dyn FullRepository> {
        Arc::new(LocalRepository::new())
    }

    /// Create an in-memory repository, optionally seeded from a JSON file.
    pub fn create_local_seeded(
        seed_file: Option<&Path>,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo = LocalRepository::new();
        if let Some(path) = seed_file {
            repo.seed_from_file(path)?;
        }
        Ok(Arc::new(repo))
    }

    /// Create repository from environment configuration.
    ///
    /// Reads `REPOSITORY_TYPE`, then `MONGODB_URI` for Mongo or
    /// `LESSONS_SEED_FILE` for Local.
    pub async fn from_env() -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = RepositoryType::from_env().map_err(RepositoryError::configuration)?;
        info!(?repo_type, "Creating repository from environment");

        match repo_type {
            RepositoryType::Mongo => {
                let config = MongoConfig::from_env().map_err(RepositoryError::configuration)?;
                Self::create_mongo(&config).await
            }
            RepositoryType::Local => {
                let seed = std::env::var("LESSONS_SEED_FILE").ok().map(PathBuf::from);
                Self::create_local_seeded(seed.as_deref())
            }
        }
    }

    /// Create repository from a TOML configuration file.
    pub async fn from_config_file<P: AsRef<Path>>(
        config_path: P,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let config = RepositoryConfig::from_file(config_path)?;
        Self::from_repository_config(&config).await
    }

    /// Create repository from a RepositoryConfig instance.
    pub async fn from_repository_config(
        config: &RepositoryConfig,
    ) -> RepositoryResult<Arc<dyn FullRepository>> {
        let repo_type = config.repository_type().map_err(|e| {
            RepositoryError::configuration(format!("Invalid repository type: {}", e))
        })?;

        match repo_type {
            RepositoryType::Mongo => {
                let mongo_config = config.to_mongo_config()?.ok_or_else(|| {
                    RepositoryError::configuration("Mongo repository requires a [mongo] section")
                })?;
                Self::create_mongo(&mongo_config).await
            }
            RepositoryType::Local => Self::create_local_seeded(config.seed_file()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repository::LessonRepository;

    #[test]
    fn test_repository_type_from_str() {
        assert_eq!("mongo".parse::<RepositoryType>().unwrap(), RepositoryType::Mongo);
        assert_eq!("MongoDB".parse::<RepositoryType>().unwrap(), RepositoryType::Mongo);
        assert_eq!("local".parse::<RepositoryType>().unwrap(), RepositoryType::Local);
        assert_eq!("memory".parse::<RepositoryType>().unwrap(), RepositoryType::Local);
        assert!("postgres".parse::<RepositoryType>().is_err());
    }

    #[tokio::test]
    async fn test_create_local() {
        let repo = RepositoryFactory::create(RepositoryType::Local, None)
            .await
            .unwrap();
        assert!(repo.health_check().await.unwrap());
        assert!(repo.list_lessons().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_create_mongo_without_config_fails() {
        let result = RepositoryFactory::create(RepositoryType::Mongo, None).await;
        assert!(matches!(
            result,
            Err(RepositoryError::ConfigurationError { .. })
        ));
    }
}
