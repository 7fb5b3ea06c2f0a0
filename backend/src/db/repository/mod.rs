//! Repository traits for the lesson catalog and order store.
//!
//! Implementations must be `Send + Sync`; one instance is shared by every
//! request for the lifetime of the process.

pub mod error;

use async_trait::async_trait;

pub use error::{ErrorContext, RepositoryError, RepositoryResult};

use crate::models::{Lesson, LessonId, LessonPatch, LessonSearch, NewOrder, Order};

/// Repository trait for lesson operations.
#[async_trait]
pub trait LessonRepository: Send + Sync {
    /// Check that the store is reachable.
    ///
    /// # Returns
    /// * `Ok(true)` if the store answered
    /// * `Err(RepositoryError)` if the check could not be performed
    async fn health_check(&self) -> RepositoryResult<bool>;

    /// Fetch every lesson, in store-native order.
    async fn list_lessons(&self) -> RepositoryResult<Vec<Lesson>>;

    /// Fetch every lesson matching any clause of `search`.
    ///
    /// # Arguments
    /// * `search` - Pattern matched against the text attributes, plus an
    ///   optional exact price
    ///
    /// # Returns
    /// * `Ok(Vec<Lesson>)` - Matching lessons, possibly empty
    /// * `Err(RepositoryError::QueryError)` - If the store rejects the pattern
    async fn search_lessons(&self, search: &LessonSearch) -> RepositoryResult<Vec<Lesson>>;

    /// Fetch a single lesson.
    ///
    /// # Returns
    /// * `Ok(Some(Lesson))` if it exists, `Ok(None)` otherwise
    async fn get_lesson(&self, id: &LessonId) -> RepositoryResult<Option<Lesson>>;

    /// Set the supplied attributes on an existing lesson.
    ///
    /// Attributes not named in `patch` keep their values.
    ///
    /// # Returns
    /// * `Ok(())` if a lesson matched
    /// * `Err(RepositoryError::NotFound)` if no lesson has this ID
    async fn update_lesson(&self, id: &LessonId, patch: &LessonPatch) -> RepositoryResult<()>;
}

/// Repository trait for order operations.
#[async_trait]
pub trait OrderRepository: Send + Sync {
    /// Persist a validated order.
    ///
    /// The store assigns the identifier; the repository stamps the creation
    /// time and the confirmed status.
    ///
    /// # Returns
    /// * `Ok(Order)` - The order exactly as persisted
    async fn insert_order(&self, order: NewOrder) -> RepositoryResult<Order>;
}

/// Everything the HTTP layer needs from a store.
pub trait FullRepository: LessonRepository + OrderRepository {}

impl<T> FullRepository for T where T: LessonRepository + OrderRepository {}
