//! Service layer: one function per use case, generic over the repository.
//!
//! Handlers call these rather than the repository traits directly so the
//! rules that sit above a single store call (empty search term, identifier
//! stripping, read-back after update) live in one place.

use tracing::debug;

use super::repository::{
    ErrorContext, LessonRepository, OrderRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Lesson, LessonId, LessonPatch, LessonSearch, NewOrder, Order};

/// Check whether the store is reachable.
pub async fn health_check<R: LessonRepository + ?Sized>(repo: &R) -> RepositoryResult<bool> {
    repo.health_check().await
}

/// Every lesson in the store.
pub async fn list_lessons<R: LessonRepository + ?Sized>(
    repo: &R,
) -> RepositoryResult<Vec<Lesson>> {
    repo.list_lessons().await
}

/// Lessons matching a free-text term.
///
/// An absent or empty term returns the same result as [`list_lessons`].
pub async fn search_lessons<R: LessonRepository + ?Sized>(
    repo: &R,
    term: Option<&str>,
) -> RepositoryResult<Vec<Lesson>> {
    match term.and_then(LessonSearch::from_term) {
        Some(search) => {
            debug!(pattern = %search.pattern, price = ?search.price, "Searching lessons");
            repo.search_lessons(&search).await
        }
        None => repo.list_lessons().await,
    }
}

/// Persist a validated order and return it as stored.
pub async fn place_order<R: OrderRepository + ?Sized>(
    repo: &R,
    order: NewOrder,
) -> RepositoryResult<Order> {
    repo.insert_order(order).await
}

/// Merge `patch` into a lesson and return the lesson as it now reads.
///
/// An empty patch performs no write; the current document is returned if it
/// exists.
///
/// # Returns
/// * `Ok(Lesson)` - The full, updated lesson
/// * `Err(RepositoryError::NotFound)` - If no lesson has this ID
pub async fn update_lesson<R: LessonRepository + ?Sized>(
    repo: &R,
    id: &LessonId,
    patch: &LessonPatch,
) -> RepositoryResult<Lesson> {
    if !patch.is_empty() {
        repo.update_lesson(id, patch).await?;
    }

    repo.get_lesson(id).await?.ok_or_else(|| {
        RepositoryError::not_found_with_context(
            "Lesson not found",
            ErrorContext::new("update_lesson")
                .with_entity("lesson")
                .with_entity_id(id),
        )
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::repositories::LocalRepository;
    use serde_json::{json, Value};

    fn repo() -> (LocalRepository, LessonId) {
        let repo = LocalRepository::new();
        let id = repo
            .seed_lesson(
                json!({"subject": "Math", "location": "Hendon", "price": 100, "instructor": "Dr. Smith", "spaces": 5})
                    .as_object()
                    .cloned()
                    .unwrap(),
            )
            .unwrap();
        repo.seed_lesson(
            json!({"subject": "English", "location": "Brent", "price": 90, "instructor": "Mr. Jones"})
                .as_object()
                .cloned()
                .unwrap(),
        )
        .unwrap();
        (repo, id)
    }

    #[tokio::test]
    async fn test_empty_search_lists_everything() {
        let (repo, _) = repo();
        let all = list_lessons(&repo).await.unwrap();
        assert_eq!(search_lessons(&repo, Some("")).await.unwrap(), all);
        assert_eq!(search_lessons(&repo, None).await.unwrap(), all);
    }

    #[tokio::test]
    async fn test_search_matches_any_text_field() {
        let (repo, _) = repo();
        let by_location = search_lessons(&repo, Some("brent")).await.unwrap();
        assert_eq!(by_location.len(), 1);
        assert_eq!(by_location[0].subject(), Some("English"));

        let by_instructor = search_lessons(&repo, Some("smith")).await.unwrap();
        assert_eq!(by_instructor.len(), 1);
        assert_eq!(by_instructor[0].subject(), Some("Math"));
    }

    #[tokio::test]
    async fn test_update_changes_only_supplied_fields() {
        let (repo, id) = repo();
        let patch = LessonPatch::new(json!({"price": 99}).as_object().cloned().unwrap());
        let updated = update_lesson(&repo, &id, &patch).await.unwrap();

        assert_eq!(updated.price(), Some(99.0));
        assert_eq!(updated.subject(), Some("Math"));
        assert_eq!(updated.get("spaces"), Some(&Value::from(5)));
        assert_eq!(updated.id, id);
    }

    #[tokio::test]
    async fn test_empty_patch_returns_current_lesson() {
        let (repo, id) = repo();
        let before = repo.get_lesson(&id).await.unwrap().unwrap();
        let after = update_lesson(&repo, &id, &LessonPatch::default()).await.unwrap();
        assert_eq!(before, after);

        let missing = update_lesson(&repo, &LessonId::generate(), &LessonPatch::default()).await;
        assert!(missing.unwrap_err().is_not_found());
    }
}
