//! In-memory repository for tests and local development.
//!
//! Lessons and orders live in insertion-ordered vectors behind a
//! `parking_lot::RwLock`. Searches compile the pattern with the `regex`
//! crate, case-insensitively, so a malformed pattern fails the same way a
//! rejected `$regex` would.

use std::fs;
use std::path::Path;

use async_trait::async_trait;
use chrono::Utc;
use parking_lot::RwLock;
use regex::{Regex, RegexBuilder};
use serde_json::Value;
use tracing::{debug, info};

use crate::db::repository::{
    ErrorContext, LessonRepository, OrderRepository, RepositoryError, RepositoryResult,
};
use crate::models::{
    Lesson, LessonAttributes, LessonId, LessonPatch, LessonSearch, NewOrder,
    Order, OrderId, ID_FIELD, TEXT_FIELDS,
};

#[derive(Debug, Default)]
struct LocalData {
    lessons: Vec<Lesson>,
    orders: Vec<Order>,
}

/// In-memory store implementing every repository trait.
#[derive(Debug, Default)]
pub struct LocalRepository {
    data: RwLock<LocalData>,
}

impl LocalRepository {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a lesson from its attributes, generating an ID when none is given.
    pub fn seed_lesson(&self, mut attributes: LessonAttributes) -> RepositoryResult<LessonId> {
        let id = match attributes.remove(ID_FIELD) {
            Some(raw) => parse_seed_id(raw)?,
            None => LessonId::generate(),
        };
        self.data.write().lessons.push(Lesson::new(id, attributes));
        Ok(id)
    }

    /// Load lessons from a JSON file holding an array of lesson objects.
    ///
    /// # Returns
    /// * `Ok(usize)` - Number of lessons loaded
    /// * `Err(RepositoryError::ConfigurationError)` - If the file cannot be read
    /// * `Err(RepositoryError::ValidationError)` - If an entry is not an object
    pub fn seed_from_file<P: AsRef<Path>>(&self, path: P) -> RepositoryResult<usize> {
        let path = path.as_ref();
        let content = fs::read_to_string(path).map_err(|e| {
            RepositoryError::configuration(format!(
                "Failed to read seed file {}: {}",
                path.display(),
                e
            ))
        })?;
        let entries: Vec<Value> = serde_json::from_str(&content).map_err(|e| {
            RepositoryError::validation(format!(
                "Seed file {} is not a JSON array: {}",
                path.display(),
                e
            ))
        })?;

        let mut loaded = 0;
        for entry in entries {
            let Value::Object(attributes) = entry else {
                return Err(RepositoryError::validation(
                    "Every seeded lesson must be a JSON object",
                ));
            };
            self.seed_lesson(attributes)?;
            loaded += 1;
        }

        info!(count = loaded, path = %path.display(), "Seeded lessons into local repository");
        Ok(loaded)
    }

    /// Snapshot of stored orders.
    pub fn orders(&self) -> Vec<Order> {
        self.data.read().orders.clone()
    }

    pub fn lesson_count(&self) -> usize {
        self.data.read().lessons.len()
    }
}

/// Seed files may carry `_id` as a hex string or as `{"$oid": "<hex>"}`.
fn parse_seed_id(raw: Value) -> RepositoryResult<LessonId> {
    let hex = match &raw {
        Value::String(s) => Some(s.as_str()),
        Value::Object(map) => map.get("$oid").and_then(Value::as_str),
        _ => None,
    };
    hex.and_then(|h| LessonId::parse(h).ok())
        .ok_or_else(|| RepositoryError::validation(format!("Invalid seeded lesson ID: {}", raw)))
}

fn compile_pattern(pattern: &str) -> RepositoryResult<Regex> {
    RegexBuilder::new(pattern)
        .case_insensitive(true)
        .build()
        .map_err(|e| {
            RepositoryError::query_with_context(
                e.to_string(),
                ErrorContext::new("search_lessons")
                    .with_entity("lesson")
                    .with_details("invalid pattern"),
            )
        })
}

fn lesson_matches(lesson: &Lesson, regex: &Regex, price: Option<f64>) -> bool {
    let text_match = TEXT_FIELDS
        .iter()
        .filter_map(|field| lesson.get(field).and_then(Value::as_str))
        .any(|text| regex.is_match(text));

    text_match || matches!((price, lesson.price()), (Some(wanted), Some(actual)) if wanted == actual)
}

#[async_trait]
impl LessonRepository for LocalRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        Ok(true)
    }

    async fn list_lessons(&self) -> RepositoryResult<Vec<Lesson>> {
        Ok(self.data.read().lessons.clone())
    }

    async fn search_lessons(&self, search: &LessonSearch) -> RepositoryResult<Vec<Lesson>> {
        let regex = compile_pattern(&search.pattern)?;
        let found: Vec<Lesson> = self
            .data
            .read()
            .lessons
            .iter()
            .filter(|lesson| lesson_matches(lesson, &regex, search.price))
            .cloned()
            .collect();
        debug!(pattern = %search.pattern, matched = found.len(), "Local lesson search");
        Ok(found)
    }

    async fn get_lesson(&self, id: &LessonId) -> RepositoryResult<Option<Lesson>> {
        Ok(self
            .data
            .read()
            .lessons
            .iter()
            .find(|lesson| lesson.id == *id)
            .cloned())
    }

    async fn update_lesson(&self, id: &LessonId, patch: &LessonPatch) -> RepositoryResult<()> {
        let mut data = self.data.write();
        let lesson = data
            .lessons
            .iter_mut()
            .find(|lesson| lesson.id == *id)
            .ok_or_else(|| {
                RepositoryError::not_found_with_context(
                    "Lesson not found",
                    ErrorContext::new("update_lesson")
                        .with_entity("lesson")
                        .with_entity_id(id),
                )
            })?;
        lesson.apply(patch);
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for LocalRepository {
    async fn insert_order(&self, order: NewOrder) -> RepositoryResult<Order> {
        let order = Order::confirm(OrderId::generate(), order, Utc::now());
        self.data.write().orders.push(order.clone());
        Ok(order)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn attrs(value: Value) -> LessonAttributes {
        value.as_object().cloned().unwrap()
    }

    fn seeded() -> LocalRepository {
        let repo = LocalRepository::new();
        repo.seed_lesson(attrs(json!({
            "subject": "Math", "location": "Hendon", "price": 100, "instructor": "Dr. Smith"
        })))
        .unwrap();
        repo.seed_lesson(attrs(json!({
            "subject": "Art", "location": "Colindale", "price": 80, "instructor": "Ms. Lee"
        })))
        .unwrap();
        repo
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive_substring() {
        let repo = seeded();
        let search = LessonSearch::from_term("MAT").unwrap();
        let found = repo.search_lessons(&search).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].subject(), Some("Math"));
    }

    #[tokio::test]
    async fn test_search_matches_price_exactly() {
        let repo = seeded();
        let found = repo
            .search_lessons(&LessonSearch::from_term("80").unwrap())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].subject(), Some("Art"));

        let none = repo
            .search_lessons(&LessonSearch::from_term("81").unwrap())
            .await
            .unwrap();
        assert!(none.is_empty());
    }

    #[tokio::test]
    async fn test_search_honours_pattern_syntax() {
        let repo = seeded();
        let found = repo
            .search_lessons(&LessonSearch::from_term("^a").unwrap())
            .await
            .unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].subject(), Some("Art"));
    }

    #[tokio::test]
    async fn test_search_rejects_invalid_pattern() {
        let repo = seeded();
        let err = repo
            .search_lessons(&LessonSearch::from_term("(").unwrap())
            .await
            .unwrap_err();
        assert!(matches!(err, RepositoryError::QueryError { .. }));
    }

    #[tokio::test]
    async fn test_update_unknown_lesson_is_not_found() {
        let repo = seeded();
        let err = repo
            .update_lesson(&LessonId::generate(), &LessonPatch::default())
            .await
            .unwrap_err();
        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn test_insert_order_confirms() {
        let repo = LocalRepository::new();
        let order = repo
            .insert_order(NewOrder {
                name: "Jane".to_string(),
                phone: "123".to_string(),
                items: vec![json!({"subject": "Math"})],
                total: json!(10),
            })
            .await
            .unwrap();
        assert_eq!(order.status.as_str(), "confirmed");
        assert_eq!(repo.orders(), vec![order]);
    }

    #[test]
    fn test_seed_keeps_given_id() {
        let repo = LocalRepository::new();
        let id = repo
            .seed_lesson(attrs(json!({"_id": "65a1f0c2b3d4e5f601234567", "subject": "Math"})))
            .unwrap();
        assert_eq!(id.to_hex(), "65a1f0c2b3d4e5f601234567");
        assert!(repo.seed_lesson(attrs(json!({"_id": 12}))).is_err());
    }
}
