//! MongoDB repository implementation.
//!
//! One [`mongodb::Client`] is opened at startup and shared by every request;
//! the driver's own pool handles concurrency. Lessons are read as raw
//! documents and decoded into [`Lesson`]; orders go through
//! [`models::OrderDocument`].
//!
//! ## Configuration
//!
//! Environment variables:
//! - `MONGODB_URI`: Connection string (required)
//!
//! The database name is fixed to [`DATABASE_NAME`].

use async_trait::async_trait;
use bson::{doc, Bson, Document};
use futures::TryStreamExt;
use mongodb::{Client, Collection, Database};
use tracing::{debug, info};

use crate::db::config::MongoConfig;
use crate::db::repository::{
    ErrorContext, LessonRepository, OrderRepository, RepositoryError, RepositoryResult,
};
use crate::models::{Lesson, LessonId, LessonPatch, LessonSearch, NewOrder, Order, TEXT_FIELDS};

pub mod models;

use models::OrderDocument;

/// Database holding both collections.
pub const DATABASE_NAME: &str = "educlass";
/// Collection of catalog lessons, seeded outside this service.
pub const LESSONS_COLLECTION: &str = "lessons";
/// Collection of placed orders.
pub const ORDERS_COLLECTION: &str = "orders";

/// Repository backed by the `educlass` MongoDB database.
#[derive(Clone, Debug)]
pub struct MongoRepository {
    database: Database,
}

impl MongoRepository {
    /// Connect and verify the server answers.
    ///
    /// The driver connects lazily, so a `ping` is issued here to surface a
    /// bad URI or unreachable server before any request is served.
    ///
    /// # Returns
    /// * `Ok(MongoRepository)` - Connected repository
    /// * `Err(RepositoryError::ConnectionError)` - If the server cannot be reached
    pub async fn connect(config: &MongoConfig) -> RepositoryResult<Self> {
        let client = Client::with_uri_str(&config.uri)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("connect"))?;
        let database = client.database(DATABASE_NAME);

        database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("ping"))?;

        info!(database = DATABASE_NAME, "Connected to MongoDB");
        Ok(Self { database })
    }

    fn lessons(&self) -> Collection<Document> {
        self.database.collection(LESSONS_COLLECTION)
    }

    fn orders(&self) -> Collection<Document> {
        self.database.collection(ORDERS_COLLECTION)
    }

    async fn find_lessons(
        &self,
        filter: Document,
        operation: &str,
    ) -> RepositoryResult<Vec<Lesson>> {
        let cursor = self
            .lessons()
            .find(filter)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(operation))?;
        let documents: Vec<Document> = cursor
            .try_collect()
            .await
            .map_err(|e| RepositoryError::from(e).with_operation(operation))?;

        documents
            .into_iter()
            .map(|doc| bson::from_document::<Lesson>(doc).map_err(RepositoryError::from))
            .collect()
    }
}

/// Build the `$or` filter for a lesson search.
///
/// The pattern is handed to `$regex` as-is, so regular-expression syntax in
/// the query term is interpreted by the server.
pub fn search_filter(search: &LessonSearch) -> Document {
    let mut clauses: Vec<Bson> = TEXT_FIELDS
        .iter()
        .map(|field| {
            let mut clause = Document::new();
            clause.insert(
                *field,
                doc! { "$regex": search.pattern.as_str(), "$options": "i" },
            );
            Bson::Document(clause)
        })
        .collect();

    if let Some(price) = search.price {
        clauses.push(Bson::Document(doc! { "price": price }));
    }

    doc! { "$or": clauses }
}

#[async_trait]
impl LessonRepository for MongoRepository {
    async fn health_check(&self) -> RepositoryResult<bool> {
        self.database
            .run_command(doc! { "ping": 1 })
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("health_check"))?;
        Ok(true)
    }

    async fn list_lessons(&self) -> RepositoryResult<Vec<Lesson>> {
        self.find_lessons(doc! {}, "list_lessons").await
    }

    async fn search_lessons(&self, search: &LessonSearch) -> RepositoryResult<Vec<Lesson>> {
        let filter = search_filter(search);
        debug!(filter = %filter, "MongoDB lesson search");
        self.find_lessons(filter, "search_lessons").await
    }

    async fn get_lesson(&self, id: &LessonId) -> RepositoryResult<Option<Lesson>> {
        let found = self
            .lessons()
            .find_one(doc! { "_id": id.object_id() })
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("get_lesson"))?;

        found
            .map(|doc| bson::from_document::<Lesson>(doc).map_err(RepositoryError::from))
            .transpose()
    }

    async fn update_lesson(&self, id: &LessonId, patch: &LessonPatch) -> RepositoryResult<()> {
        let set = bson::to_document(patch.attributes())?;
        let result = self
            .lessons()
            .update_one(doc! { "_id": id.object_id() }, doc! { "$set": set })
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("update_lesson"))?;

        if result.matched_count == 0 {
            return Err(RepositoryError::not_found_with_context(
                "Lesson not found",
                ErrorContext::new("update_lesson")
                    .with_entity("lesson")
                    .with_entity_id(id),
            ));
        }
        Ok(())
    }
}

#[async_trait]
impl OrderRepository for MongoRepository {
    async fn insert_order(&self, order: NewOrder) -> RepositoryResult<Order> {
        let document = OrderDocument::from_new(order, bson::DateTime::now());
        let result = self
            .orders()
            .insert_one(document.to_document()?)
            .await
            .map_err(|e| RepositoryError::from(e).with_operation("insert_order"))?;

        let oid = result.inserted_id.as_object_id().ok_or_else(|| {
            RepositoryError::internal_with_context(
                "Store returned a non-ObjectId identifier",
                ErrorContext::new("insert_order").with_entity("order"),
            )
        })?;
        Ok(document.into_order(oid))
    }
}
