//! Store-side document shapes for the `orders` collection.
//!
//! The domain [`Order`] renders `createdAt` as an RFC 3339 string for JSON
//! clients; in the store it is a native BSON date.

use bson::oid::ObjectId;
use bson::{DateTime as BsonDateTime, Document};
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::db::repository::RepositoryResult;
use crate::models::{NewOrder, Order, OrderId, OrderStatus};

/// An order as written to MongoDB.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderDocument {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub name: String,
    pub phone: String,
    pub items: Vec<Value>,
    pub total: Value,
    pub created_at: BsonDateTime,
    pub status: OrderStatus,
}

impl OrderDocument {
    /// Build the insertable document; the store assigns `_id`.
    pub fn from_new(order: NewOrder, created_at: BsonDateTime) -> Self {
        Self {
            id: None,
            name: order.name,
            phone: order.phone,
            items: order.items,
            total: order.total,
            created_at,
            status: OrderStatus::Confirmed,
        }
    }

    pub fn to_document(&self) -> RepositoryResult<Document> {
        Ok(bson::to_document(self)?)
    }

    /// Convert back to the domain order once the identifier is known.
    pub fn into_order(self, id: ObjectId) -> Order {
        Order {
            id: OrderId::new(id),
            name: self.name,
            phone: self.phone,
            items: self.items,
            total: self.total,
            created_at: self.created_at.to_chrono(),
            status: self.status,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_uses_bson_date_and_camel_case() {
        let doc = OrderDocument::from_new(
            NewOrder {
                name: "Jane Doe".to_string(),
                phone: "5551234567".to_string(),
                items: vec![json!({"subject": "Math", "quantity": 2})],
                total: json!("42.50"),
            },
            BsonDateTime::now(),
        )
        .to_document()
        .unwrap();

        assert!(doc.get("_id").is_none());
        assert!(doc.get_datetime("createdAt").is_ok());
        assert_eq!(doc.get_str("status").unwrap(), "confirmed");
        assert_eq!(doc.get_str("name").unwrap(), "Jane Doe");
        assert_eq!(doc.get_array("items").unwrap().len(), 1);
        assert_eq!(doc.get_str("total").unwrap(), "42.50");
    }

    #[test]
    fn test_into_order_keeps_identifier() {
        let oid = ObjectId::new();
        let created = BsonDateTime::now();
        let order = OrderDocument::from_new(
            NewOrder {
                name: "Jane".to_string(),
                phone: "1".to_string(),
                items: vec![],
                total: json!(1),
            },
            created,
        )
        .into_order(oid);

        assert_eq!(order.id.object_id(), oid);
        assert_eq!(order.created_at, created.to_chrono());
    }
}
