//! Order types.

use std::fmt;

use bson::oid::ObjectId;
use bson::Bson;
use chrono::{DateTime, Utc};
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::Value;

use super::lesson::object_id_from_bson;

/// Order identifier, generated by the store.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct OrderId(ObjectId);

impl OrderId {
    pub fn new(oid: ObjectId) -> Self {
        OrderId(oid)
    }

    pub fn generate() -> Self {
        OrderId(ObjectId::new())
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl fmt::Display for OrderId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl Serialize for OrderId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for OrderId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        object_id_from_bson(Bson::deserialize(deserializer)?)
            .map(OrderId)
            .map_err(D::Error::custom)
    }
}

/// Order lifecycle status. Orders are only ever created confirmed.
#[derive(Debug, Copy, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderStatus {
    #[default]
    Confirmed,
}

impl OrderStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            OrderStatus::Confirmed => "confirmed",
        }
    }
}

/// Order fields that passed request validation, ready to be persisted.
///
/// Line items are an uninterpreted copy of what the client sent, and the
/// total is trusted as given.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewOrder {
    pub name: String,
    pub phone: String,
    pub items: Vec<Value>,
    pub total: Value,
}

/// A persisted order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Order {
    #[serde(rename = "_id")]
    pub id: OrderId,
    pub name: String,
    pub phone: String,
    pub items: Vec<Value>,
    pub total: Value,
    pub created_at: DateTime<Utc>,
    pub status: OrderStatus,
}

impl Order {
    /// Stamp a validated order with its identifier and creation time.
    pub fn confirm(id: OrderId, order: NewOrder, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            name: order.name,
            phone: order.phone,
            items: order.items,
            total: order.total,
            created_at,
            status: OrderStatus::Confirmed,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn sample() -> NewOrder {
        NewOrder {
            name: "Jane Doe".to_string(),
            phone: "5551234567".to_string(),
            items: vec![json!({"lessonId": "x", "subject": "Math", "quantity": 1, "price": 42})],
            total: json!(42),
        }
    }

    #[test]
    fn test_confirm_sets_status_and_timestamp() {
        let now = Utc::now();
        let order = Order::confirm(OrderId::generate(), sample(), now);
        assert_eq!(order.status, OrderStatus::Confirmed);
        assert_eq!(order.created_at, now);
        assert_eq!(order.name, "Jane Doe");
    }

    #[test]
    fn test_order_json_shape() {
        let id = OrderId::generate();
        let order = Order::confirm(id, sample(), Utc::now());
        let value = serde_json::to_value(&order).unwrap();

        assert_eq!(value["_id"], json!(id.to_hex()));
        assert_eq!(value["status"], json!("confirmed"));
        assert_eq!(value["total"], json!(42));
        assert!(value.get("createdAt").is_some());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_status_as_str() {
        assert_eq!(OrderStatus::Confirmed.as_str(), "confirmed");
        assert_eq!(OrderStatus::default(), OrderStatus::Confirmed);
    }
}
