//! Order intake: request shape, validation and the created response.
//!
//! Validation runs in a fixed order and stops at the first failure:
//!
//! 1. `name`, `phone`, `items` and `total` are all present and truthy
//!    (`items` must be a non-empty array)
//! 2. `name` is letters and whitespace only
//! 3. `phone` is digits only
//!
//! The total is stored as the client sent it and is never checked against
//! the items.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;

use crate::models::{NewOrder, Order};

pub const CREATE_ORDER_PATH: &str = "/orders";

pub const ORDER_CREATED_MESSAGE: &str = "Order created successfully";

/// Fields every order must carry.
pub const REQUIRED_FIELDS: [&str; 4] = ["name", "phone", "items", "total"];

static NAME_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[A-Za-z\s]+$").expect("valid name regex"));
static PHONE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]+$").expect("valid phone regex"));

/// Rejection reasons, in the order they are checked.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OrderValidationError {
    #[error("Missing required fields: name, phone, items, total")]
    MissingFields,
    #[error("Name must contain letters only")]
    InvalidName,
    #[error("Phone must contain numbers only")]
    InvalidPhone,
}

/// Raw `POST /orders` body. Every field is kept as untyped JSON until
/// [`validate_order`] has looked at it.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct OrderRequest {
    #[serde(default)]
    pub name: Option<Value>,
    #[serde(default)]
    pub phone: Option<Value>,
    #[serde(default)]
    pub items: Option<Value>,
    #[serde(default)]
    pub total: Option<Value>,
}

impl OrderRequest {
    /// Pick the order fields out of a parsed body. Anything other than an
    /// object yields an empty request.
    pub fn from_body(body: Value) -> Self {
        match body {
            Value::Object(mut map) => Self {
                name: map.remove("name"),
                phone: map.remove("phone"),
                items: map.remove("items"),
                total: map.remove("total"),
            },
            _ => Self::default(),
        }
    }
}

fn is_truthy(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) => false,
        Some(Value::Bool(b)) => *b,
        Some(Value::Number(n)) => n.as_f64().map_or(true, |f| f != 0.0),
        Some(Value::String(s)) => !s.is_empty(),
        Some(Value::Array(_)) | Some(Value::Object(_)) => true,
    }
}

// Numbers are checked (and stored) in their decimal form.
fn as_text(value: &Value) -> Option<String> {
    match value {
        Value::String(s) => Some(s.clone()),
        Value::Number(n) => Some(n.to_string()),
        _ => None,
    }
}

/// Check a raw order and produce the validated fields.
pub fn validate_order(request: OrderRequest) -> Result<NewOrder, OrderValidationError> {
    let present = is_truthy(request.name.as_ref())
        && is_truthy(request.phone.as_ref())
        && is_truthy(request.total.as_ref())
        && matches!(&request.items, Some(Value::Array(items)) if !items.is_empty());
    if !present {
        return Err(OrderValidationError::MissingFields);
    }

    let name = request
        .name
        .as_ref()
        .and_then(as_text)
        .filter(|name| NAME_RE.is_match(name))
        .ok_or(OrderValidationError::InvalidName)?;

    let phone = request
        .phone
        .as_ref()
        .and_then(as_text)
        .filter(|phone| PHONE_RE.is_match(phone))
        .ok_or(OrderValidationError::InvalidPhone)?;

    let (Some(Value::Array(items)), Some(total)) = (request.items, request.total) else {
        return Err(OrderValidationError::MissingFields);
    };

    Ok(NewOrder {
        name,
        phone,
        items,
        total,
    })
}

/// Body of a successful `POST /orders`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderCreatedResponse {
    pub message: String,
    #[serde(rename = "orderId")]
    pub order_id: String,
    pub order: Order,
}

impl OrderCreatedResponse {
    pub fn new(order: Order) -> Self {
        Self {
            message: ORDER_CREATED_MESSAGE.to_string(),
            order_id: order.id.to_hex(),
            order,
        }
    }
}
