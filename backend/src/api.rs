//! Public API surface for the backend.
//!
//! This file consolidates the types that appear in HTTP request and response
//! bodies. All of them derive Serialize and/or Deserialize.

pub use crate::models::Lesson;
pub use crate::models::LessonAttributes;
pub use crate::models::LessonId;
pub use crate::models::LessonPatch;
pub use crate::models::NewOrder;
pub use crate::models::Order;
pub use crate::models::OrderId;
pub use crate::models::OrderStatus;
pub use crate::routes::landing::ServiceDescriptor;
pub use crate::routes::lessons::LessonUpdatedResponse;
pub use crate::routes::lessons::SearchQuery;
pub use crate::routes::orders::OrderCreatedResponse;
pub use crate::routes::orders::OrderRequest;
