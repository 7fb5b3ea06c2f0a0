use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use super::lessons::{LIST_LESSONS_PATH, SEARCH_LESSONS_PATH};
use super::orders::CREATE_ORDER_PATH;
use super::IMAGES_PREFIX;

pub const ROOT_PATH: &str = "/";
pub const SERVICE_NAME: &str = "EduClass API";

/// Static description of the service returned by `GET /`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceDescriptor {
    pub name: String,
    pub version: String,
    /// Route -> purpose
    pub endpoints: BTreeMap<String, String>,
}

impl ServiceDescriptor {
    pub fn current() -> Self {
        let endpoints = [
            (format!("GET {}", LIST_LESSONS_PATH), "List all lessons"),
            (
                format!("GET {}?q=", SEARCH_LESSONS_PATH),
                "Search lessons by subject, location, instructor or price",
            ),
            (format!("POST {}", CREATE_ORDER_PATH), "Place an order"),
            (format!("PUT {}/:id", LIST_LESSONS_PATH), "Update lesson attributes"),
            (format!("GET {}/:path", IMAGES_PREFIX), "Lesson images"),
        ]
        .into_iter()
        .map(|(route, purpose)| (route, purpose.to_string()))
        .collect();

        Self {
            name: SERVICE_NAME.to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
            endpoints,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_descriptor_lists_every_route() {
        let descriptor = ServiceDescriptor::current();
        assert_eq!(descriptor.name, "EduClass API");
        assert_eq!(descriptor.version, env!("CARGO_PKG_VERSION"));
        assert_eq!(descriptor.endpoints.len(), 5);
        assert!(descriptor.endpoints.contains_key("GET /lessons"));
        assert!(descriptor.endpoints.contains_key("POST /orders"));
        assert!(descriptor.endpoints.contains_key("PUT /lessons/:id"));
    }

    #[test]
    fn test_descriptor_serializes_endpoint_map() {
        let json = serde_json::to_value(ServiceDescriptor::current()).unwrap();
        assert!(json["endpoints"].is_object());
        assert!(json["endpoints"]["GET /search?q="].is_string());
    }
}
