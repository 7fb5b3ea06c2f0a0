//! Lesson catalog types.
//!
//! Lessons are seeded outside this service and are schemaless at the store
//! level, so a [`Lesson`] keeps every attribute in an open JSON map and only
//! the identifier is typed.

use std::fmt;
use std::str::FromStr;

use bson::oid::ObjectId;
use bson::Bson;
use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use serde_json::{Map, Value};

/// Name of the identifier attribute in stored documents.
pub const ID_FIELD: &str = "_id";

/// Open attribute map of a lesson document.
pub type LessonAttributes = Map<String, Value>;

/// Error returned when a string is not a well-formed lesson identifier.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("Invalid lesson ID: {0}")]
pub struct InvalidLessonId(pub String);

/// Lesson identifier, generated by the store.
///
/// Renders as the 24-digit hex form in JSON.
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash)]
pub struct LessonId(ObjectId);

impl LessonId {
    pub fn new(oid: ObjectId) -> Self {
        LessonId(oid)
    }

    /// Generate a fresh identifier (used by the in-memory store).
    pub fn generate() -> Self {
        LessonId(ObjectId::new())
    }

    /// Parse the 24-digit hex form.
    pub fn parse(raw: &str) -> Result<Self, InvalidLessonId> {
        ObjectId::parse_str(raw)
            .map(LessonId)
            .map_err(|_| InvalidLessonId(raw.to_string()))
    }

    pub fn object_id(&self) -> ObjectId {
        self.0
    }

    pub fn to_hex(&self) -> String {
        self.0.to_hex()
    }
}

impl FromStr for LessonId {
    type Err = InvalidLessonId;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for LessonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0.to_hex())
    }
}

impl From<ObjectId> for LessonId {
    fn from(oid: ObjectId) -> Self {
        LessonId(oid)
    }
}

impl Serialize for LessonId {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_hex())
    }
}

impl<'de> Deserialize<'de> for LessonId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        object_id_from_bson(Bson::deserialize(deserializer)?)
            .map(LessonId)
            .map_err(D::Error::custom)
    }
}

/// Accept either a native ObjectId or its hex string form.
pub(crate) fn object_id_from_bson(value: Bson) -> Result<ObjectId, String> {
    match value {
        Bson::ObjectId(oid) => Ok(oid),
        Bson::String(s) => ObjectId::parse_str(&s).map_err(|e| e.to_string()),
        other => Err(format!("expected an ObjectId, found {:?}", other.element_type())),
    }
}

/// A catalog item: subject, location, price, instructor, plus whatever
/// other attributes the store holds for it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Lesson {
    #[serde(rename = "_id")]
    pub id: LessonId,
    #[serde(flatten)]
    pub attributes: LessonAttributes,
}

impl Lesson {
    pub fn new(id: LessonId, mut attributes: LessonAttributes) -> Self {
        attributes.remove(ID_FIELD);
        Self { id, attributes }
    }

    pub fn subject(&self) -> Option<&str> {
        self.text("subject")
    }

    pub fn location(&self) -> Option<&str> {
        self.text("location")
    }

    pub fn instructor(&self) -> Option<&str> {
        self.text("instructor")
    }

    pub fn price(&self) -> Option<f64> {
        self.attributes.get("price").and_then(Value::as_f64)
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.attributes.get(key)
    }

    fn text(&self, key: &str) -> Option<&str> {
        self.attributes.get(key).and_then(Value::as_str)
    }

    /// Merge a patch: supplied attributes overwrite, the rest stay.
    pub fn apply(&mut self, patch: &LessonPatch) {
        for (key, value) in patch.iter() {
            self.attributes.insert(key.clone(), value.clone());
        }
    }
}

/// Attribute-to-value pairs to merge into an existing lesson.
///
/// The identifier is immutable, so any `_id` key is dropped on construction.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LessonPatch(LessonAttributes);

impl LessonPatch {
    pub fn new(mut attributes: LessonAttributes) -> Self {
        attributes.remove(ID_FIELD);
        Self(attributes)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    pub fn attributes(&self) -> &LessonAttributes {
        &self.0
    }
}

impl From<LessonAttributes> for LessonPatch {
    fn from(attributes: LessonAttributes) -> Self {
        Self::new(attributes)
    }
}
