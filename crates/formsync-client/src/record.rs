//! Collection records
//!
//! Server-owned entities with a stable identifier plus arbitrary domain
//! fields. Records are replaced wholesale on every fetch, never merged.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::error::ApiError;

/// Server-assigned identifier. The product API hands out integers, the blog
/// API strings; both are accepted.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Int(i64),
    Str(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Int(id) => write!(f, "{}", id),
            Self::Str(id) => write!(f, "{}", id),
        }
    }
}

impl From<i64> for RecordId {
    fn from(id: i64) -> Self {
        Self::Int(id)
    }
}

impl From<&str> for RecordId {
    fn from(id: &str) -> Self {
        Self::Str(id.to_string())
    }
}

/// One record of a collection.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Record {
    pub id: RecordId,
    #[serde(flatten)]
    pub fields: Map<String, Value>,
}

impl Record {
    pub fn text(&self, name: &str) -> Option<&str> {
        self.fields.get(name).and_then(Value::as_str)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.fields.get(name).and_then(Value::as_f64)
    }

    pub fn flag(&self, name: &str) -> Option<bool> {
        self.fields.get(name).and_then(Value::as_bool)
    }

    /// Server-side creation timestamp, when the collection provides one.
    pub fn created_at(&self) -> Option<DateTime<Utc>> {
        let raw = self.text("createdAt")?;
        DateTime::parse_from_rfc3339(raw)
            .ok()
            .map(|t| t.with_timezone(&Utc))
    }
}

/// Extract the record sequence from a collection response body.
///
/// Accepts either a bare array or a wrapper object exposing the array under
/// `wrapper_key`. A wrapper object without that key yields the empty
/// sequence rather than an error.
pub(crate) fn parse_collection(body: Value, wrapper_key: &str) -> Result<Vec<Record>, ApiError> {
    let items = match body {
        Value::Array(items) => items,
        Value::Object(mut wrapper) => match wrapper.remove(wrapper_key) {
            Some(Value::Array(items)) => items,
            _ => {
                tracing::warn!(
                    wrapper_key,
                    "collection body is an object without the record sequence"
                );
                Vec::new()
            }
        },
        other => {
            return Err(ApiError::ParseError(format!(
                "expected a record sequence, got {}",
                other
            )));
        }
    };

    items
        .into_iter()
        .map(|item| serde_json::from_value(item).map_err(|e| ApiError::ParseError(e.to_string())))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_bare_sequence() {
        let records = parse_collection(json!([{"id": 1, "title": "A"}]), "blogs").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, RecordId::Int(1));
        assert_eq!(records[0].text("title"), Some("A"));
    }

    #[test]
    fn test_wrapped_sequence() {
        let records = parse_collection(json!({"blogs": [{"id": 2, "title": "B"}]}), "blogs").unwrap();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].id, RecordId::Int(2));
        assert_eq!(records[0].text("title"), Some("B"));
    }

    #[test]
    fn test_wrapper_without_key_is_empty() {
        let records = parse_collection(json!({"data": []}), "blogs").unwrap();
        assert!(records.is_empty());
    }

    #[test]
    fn test_order_preserved() {
        let records = parse_collection(
            json!([{"id": 3, "title": "C"}, {"id": 1, "title": "A"}, {"id": 2, "title": "B"}]),
            "blogs",
        )
        .unwrap();
        let ids: Vec<_> = records.iter().map(|r| r.id.to_string()).collect();
        assert_eq!(ids, vec!["3", "1", "2"]);
    }

    #[test]
    fn test_string_ids_accepted() {
        let records = parse_collection(json!([{"id": "abc-1", "title": "A"}]), "blogs").unwrap();
        assert_eq!(records[0].id, RecordId::Str("abc-1".to_string()));
    }

    #[test]
    fn test_scalar_body_rejected() {
        assert!(parse_collection(json!("nope"), "blogs").is_err());
    }

    #[test]
    fn test_created_at_parsed() {
        let records = parse_collection(
            json!([{"id": 1, "title": "A", "createdAt": "2024-05-01T12:00:00Z"}]),
            "blogs",
        )
        .unwrap();
        let created = records[0].created_at().unwrap();
        assert_eq!(created.to_rfc3339(), "2024-05-01T12:00:00+00:00");
    }
}
