//! Error types for FormSync
//!
//! Every error is scoped to a single operation and leaves the client usable
//! for a retry; nothing here is fatal to the process.

use serde_json::Value;
use thiserror::Error;

/// Failure of one API operation.
#[derive(Clone, Debug, Error, PartialEq, Eq)]
pub enum ApiError {
    /// Server answered with a non-2xx status. `message` is already
    /// normalized from the error body.
    #[error("{message}")]
    RequestFailed { status: u16, message: String },

    /// The request never completed.
    #[error("Network error: {0}")]
    NetworkError(String),

    /// Response body was not the JSON the operation expected.
    #[error("Parse error: {0}")]
    ParseError(String),
}

/// Client construction failures.
#[derive(Debug, Error)]
pub enum ClientError {
    #[error("Invalid base URL: {0}")]
    InvalidBaseUrl(String),
}

/// Derive a human-readable message from an error response body.
///
/// Extraction strategies, in order: a string `detail` field, a string
/// `message` field, a non-string `detail` serialized, the serialized body
/// itself, and finally the generic templated message.
pub(crate) fn failure_message(status: u16, body: &str) -> String {
    if let Ok(value) = serde_json::from_str::<Value>(body) {
        if let Some(detail) = value.get("detail").and_then(Value::as_str) {
            return detail.to_string();
        }
        if let Some(message) = value.get("message").and_then(Value::as_str) {
            return message.to_string();
        }
        if let Some(detail) = value.get("detail") {
            return detail.to_string();
        }
        if !value.is_null() {
            return value.to_string();
        }
    }
    format!("Request failed ({})", status)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detail_string_wins() {
        let message = failure_message(409, r#"{"detail":"Name already exists"}"#);
        assert_eq!(message, "Name already exists");
    }

    #[test]
    fn test_message_string_fallback() {
        let message = failure_message(400, r#"{"message":"Failed to create blog"}"#);
        assert_eq!(message, "Failed to create blog");
    }

    #[test]
    fn test_structured_detail_serialized() {
        let message = failure_message(422, r#"{"detail":[{"loc":["body","name"]}]}"#);
        assert_eq!(message, r#"[{"loc":["body","name"]}]"#);
    }

    #[test]
    fn test_body_without_known_keys_serialized() {
        let message = failure_message(500, r#"{"oops":true}"#);
        assert_eq!(message, r#"{"oops":true}"#);
    }

    #[test]
    fn test_unparsable_body_templated() {
        assert_eq!(failure_message(500, "<html>"), "Request failed (500)");
        assert_eq!(failure_message(502, ""), "Request failed (502)");
    }

    #[test]
    fn test_null_body_templated() {
        assert_eq!(failure_message(500, "null"), "Request failed (500)");
    }
}
