//! Form Controller
//!
//! Owns the field values, validation errors, and submission status for one
//! collection's create form. Everything here is pure state transition; the
//! network round-trip is driven by the facade in `lib.rs` so no lock is
//! ever held across an await.

use serde::Serialize;
use serde_json::{Map, Number, Value};
use std::collections::HashMap;

use crate::schema::{FieldKind, FormSchema};

/// Submission lifecycle of the form.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub enum SubmissionStatus {
    #[default]
    Idle,
    Submitting,
    Succeeded,
    Failed(String),
}

impl SubmissionStatus {
    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Succeeded | Self::Failed(_))
    }
}

/// Field state machine for one create form.
pub struct FormController {
    schema: FormSchema,
    values: HashMap<String, String>,
    errors: HashMap<String, String>,
    status: SubmissionStatus,
}

impl FormController {
    pub fn new(schema: FormSchema) -> Self {
        let values = schema
            .fields
            .iter()
            .map(|f| (f.name.clone(), f.default.clone()))
            .collect();

        Self {
            schema,
            values,
            errors: HashMap::new(),
            status: SubmissionStatus::Idle,
        }
    }

    pub fn schema(&self) -> &FormSchema {
        &self.schema
    }

    pub fn values(&self) -> &HashMap<String, String> {
        &self.values
    }

    pub fn errors(&self) -> &HashMap<String, String> {
        &self.errors
    }

    pub fn status(&self) -> &SubmissionStatus {
        &self.status
    }

    /// Record an edit. The field's stale validation message is dropped
    /// immediately (errors are only recomputed at submit time), and a
    /// finished submission goes back to Idle.
    pub fn update_field(&mut self, name: &str, value: impl Into<String>) {
        self.values.insert(name.to_string(), value.into());
        self.errors.remove(name);
        if self.status.is_terminal() {
            self.status = SubmissionStatus::Idle;
        }
    }

    /// Required-field and number-format check. Pure function of the current
    /// values; returns the full error map, empty when the form is valid.
    pub fn validate(&self) -> HashMap<String, String> {
        let mut errors = HashMap::new();

        for field in &self.schema.fields {
            let value = self.values.get(&field.name).map(String::as_str).unwrap_or("");
            let trimmed = value.trim();

            if field.required && trimmed.is_empty() {
                errors.insert(field.name.clone(), format!("{} is required", field.label));
                continue;
            }
            if field.kind == FieldKind::Number && !trimmed.is_empty() && trimmed.parse::<f64>().is_err()
            {
                errors.insert(field.name.clone(), format!("{} must be a number", field.label));
            }
        }

        errors
    }

    /// JSON payload for the create request: text fields verbatim, non-empty
    /// number fields parsed, empty number fields omitted, flags as booleans.
    pub fn build_payload(&self) -> Value {
        let mut payload = Map::new();

        for field in &self.schema.fields {
            let value = self.values.get(&field.name).map(String::as_str).unwrap_or("");
            match field.kind {
                FieldKind::Text => {
                    payload.insert(field.name.clone(), Value::String(value.to_string()));
                }
                FieldKind::Number => {
                    let trimmed = value.trim();
                    if trimmed.is_empty() {
                        continue;
                    }
                    if let Some(number) = trimmed.parse::<f64>().ok().and_then(Number::from_f64) {
                        payload.insert(field.name.clone(), Value::Number(number));
                    }
                }
                FieldKind::Flag => {
                    payload.insert(field.name.clone(), Value::Bool(value.trim() == "true"));
                }
            }
        }

        Value::Object(payload)
    }

    /// Reset every field to its schema default and drop the errors. The
    /// status is left alone so a Succeeded form still reads as succeeded.
    pub fn reset(&mut self) {
        for field in &self.schema.fields {
            self.values
                .insert(field.name.clone(), field.default.clone());
        }
        self.errors.clear();
    }

    /// First step of a submit attempt: collapse a terminal status back to
    /// Idle, then validate. Returns false (with the errors stored) when the
    /// form must not reach the network.
    pub fn begin_submit(&mut self) -> bool {
        if self.status.is_terminal() {
            self.status = SubmissionStatus::Idle;
        }

        let errors = self.validate();
        if !errors.is_empty() {
            self.errors = errors;
            return false;
        }

        self.errors.clear();
        self.status = SubmissionStatus::Submitting;
        true
    }

    /// Terminal transition once the create request resolved. Success resets
    /// the fields to their initial values.
    pub fn complete_submit(&mut self, outcome: Result<(), String>) {
        match outcome {
            Ok(()) => {
                self.status = SubmissionStatus::Succeeded;
                self.reset();
            }
            Err(message) => {
                self.status = SubmissionStatus::Failed(message);
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::FieldSpec;
    use serde_json::json;

    fn blog_schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::text("title", "Title", true),
            FieldSpec::text("description", "Description", true),
        ])
    }

    fn product_schema() -> FormSchema {
        FormSchema::new(vec![
            FieldSpec::text("name", "Name", true),
            FieldSpec::text("description", "Description", false),
            FieldSpec::number("price", "Price"),
            FieldSpec::flag("in_stock", "In Stock", true),
        ])
    }

    #[test]
    fn test_valid_form_has_no_errors() {
        let mut form = FormController::new(blog_schema());
        form.update_field("title", "First post");
        form.update_field("description", "Hello");
        assert!(form.validate().is_empty());
    }

    #[test]
    fn test_missing_required_fields_reported_exactly() {
        let mut form = FormController::new(blog_schema());
        form.update_field("title", "   ");

        let errors = form.validate();
        assert_eq!(errors.len(), 2);
        assert_eq!(errors["title"], "Title is required");
        assert_eq!(errors["description"], "Description is required");
    }

    #[test]
    fn test_whitespace_only_is_empty() {
        let mut form = FormController::new(blog_schema());
        form.update_field("title", "\t \n");
        form.update_field("description", "ok");

        let errors = form.validate();
        assert_eq!(errors.len(), 1);
        assert!(errors.contains_key("title"));
    }

    #[test]
    fn test_non_numeric_price_rejected() {
        let mut form = FormController::new(product_schema());
        form.update_field("name", "Laptop");
        form.update_field("price", "cheap");

        let errors = form.validate();
        assert_eq!(errors["price"], "Price must be a number");
    }

    #[test]
    fn test_edit_clears_stale_error() {
        let mut form = FormController::new(blog_schema());
        assert!(!form.begin_submit());
        assert!(form.errors().contains_key("title"));

        form.update_field("title", "First post");
        assert!(!form.errors().contains_key("title"));
        assert!(form.errors().contains_key("description"));
    }

    #[test]
    fn test_rejected_submit_keeps_status_idle() {
        let mut form = FormController::new(blog_schema());
        assert!(!form.begin_submit());
        assert_eq!(*form.status(), SubmissionStatus::Idle);
    }

    #[test]
    fn test_payload_shapes_fields() {
        let mut form = FormController::new(product_schema());
        form.update_field("name", "Laptop");
        form.update_field("price", "999.99");

        let payload = form.build_payload();
        assert_eq!(
            payload,
            json!({
                "name": "Laptop",
                "description": "",
                "price": 999.99,
                "in_stock": true,
            })
        );
    }

    #[test]
    fn test_empty_price_omitted() {
        let mut form = FormController::new(product_schema());
        form.update_field("name", "Laptop");

        let payload = form.build_payload();
        assert!(payload.get("price").is_none());
    }

    #[test]
    fn test_success_resets_to_defaults() {
        let mut form = FormController::new(product_schema());
        form.update_field("name", "Laptop");
        form.update_field("in_stock", "false");
        assert!(form.begin_submit());

        form.complete_submit(Ok(()));
        assert_eq!(*form.status(), SubmissionStatus::Succeeded);
        assert_eq!(form.values()["name"], "");
        assert_eq!(form.values()["in_stock"], "true");
    }

    #[test]
    fn test_failure_keeps_values() {
        let mut form = FormController::new(blog_schema());
        form.update_field("title", "First post");
        form.update_field("description", "Hello");
        assert!(form.begin_submit());

        form.complete_submit(Err("Name already exists".to_string()));
        assert_eq!(
            *form.status(),
            SubmissionStatus::Failed("Name already exists".to_string())
        );
        assert_eq!(form.values()["title"], "First post");
    }

    #[test]
    fn test_edit_collapses_terminal_status() {
        let mut form = FormController::new(blog_schema());
        form.update_field("title", "First post");
        form.update_field("description", "Hello");
        assert!(form.begin_submit());
        form.complete_submit(Err("boom".to_string()));

        form.update_field("title", "Second try");
        assert_eq!(*form.status(), SubmissionStatus::Idle);
    }

    #[test]
    fn test_resubmit_after_failure_starts_from_idle() {
        let mut form = FormController::new(blog_schema());
        form.update_field("title", "First post");
        form.update_field("description", "Hello");
        assert!(form.begin_submit());
        form.complete_submit(Err("boom".to_string()));

        assert!(form.begin_submit());
        assert_eq!(*form.status(), SubmissionStatus::Submitting);
    }
}
