//! Form field schema
//!
//! Declarative description of a collection's create form. Validation and
//! payload shaping are driven entirely by the schema, so the product and
//! blog forms are just different schema values.

use serde::{Deserialize, Serialize};

/// How a field edits and serializes.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum FieldKind {
    /// Free text, submitted verbatim.
    Text,
    /// Decimal number, parsed before submission and omitted when empty.
    Number,
    /// Boolean toggle, submitted as a JSON boolean.
    Flag,
}

/// One form field.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FieldSpec {
    /// Payload key, e.g. `in_stock`.
    pub name: String,
    /// Label used in validation messages, e.g. `In Stock`.
    pub label: String,
    pub kind: FieldKind,
    pub required: bool,
    /// Value the field starts at and resets to. Empty for text and number
    /// fields, `"true"`/`"false"` for flags.
    pub default: String,
}

impl FieldSpec {
    pub fn text(name: &str, label: &str, required: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Text,
            required,
            default: String::new(),
        }
    }

    pub fn number(name: &str, label: &str) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Number,
            required: false,
            default: String::new(),
        }
    }

    pub fn flag(name: &str, label: &str, default: bool) -> Self {
        Self {
            name: name.to_string(),
            label: label.to_string(),
            kind: FieldKind::Flag,
            required: false,
            default: default.to_string(),
        }
    }
}

/// Ordered field list for one collection's create form.
#[derive(Clone, Debug, Default, Serialize, Deserialize)]
pub struct FormSchema {
    pub fields: Vec<FieldSpec>,
}

impl FormSchema {
    pub fn new(fields: Vec<FieldSpec>) -> Self {
        Self { fields }
    }

    pub fn field(&self, name: &str) -> Option<&FieldSpec> {
        self.fields.iter().find(|f| f.name == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_field_defaults() {
        let schema = FormSchema::new(vec![
            FieldSpec::text("title", "Title", true),
            FieldSpec::number("price", "Price"),
            FieldSpec::flag("in_stock", "In Stock", true),
        ]);

        assert_eq!(schema.field("title").unwrap().default, "");
        assert_eq!(schema.field("in_stock").unwrap().default, "true");
        assert!(schema.field("missing").is_none());
    }
}
