//! CLI Commands

pub mod blogs;
pub mod config;
pub mod products;

use colored::Colorize;

use formsync_client::{
    CollectionClient, FieldSpec, FormSchema, RecordId, SessionConfig, SubmissionStatus,
};

use crate::output::OutputFormat;

/// Client bound to the product collection.
pub fn product_client(api_url: &str) -> Result<CollectionClient, String> {
    let schema = FormSchema::new(vec![
        FieldSpec::text("name", "Name", true),
        FieldSpec::text("description", "Description", false),
        FieldSpec::number("price", "Price"),
        FieldSpec::flag("in_stock", "In Stock", true),
    ]);
    collection_client(api_url, "/products", "products", schema)
}

/// Client bound to the blog collection.
pub fn blog_client(api_url: &str) -> Result<CollectionClient, String> {
    let schema = FormSchema::new(vec![
        FieldSpec::text("title", "Title", true),
        FieldSpec::text("description", "Description", true),
    ]);
    collection_client(api_url, "/api/blogs", "blogs", schema)
}

fn collection_client(
    api_url: &str,
    collection_path: &str,
    wrapper_key: &str,
    schema: FormSchema,
) -> Result<CollectionClient, String> {
    CollectionClient::new(SessionConfig {
        base_url: api_url.to_string(),
        collection_path: collection_path.to_string(),
        wrapper_key: wrapper_key.to_string(),
        schema,
    })
    .map_err(|e| e.to_string())
}

/// Parse a CLI record id: integers as-is, anything else as a string id.
pub fn parse_record_id(raw: &str) -> RecordId {
    match raw.parse::<i64>() {
        Ok(id) => RecordId::Int(id),
        Err(_) => RecordId::Str(raw.to_string()),
    }
}

/// Shared create flow: feed the form, submit, report the outcome. The
/// submit refetches the collection on success, so the reported count is
/// the server's.
pub async fn submit_form(
    client: &CollectionClient,
    values: Vec<(&str, String)>,
    noun: &str,
) -> Result<(), String> {
    for (name, value) in values {
        client.update_field(name, value);
    }

    match client.submit().await {
        SubmissionStatus::Succeeded => {
            let state = client.collection();
            println!(
                "{} ({} records in collection)",
                format!("Created {}", noun).green(),
                state.records.len()
            );
            Ok(())
        }
        SubmissionStatus::Failed(message) => Err(message),
        _ => {
            let mut lines: Vec<String> = client.form_errors().values().cloned().collect();
            lines.sort();
            Err(lines.join("; "))
        }
    }
}

/// Backend liveness probe (served by the blog backend).
pub async fn health(api_url: &str, format: OutputFormat) -> Result<(), String> {
    let client = blog_client(api_url)?;
    let health = client.health().await.map_err(|e| e.to_string())?;
    format.print_value(&health);
    Ok(())
}
