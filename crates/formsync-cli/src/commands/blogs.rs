//! Blogs commands

use serde_json::{Map, Value};

use super::{blog_client, parse_record_id, submit_form};
use crate::output::OutputFormat;
use crate::BlogCommands;

const COLUMNS: &[(&str, &str)] = &[
    ("title", "Title"),
    ("description", "Description"),
    ("createdAt", "Created"),
];

pub async fn handle(action: BlogCommands, api_url: &str, format: OutputFormat) -> Result<(), String> {
    let client = blog_client(api_url)?;

    match action {
        BlogCommands::List => {
            let state = client.refresh().await;
            if let Some(error) = state.error {
                return Err(error);
            }
            format.print_records(&state.records, COLUMNS);
        }
        BlogCommands::Create { title, description } => {
            submit_form(
                &client,
                vec![("title", title), ("description", description)],
                "blog",
            )
            .await?;
        }
        BlogCommands::Update {
            id,
            title,
            description,
        } => {
            let mut payload = Map::new();
            if let Some(title) = title {
                payload.insert("title".to_string(), Value::String(title));
            }
            if let Some(description) = description {
                payload.insert("description".to_string(), Value::String(description));
            }

            client
                .update_record(&parse_record_id(&id), &Value::Object(payload))
                .await
                .map_err(|e| e.to_string())?;
            println!("Updated blog {}", id);
        }
        BlogCommands::Delete { id } => {
            client
                .delete_record(&parse_record_id(&id))
                .await
                .map_err(|e| e.to_string())?;
            println!("Deleted blog {}", id);
        }
    }
    Ok(())
}
