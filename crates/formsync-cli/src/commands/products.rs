//! Products commands

use serde_json::{Map, Value};

use super::{parse_record_id, product_client, submit_form};
use crate::output::OutputFormat;
use crate::ProductCommands;

const COLUMNS: &[(&str, &str)] = &[
    ("name", "Name"),
    ("description", "Description"),
    ("price", "Price"),
    ("in_stock", "In Stock"),
];

pub async fn handle(
    action: ProductCommands,
    api_url: &str,
    format: OutputFormat,
) -> Result<(), String> {
    let client = product_client(api_url)?;

    match action {
        ProductCommands::List => {
            let state = client.refresh().await;
            if let Some(error) = state.error {
                return Err(error);
            }
            format.print_records(&state.records, COLUMNS);
        }
        ProductCommands::Create {
            name,
            description,
            price,
            in_stock,
        } => {
            submit_form(
                &client,
                vec![
                    ("name", name),
                    ("description", description),
                    ("price", price),
                    ("in_stock", in_stock),
                ],
                "product",
            )
            .await?;
        }
        ProductCommands::Update {
            id,
            name,
            description,
            price,
            in_stock,
        } => {
            let mut payload = Map::new();
            if let Some(name) = name {
                payload.insert("name".to_string(), Value::String(name));
            }
            if let Some(description) = description {
                payload.insert("description".to_string(), Value::String(description));
            }
            if let Some(price) = price {
                payload.insert("price".to_string(), serde_json::json!(price));
            }
            if let Some(in_stock) = in_stock {
                payload.insert("in_stock".to_string(), Value::Bool(in_stock));
            }

            client
                .update_record(&parse_record_id(&id), &Value::Object(payload))
                .await
                .map_err(|e| e.to_string())?;
            println!("Updated product {}", id);
        }
        ProductCommands::Delete { id } => {
            client
                .delete_record(&parse_record_id(&id))
                .await
                .map_err(|e| e.to_string())?;
            println!("Deleted product {}", id);
        }
    }
    Ok(())
}
