//! Output formatting

use clap::ValueEnum;
use colored::Colorize;
use formsync_client::Record;
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;

#[derive(Debug, Clone, Copy, ValueEnum)]
pub enum OutputFormat {
    Table,
    Json,
    Yaml,
}

impl OutputFormat {
    pub fn from_name(name: &str) -> Option<Self> {
        match name.to_lowercase().as_str() {
            "table" => Some(Self::Table),
            "json" => Some(Self::Json),
            "yaml" => Some(Self::Yaml),
            _ => None,
        }
    }

    /// Print one serializable value (health payloads, single records).
    pub fn print_value<T: Serialize>(&self, data: &T) {
        match self {
            OutputFormat::Yaml => {
                println!("{}", serde_yaml::to_string(data).unwrap_or_default());
            }
            _ => {
                println!("{}", serde_json::to_string_pretty(data).unwrap_or_default());
            }
        }
    }

    /// Print a record listing. `columns` pairs a record field with its
    /// table header.
    pub fn print_records(&self, records: &[Record], columns: &[(&str, &str)]) {
        match self {
            OutputFormat::Json | OutputFormat::Yaml => self.print_value(&records),
            OutputFormat::Table => {
                if records.is_empty() {
                    println!("{}", "No records yet.".dimmed());
                    return;
                }

                let mut builder = Builder::default();
                let mut header = vec!["ID".to_string()];
                header.extend(columns.iter().map(|(_, label)| label.to_string()));
                builder.push_record(header);

                for record in records {
                    let mut row = vec![record.id.to_string()];
                    row.extend(columns.iter().map(|(field, _)| cell(record, field)));
                    builder.push_record(row);
                }

                let mut table = builder.build();
                table.with(Style::rounded());
                println!("{}", table);
            }
        }
    }
}

fn cell(record: &Record, field: &str) -> String {
    if field == "createdAt" {
        return record
            .created_at()
            .map(|t| t.format("%Y-%m-%d").to_string())
            .unwrap_or_else(|| "-".to_string());
    }

    match record.fields.get(field) {
        Some(Value::String(text)) => text.clone(),
        Some(Value::Bool(true)) => "yes".to_string(),
        Some(Value::Bool(false)) => "no".to_string(),
        Some(value) => value.to_string(),
        None => "-".to_string(),
    }
}
