//! FormSync CLI
//!
//! Command-line interface for FormSync collection workflows.
//!
//! # Usage
//!
//! ```bash
//! formsync products list
//! formsync products create --name "Laptop" --price 999.99
//! formsync products delete 2
//! formsync blogs create --title "First post" --description "Hello"
//! formsync blogs list --format json
//! formsync health
//! ```

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod config;
mod output;

const DEFAULT_API_URL: &str = "http://localhost:8000";

#[derive(Parser)]
#[command(name = "formsync")]
#[command(version = "0.1.0")]
#[command(about = "FormSync Command Line Interface", long_about = None)]
struct Cli {
    /// API endpoint URL
    #[arg(long, env = "FORMSYNC_API_URL")]
    api_url: Option<String>,

    /// Output format
    #[arg(long, short)]
    format: Option<output::OutputFormat>,

    /// Profile name from config file
    #[arg(long, short)]
    profile: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Manage products
    Products {
        #[command(subcommand)]
        action: ProductCommands,
    },
    /// Manage blogs
    Blogs {
        #[command(subcommand)]
        action: BlogCommands,
    },
    /// Check backend health
    Health,
    /// Configure CLI
    Config {
        #[command(subcommand)]
        action: ConfigCommands,
    },
}

#[derive(Subcommand)]
enum ProductCommands {
    /// List all products
    List,
    /// Create a new product
    Create {
        #[arg(long, default_value = "")]
        name: String,
        #[arg(long, default_value = "")]
        description: String,
        #[arg(long, default_value = "")]
        price: String,
        #[arg(long, default_value = "true")]
        in_stock: String,
    },
    /// Update an existing product
    Update {
        id: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        description: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        in_stock: Option<bool>,
    },
    /// Delete a product
    Delete { id: String },
}

#[derive(Subcommand)]
enum BlogCommands {
    /// List all blogs
    List,
    /// Create a new blog
    Create {
        #[arg(long, default_value = "")]
        title: String,
        #[arg(long, default_value = "")]
        description: String,
    },
    /// Update an existing blog
    Update {
        id: String,
        #[arg(long)]
        title: Option<String>,
        #[arg(long)]
        description: Option<String>,
    },
    /// Delete a blog
    Delete { id: String },
}

#[derive(Subcommand)]
enum ConfigCommands {
    /// Set configuration value
    Set { key: String, value: String },
    /// Get configuration value
    Get { key: String },
    /// List all configuration
    List,
    /// Initialize configuration
    Init,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    let config = config::Config::load(cli.profile.as_deref()).unwrap_or_default();
    let api_url = cli
        .api_url
        .or(config.api_url)
        .unwrap_or_else(|| DEFAULT_API_URL.to_string());
    let format = cli
        .format
        .or_else(|| {
            config
                .default_format
                .as_deref()
                .and_then(output::OutputFormat::from_name)
        })
        .unwrap_or(output::OutputFormat::Table);
    tracing::debug!(%api_url, "resolved API endpoint");

    let result = match cli.command {
        Commands::Products { action } => commands::products::handle(action, &api_url, format).await,
        Commands::Blogs { action } => commands::blogs::handle(action, &api_url, format).await,
        Commands::Health => commands::health(&api_url, format).await,
        Commands::Config { action } => commands::config::handle(action).await,
    };

    if let Err(e) = result {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
