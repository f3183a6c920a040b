//! Magento bridge CLI: database migrations and management tools.
//!
//! # Usage
//!
//! ```bash
//! # Run admin database migrations
//! magbridge migrate
//!
//! # Show stored settings (the token is masked)
//! magbridge settings get
//!
//! # Change a setting
//! magbridge settings set magento_url https://shop.example
//!
//! # List menu versions of a shop
//! magbridge menu versions --shop example.myshopify.com
//!
//! # Send the product mapping to Magento
//! magbridge products push-mapping
//! ```

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "magbridge")]
#[command(author, version, about = "Magento bridge CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Read or change Magento connection settings
    Settings {
        #[command(subcommand)]
        action: SettingsAction,
    },
    /// Inspect collection menu versions
    Menu {
        #[command(subcommand)]
        action: MenuAction,
    },
    /// Product mapping tools
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
}

#[derive(Subcommand)]
enum SettingsAction {
    /// Print one setting, or all of them
    Get {
        /// Setting key (`magento_url`, `magento_push_endpoint`, `magento_token`)
        key: Option<String>,
    },
    /// Store a setting
    Set {
        /// Setting key
        key: String,
        /// New value
        value: String,
    },
}

#[derive(Subcommand)]
enum MenuAction {
    /// List the versions of a shop, newest first
    Versions {
        /// Shop domain, e.g. `example.myshopify.com`
        #[arg(short, long)]
        shop: String,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// Send every product mapping to the saved Magento push endpoint
    PushMapping {
        /// Request timeout in seconds
        #[arg(long, default_value_t = 30)]
        timeout_secs: u64,
    },
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await,
        Commands::Settings { action } => match action {
            SettingsAction::Get { key } => commands::settings::get(key.as_deref()).await,
            SettingsAction::Set { key, value } => commands::settings::set(&key, &value).await,
        },
        Commands::Menu { action } => match action {
            MenuAction::Versions { shop } => commands::menu::versions(&shop).await,
        },
        Commands::Products { action } => match action {
            ProductsAction::PushMapping { timeout_secs } => {
                commands::products::push_mapping(std::time::Duration::from_secs(timeout_secs))
                    .await
            }
        },
    }
}
