//! Mealcart
//!
//! Command-line storefront: browse and search the food catalog and run a
//! checkout end to end against a simulated payment provider.

mod commands;
mod config;
mod payment;

use clap::{Parser, Subcommand};
use commands::CheckoutRequest;
use config::ConfigLoader;
use mealcart_core::catalog::{CatalogStore, HttpCatalogGateway};
use payment::SimulatedOutcome;
use std::path::PathBuf;
use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use url::Url;

/// Mealcart - food catalog storefront
#[derive(Parser, Debug)]
#[command(name = "mealcart")]
#[command(version, about, long_about = None)]
struct Args {
    /// Path to the configuration file
    #[arg(short, long, default_value = "./mealcart.toml")]
    config: PathBuf,

    /// Override the catalog base URL
    #[arg(long, env = "MEALCART_CATALOG_URL")]
    catalog_url: Option<Url>,

    /// Emit logs as JSON
    #[arg(long, default_value = "false")]
    log_json: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List the catalog
    Browse {
        /// Restrict the listing to names matching this query
        #[arg(short, long, default_value = "")]
        query: String,
    },
    /// Search the catalog
    Search {
        query: String,
    },
    /// Show a single item
    Lookup {
        id: String,
    },
    /// Buy one item
    Checkout {
        /// Catalog id of the item
        #[arg(long)]
        item: String,
        /// Recipient name
        #[arg(long)]
        name: String,
        /// Recipient phone (up to 10 digits)
        #[arg(long)]
        phone: String,
        /// Delivery address
        #[arg(long)]
        address: String,
        /// Scripted payment outcomes, one per attempt
        #[arg(long, value_enum, default_values_t = [SimulatedOutcome::Success])]
        outcome: Vec<SimulatedOutcome>,
        /// Milliseconds before the simulated provider reports back
        #[arg(long, default_value = "500")]
        payment_delay_ms: u64,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Parse command line arguments
    let args = Args::parse();

    // Initialize tracing
    init_tracing(args.log_json);

    tracing::debug!("Starting mealcart v{}", env!("CARGO_PKG_VERSION"));

    // Load configuration
    let loader = ConfigLoader::new(&args.config, args.catalog_url);
    let config = loader.load().map_err(|e| {
        tracing::error!("Failed to load configuration: {}", e);
        e
    })?;
    tracing::debug!(catalog = %config.catalog.base_url, "Configuration loaded");

    let gateway = Arc::new(HttpCatalogGateway::from_config(&config.catalog));
    let store = Arc::new(CatalogStore::new(gateway));

    let result = match args.command {
        Command::Browse { query } => commands::browse(&store, &query).await,
        Command::Search { query } => commands::search(&store, &query).await,
        Command::Lookup { id } => commands::lookup(&store, &id).await,
        Command::Checkout {
            item,
            name,
            phone,
            address,
            outcome,
            payment_delay_ms,
        } => {
            let request = CheckoutRequest {
                item_id: item,
                name,
                phone,
                address,
                outcomes: outcome,
                payment_delay: Duration::from_millis(payment_delay_ms),
            };
            commands::checkout(store, config.payment, request).await
        }
    };

    result.map_err(|e| {
        tracing::error!("{:#}", e);
        e
    })
}

/// Initialize the tracing subscriber with environment-based filtering.
///
/// Logs go to stderr so command output on stdout stays clean.
fn init_tracing(json: bool) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,reqwest=warn,hyper=warn"));

    let registry = tracing_subscriber::registry().with(filter);
    if json {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_writer(std::io::stderr))
            .init();
    } else {
        registry
            .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
            .init();
    }
}
