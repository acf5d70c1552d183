//! RocketShoes CLI - Drive the shopping cart from the command line.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart with prices and totals
//! rs-cart show
//!
//! # Add one unit of product 1
//! rs-cart add 1
//!
//! # Set product 1 to 3 units
//! rs-cart update 1 3
//!
//! # Remove product 1
//! rs-cart remove 1
//!
//! # List the catalog
//! rs-cart products
//! ```
//!
//! Configuration is read from the environment (see `rocket_shoes_cart::config`).

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rocket_shoes_cart::NOTICE_TARGET;
use rocket_shoes_core::ProductId;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

mod commands;

#[derive(Parser)]
#[command(name = "rs-cart")]
#[command(author, version, about = "RocketShoes cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart contents and totals
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: ProductId,
    },
    /// Set the quantity of a product already in the cart
    Update {
        /// Product ID
        product_id: ProductId,

        /// New quantity (must be between 1 and the available stock)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
    /// List the products in the catalog
    Products,
}

const DEFAULT_LOG_FILTER: &str = "rocket_shoes_cart=info,rs_cart=info";

/// Build the log filter from `RUST_LOG`, keeping cart notices visible.
fn log_filter(rust_log: Option<&str>) -> EnvFilter {
    let base = rust_log.unwrap_or(DEFAULT_LOG_FILTER);
    EnvFilter::builder().parse_lossy(format!("{base},{NOTICE_TARGET}=warn"))
}

#[tokio::main]
async fn main() {
    let rust_log = std::env::var("RUST_LOG").ok();

    tracing_subscriber::registry()
        .with(log_filter(rust_log.as_deref()))
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = rocket_shoes_cart::CartConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    match cli.command {
        Commands::Show => commands::cart::show(&config)?,
        Commands::Add { product_id } => commands::cart::add(&config, product_id).await?,
        Commands::Remove { product_id } => commands::cart::remove(&config, product_id)?,
        Commands::Update { product_id, amount } => {
            commands::cart::update(&config, product_id, amount).await?;
        }
        Commands::Products => commands::catalog::list(&config).await?,
    }
    Ok(())
}
