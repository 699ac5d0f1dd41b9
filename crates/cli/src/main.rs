//! WhatsStore CLI - Database setup, seeding, and a terminal shopper.
//!
//! # Usage
//!
//! ```bash
//! # Run storefront database migrations
//! ws-cli migrate
//!
//! # Load vendors and products from YAML
//! ws-cli seed fixtures/stores.yaml
//!
//! # Show a store's catalog
//! ws-cli store zeeluxe
//!
//! # Build a cart and check out
//! ws-cli cart add zeeluxe 7d0f3c5e-...
//! ws-cli cart show
//! ws-cli checkout zeeluxe
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations (including the session table)
//! - `seed` - Upsert vendors and products from a YAML file
//! - `store` - Resolve a store and print its grouped catalog
//! - `cart` - Manage the local cart (`WHATSSTORE_CART_DIR`, default `.whatsstore`)
//! - `checkout` - Print the WhatsApp order message and link for a store

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "ws-cli")]
#[command(author, version, about = "WhatsStore CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Seed vendors and products from a YAML file
    Seed {
        /// Path to the YAML seed file
        file: String,
    },
    /// Show a store's catalog
    Store {
        /// Store slug (case-insensitive)
        slug: String,
    },
    /// Manage the local cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Print the WhatsApp checkout message and link for a store
    Checkout {
        /// Store slug (case-insensitive)
        slug: String,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// Add one unit of a product from a store
    Add {
        /// Store slug
        slug: String,
        /// Product id
        product_id: String,
    },
    /// Add one unit to a line
    Increase {
        /// Product id
        product_id: String,
    },
    /// Remove one unit from a line
    Decrease {
        /// Product id
        product_id: String,
    },
    /// Remove a line
    Remove {
        /// Product id
        product_id: String,
    },
    /// Empty the cart
    Clear,
    /// Print the cart
    Show,
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "ws_cli=info,whatsstore_storefront=warn".into()),
        )
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    match cli.command {
        Commands::Migrate => commands::migrate::storefront().await?,
        Commands::Seed { file } => commands::seed::stores(&file).await?,
        Commands::Store { slug } => commands::store::show(&slug).await?,
        Commands::Cart { action } => {
            let cart = commands::cart::LocalCart::open()?;
            match action {
                CartAction::Add { slug, product_id } => cart.add(&slug, &product_id).await?,
                CartAction::Increase { product_id } => cart.increase(&product_id)?,
                CartAction::Decrease { product_id } => cart.decrease(&product_id)?,
                CartAction::Remove { product_id } => cart.remove(&product_id)?,
                CartAction::Clear => cart.clear(),
                CartAction::Show => cart.show(),
            }
        }
        Commands::Checkout { slug } => commands::cart::LocalCart::open()?.checkout(&slug).await?,
    }
    Ok(())
}
