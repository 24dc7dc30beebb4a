//! Mountain Harvest CLI - cart and catalog from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Browse the catalog
//! mh-cli catalog products --category fresh --sort price_asc
//! mh-cli catalog product 3
//! mh-cli catalog news
//! mh-cli catalog site
//!
//! # Work with the cart
//! mh-cli cart add 3 -q 2
//! mh-cli cart set 3 5
//! mh-cli cart remove 3
//! mh-cli cart show
//! mh-cli cart clear
//! ```
//!
//! # Commands
//!
//! - `cart` - Show or change the persisted cart
//! - `catalog` - Browse products, news and site settings
//!
//! Configuration comes from the environment (see
//! [`mountain_harvest_storefront::config`]). Set `RUST_LOG` to change
//! verbosity.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use mountain_harvest_core::{ArticleId, ProductId};
use mountain_harvest_storefront::config::StorefrontConfig;
use mountain_harvest_storefront::error::AppError;
use mountain_harvest_storefront::state::AppState;

mod commands;

use commands::catalog::ProductsArgs;

#[derive(Parser)]
#[command(name = "mh-cli")]
#[command(author, version, about = "Mountain Harvest storefront CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show or change the cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// Browse the catalog
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
}

#[derive(Subcommand)]
enum CartAction {
    /// List cart lines and totals
    Show,
    /// Add a product from the catalog
    Add {
        /// Product ID
        id: ProductId,

        /// Quantity to add (non-numeric input counts as 1)
        #[arg(short, long, default_value = "1")]
        quantity: String,
    },
    /// Remove a product
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Set the quantity of a product already in the cart (0 or less removes it)
    Set {
        /// Product ID
        id: ProductId,

        /// New quantity
        #[arg(allow_negative_numbers = true)]
        quantity: i64,
    },
    /// Empty the cart
    Clear,
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    Products(ProductsArgs),
    /// Show one product
    Product {
        /// Product ID
        id: ProductId,
    },
    /// List news articles
    News {
        /// Page number (1-based)
        #[arg(long, default_value_t = 1)]
        page: u32,

        /// Articles per page
        #[arg(long, default_value_t = 6)]
        limit: u32,
    },
    /// Show one news article
    Article {
        /// Article ID
        id: ArticleId,
    },
    /// Show the storefront's site settings (brand, hero, contact details)
    Site,
}

#[tokio::main]
async fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "mountain_harvest_cli=info,mountain_harvest_storefront=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_target(false)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(e.exit_code());
    }
}

async fn run(cli: Cli) -> Result<(), AppError> {
    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config)?;

    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&state),
            CartAction::Add { id, quantity } => {
                commands::cart::add(&state, id, &quantity).await?;
            }
            CartAction::Remove { id } => commands::cart::remove(&state, id),
            CartAction::Set { id, quantity } => commands::cart::set(&state, id, quantity),
            CartAction::Clear => commands::cart::clear(&state),
        },
        Commands::Catalog { action } => match action {
            CatalogAction::Products(args) => commands::catalog::products(&state, args).await?,
            CatalogAction::Product { id } => commands::catalog::product(&state, id).await?,
            CatalogAction::News { page, limit } => {
                commands::catalog::news(&state, page, limit).await?;
            }
            CatalogAction::Article { id } => commands::catalog::article(&state, id).await?,
            CatalogAction::Site => commands::catalog::site(&state).await?,
        },
    }
    Ok(())
}
