//! Product catalog CLI - database migrations and maintenance tools.
//!
//! # Usage
//!
//! ```bash
//! # Apply database migrations
//! shop-cli migrate
//!
//! # Print all products
//! shop-cli products list
//!
//! # Remove uploaded images no product references
//! shop-cli assets prune --dry-run
//! shop-cli assets prune
//! ```
//!
//! # Commands
//!
//! - `migrate` - Run database migrations
//! - `products list` - List products
//! - `assets prune` - Remove unreferenced uploads

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

mod commands;

#[derive(Parser)]
#[command(name = "shop-cli")]
#[command(author, version, about = "Product catalog CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run database migrations
    Migrate,
    /// Inspect products
    Products {
        #[command(subcommand)]
        action: ProductsAction,
    },
    /// Maintain uploaded assets
    Assets {
        #[command(subcommand)]
        action: AssetsAction,
    },
}

#[derive(Subcommand)]
enum ProductsAction {
    /// List all products
    List,
}

#[derive(Subcommand)]
enum AssetsAction {
    /// Remove uploaded images that no product references
    Prune {
        /// Report what would be removed without removing anything
        #[arg(long)]
        dry_run: bool,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Migrate => commands::migrate::run().await?,
        Commands::Products { action } => match action {
            ProductsAction::List => commands::products::list().await?,
        },
        Commands::Assets { action } => match action {
            AssetsAction::Prune { dry_run } => commands::assets::prune(dry_run).await?,
        },
    }
    Ok(())
}
