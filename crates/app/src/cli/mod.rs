use clap::{Parser, Subcommand};
use emission_app::{config::PosConfig, context::AppContext};

mod cart_file;
mod checkout;
mod gateway;
mod orders;
mod products;

#[derive(Debug, Parser)]
#[command(name = "emission-pos", about = "Emission point-of-sale till", long_about = None)]
pub(crate) struct Cli {
    #[command(flatten)]
    pub(crate) config: PosConfig,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the product catalog
    Products(products::ProductsArgs),

    /// Ring up a cart and take payment
    Checkout(checkout::CheckoutArgs),

    /// Order history
    Orders(orders::OrdersCommand),
}

impl Cli {
    /// Load configuration from `.env`, the environment and CLI arguments.
    pub(crate) fn load() -> Result<Self, clap::Error> {
        // Load .env file if present (ignore if missing)
        _ = dotenvy::dotenv();

        Self::try_parse()
    }

    pub(crate) async fn run(self) -> Result<(), String> {
        let context = AppContext::from_config(&self.config).map_err(|error| error.to_string())?;

        match self.command {
            Commands::Products(args) => products::run(args, &context).await,
            Commands::Checkout(args) => checkout::run(args, &context).await,
            Commands::Orders(command) => orders::run(command, &context).await,
        }
    }
}
