use clap::{Args, Subcommand};
use emission_app::context::AppContext;

mod export;

#[derive(Debug, Args)]
pub(crate) struct OrdersCommand {
    #[command(subcommand)]
    command: OrdersSubcommand,
}

#[derive(Debug, Subcommand)]
enum OrdersSubcommand {
    /// Export orders as CSV
    Export(export::ExportOrdersArgs),
}

pub(crate) async fn run(command: OrdersCommand, context: &AppContext) -> Result<(), String> {
    match command.command {
        OrdersSubcommand::Export(args) => export::run(args, context).await,
    }
}
