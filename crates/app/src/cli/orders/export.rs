use std::{io, path::PathBuf};

use clap::Args;
use emission::export::write_orders_csv_in;
use emission_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ExportOrdersArgs {
    /// Write the CSV to this file instead of stdout
    #[arg(long)]
    out: Option<PathBuf>,
}

pub(crate) async fn run(args: ExportOrdersArgs, context: &AppContext) -> Result<(), String> {
    let orders = context
        .orders
        .list_orders()
        .await
        .map_err(|error| format!("failed to list orders: {}", error.user_message()))?;

    match &args.out {
        Some(path) => {
            let mut csv = Vec::new();

            write_orders_csv_in(&mut csv, &orders, &context.time_zone)
                .map_err(|error| error.to_string())?;

            tokio::fs::write(path, csv)
                .await
                .map_err(|error| format!("failed to write {}: {error}", path.display()))?;

            println!("exported {} orders to {}", orders.len(), path.display());
        }
        None => write_orders_csv_in(io::stdout().lock(), &orders, &context.time_zone)
            .map_err(|error| error.to_string())?,
    }

    Ok(())
}
