use std::{io, path::PathBuf, sync::Arc};

use clap::Args;
use emission::{invoice::Invoice, money, orders::PaymentMethod};
use emission_app::{checkout::CheckoutOutcome, context::AppContext};

use crate::cli::{cart_file::CartFile, gateway::TerminalGateway};

#[derive(Debug, Args)]
pub(crate) struct CheckoutArgs {
    /// YAML file describing the customer, coupon and cart lines
    #[arg(long)]
    cart: PathBuf,

    /// Payment method (cash, card, upi)
    #[arg(long)]
    method: PaymentMethod,

    /// Write the printable HTML invoice to this file
    #[arg(long)]
    invoice_out: Option<PathBuf>,
}

pub(crate) async fn run(args: CheckoutArgs, context: &AppContext) -> Result<(), String> {
    let cart_file = CartFile::load(&args.cart)
        .await
        .map_err(|error| error.to_string())?;

    let catalog = context
        .catalog
        .list_products()
        .await
        .map_err(|error| format!("failed to load products: {}", error.user_message()))?;

    let (mut session, settings) = context
        .open_session()
        .await
        .map_err(|error| format!("failed to load store settings: {}", error.user_message()))?;

    cart_file
        .fill(&mut session, &catalog)
        .map_err(|error| error.to_string())?;

    if let Some(code) = &cart_file.coupon {
        session
            .apply_coupon(context.coupons.as_ref(), code)
            .await
            .map_err(|error| error.user_message())?;
    }

    let summary = session.pricing().map_err(|error| error.to_string())?;

    println!("Subtotal: {}", money::format(&summary.subtotal()));
    if summary.discount().to_minor_units() > 0 {
        println!("Discount: -{}", money::format(&summary.discount()));
    }
    println!("Total:    {}", money::format(&summary.grand_total()));

    let checkout = context.checkout(Arc::new(TerminalGateway));

    let order = match checkout.run(&mut session, args.method).await {
        Ok(CheckoutOutcome::Completed(order)) => order,
        Ok(CheckoutOutcome::Cancelled) => {
            println!("payment cancelled; no order was recorded");
            return Ok(());
        }
        Err(error) => return Err(error.user_message()),
    };

    let invoice = Invoice::new(&order, &settings.merchant)
        .with_theme(settings.theme.clone())
        .with_time_zone(context.time_zone.clone());

    invoice
        .write_text(io::stdout().lock())
        .map_err(|error| format!("failed to print receipt: {error}"))?;

    if let Some(path) = &args.invoice_out {
        let html = invoice
            .render_html()
            .map_err(|error| format!("failed to render invoice: {error}"))?;

        tokio::fs::write(path, html)
            .await
            .map_err(|error| format!("failed to write invoice to {}: {error}", path.display()))?;

        println!("invoice written to {}", path.display());
    }

    Ok(())
}
