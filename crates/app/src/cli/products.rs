use clap::Args;
use emission::{money, products::Product};
use emission_app::context::AppContext;

#[derive(Debug, Args)]
pub(crate) struct ProductsArgs {
    /// Only show products whose name or category contains this term
    #[arg(long)]
    search: Option<String>,

    /// Hide out-of-stock products
    #[arg(long)]
    in_stock: bool,
}

pub(crate) async fn run(args: ProductsArgs, context: &AppContext) -> Result<(), String> {
    let catalog = context
        .catalog
        .list_products()
        .await
        .map_err(|error| format!("failed to list products: {}", error.user_message()))?;

    let products: Vec<&Product> = match &args.search {
        Some(term) => catalog.search(term).collect(),
        None => catalog.iter().collect(),
    };

    let mut shown = 0_usize;

    for product in products
        .into_iter()
        .filter(|product| !args.in_stock || product.in_stock)
    {
        shown += 1;

        println!(
            "{id}\t{name}\t{price}\t{category}{stock}",
            id = product.id,
            name = product.name,
            price = money::format(&product.base_price()),
            category = product.category.as_deref().unwrap_or("-"),
            stock = if product.in_stock { "" } else { "\t(out of stock)" },
        );
    }

    if shown == 0 {
        println!("no products found");
    }

    Ok(())
}
