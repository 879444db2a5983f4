//! Cart files
//!
//! A YAML description of a sale for the `checkout` command:
//!
//! ```yaml
//! customer:
//!   name: Asha Rao
//!   phone: "9876543210"
//! coupon: SAVE300
//! items:
//!   - product: 665f1c2e9b1d4a0012ab34cd
//!     quantity: 2
//!     add_on: true
//!     size: M
//! ```

use std::path::Path;

use emission::{
    customer::CustomerInfo,
    products::{Catalog, ProductId},
};
use emission_app::session::PosSession;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub(crate) enum CartFileError {
    #[error("failed to read cart file: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid cart file: {0}")]
    Parse(#[from] serde_norway::Error),

    #[error("unknown product {0}")]
    UnknownProduct(ProductId),

    #[error("product {0} is out of stock")]
    OutOfStock(ProductId),

    #[error("failed to add product to cart: {0}")]
    Cart(#[from] emission::cart::CartError),
}

#[derive(Debug, Default, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CustomerEntry {
    #[serde(default)]
    name: String,
    #[serde(default)]
    phone: String,
    email: Option<String>,
    address: Option<String>,
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CartItemEntry {
    product: String,
    #[serde(default = "one")]
    quantity: u32,
    #[serde(default)]
    add_on: bool,
    size: Option<String>,
    color: Option<String>,
}

fn one() -> u32 {
    1
}

#[derive(Debug, Deserialize)]
#[serde(deny_unknown_fields)]
pub(crate) struct CartFile {
    #[serde(default)]
    customer: CustomerEntry,
    pub(crate) coupon: Option<String>,
    #[serde(default)]
    items: Vec<CartItemEntry>,
}

impl CartFile {
    pub(crate) async fn load(path: &Path) -> Result<Self, CartFileError> {
        let text = tokio::fs::read_to_string(path).await?;

        Self::parse(&text)
    }

    pub(crate) fn parse(text: &str) -> Result<Self, CartFileError> {
        Ok(serde_norway::from_str(text)?)
    }

    /// Fill the session's cart and customer details from this file.
    pub(crate) fn fill(
        &self,
        session: &mut PosSession,
        catalog: &Catalog,
    ) -> Result<(), CartFileError> {
        for item in &self.items {
            let id = ProductId::new(item.product.trim());

            let product = catalog
                .get(&id)
                .ok_or_else(|| CartFileError::UnknownProduct(id.clone()))?;

            if !product.in_stock {
                return Err(CartFileError::OutOfStock(id));
            }

            session.add_product(product.clone())?;

            // add_product counted one unit already
            let quantity = session.cart().line(&id).map_or(item.quantity, |line| {
                line.quantity()
                    .saturating_sub(1)
                    .saturating_add(item.quantity)
            });

            session.set_quantity(&id, quantity);

            let has_add_on = session
                .cart()
                .line(&id)
                .is_some_and(|line| line.has_add_on());

            if item.add_on && !has_add_on {
                session.toggle_add_on(&id);
            }

            if item.size.is_some() || item.color.is_some() {
                session.set_options(&id, item.size.clone(), item.color.clone());
            }
        }

        session.set_customer(CustomerInfo {
            name: self.customer.name.clone(),
            phone: self.customer.phone.clone(),
            email: self.customer.email.clone(),
            address: self.customer.address.clone(),
        });

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write as _;

    use emission::products::Product;
    use rusty_money::{Money, iso::INR};
    use testresult::TestResult;

    use super::*;

    fn catalog() -> Catalog {
        let mut stole = Product::new("p2", "Stole", Money::from_minor(20_000, INR));
        stole.in_stock = false;

        Catalog::new([
            Product::new("p1", "Kurta", Money::from_minor(50_000, INR)),
            stole,
        ])
    }

    #[tokio::test]
    async fn loads_cart_from_disk_and_fills_session() -> TestResult {
        let mut file = tempfile::NamedTempFile::new()?;

        writeln!(
            file,
            "customer:\n  name: Asha\n  phone: \"9876543210\"\ncoupon: SAVE300\nitems:\n  - product: p1\n    quantity: 2\n    add_on: true\n    size: M"
        )?;

        let cart_file = CartFile::load(file.path()).await?;
        let mut session = PosSession::new(INR, Money::from_minor(10_000, INR));

        cart_file.fill(&mut session, &catalog())?;

        let line = session
            .cart()
            .line(&ProductId::from("p1"))
            .ok_or("kurta should be in the cart")?;

        assert_eq!(line.quantity(), 2);
        assert!(line.has_add_on());
        assert_eq!(line.size(), Some("M"));
        assert_eq!(cart_file.coupon.as_deref(), Some("SAVE300"));
        assert_eq!(session.customer().name, "Asha");
        assert_eq!(session.pricing()?.subtotal(), Money::from_minor(120_000, INR));

        Ok(())
    }

    #[test]
    fn repeated_items_accumulate_quantity() -> TestResult {
        let cart_file = CartFile::parse(
            "items:\n  - product: p1\n  - product: p1\n    quantity: 3\n",
        )?;
        let mut session = PosSession::new(INR, Money::from_minor(0, INR));

        cart_file.fill(&mut session, &catalog())?;

        assert_eq!(session.cart().item_count(), 4);

        Ok(())
    }

    #[test]
    fn unknown_and_out_of_stock_products_are_rejected() -> TestResult {
        let mut session = PosSession::new(INR, Money::from_minor(0, INR));

        let unknown = CartFile::parse("items:\n  - product: nope\n")?;
        let sold_out = CartFile::parse("items:\n  - product: p2\n")?;

        assert!(matches!(
            unknown.fill(&mut session, &catalog()),
            Err(CartFileError::UnknownProduct(_))
        ));
        assert!(matches!(
            sold_out.fill(&mut session, &catalog()),
            Err(CartFileError::OutOfStock(_))
        ));

        Ok(())
    }
}
