//! Cart

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::products::{Product, ProductId};

/// Errors related to cart mutation.
#[derive(Debug, Error, PartialEq)]
pub enum CartError {
    /// A product's currency differs from the cart currency (product, product currency, cart currency).
    #[error("Product {0} has currency {1}, but cart has currency {2}")]
    CurrencyMismatch(ProductId, &'static str, &'static str),
}

/// One product entry in the cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartLine {
    product: Product,
    quantity: u32,
    add_on: bool,
    size: Option<String>,
    color: Option<String>,
}

impl CartLine {
    fn new(product: Product) -> Self {
        Self {
            product,
            quantity: 1,
            add_on: false,
            size: None,
            color: None,
        }
    }

    /// Product snapshot taken when the line was created.
    pub fn product(&self) -> &Product {
        &self.product
    }

    /// Quantity, always at least 1.
    pub fn quantity(&self) -> u32 {
        self.quantity
    }

    /// Whether the per-unit add-on surcharge applies.
    pub fn has_add_on(&self) -> bool {
        self.add_on
    }

    /// Selected size
    pub fn size(&self) -> Option<&str> {
        self.size.as_deref()
    }

    /// Selected color
    pub fn color(&self) -> Option<&str> {
        self.color.as_deref()
    }
}

/// Shopping cart holding at most one line per product.
#[derive(Debug, Clone, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
    currency: &'static Currency,
}

impl Cart {
    /// Create an empty cart in the given currency.
    pub fn new(currency: &'static Currency) -> Self {
        Self {
            lines: Vec::new(),
            currency,
        }
    }

    /// Adds one unit of a product, merging into the existing line when the product is already in
    /// the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product is priced in another currency.
    pub fn add_product(&mut self, product: Product) -> Result<(), CartError> {
        if product.currency != self.currency {
            return Err(CartError::CurrencyMismatch(
                product.id,
                product.currency.iso_alpha_code,
                self.currency.iso_alpha_code,
            ));
        }

        match self.line_mut(&product.id) {
            Some(line) => line.quantity = line.quantity.saturating_add(1),
            None => self.lines.push(CartLine::new(product)),
        }

        Ok(())
    }

    /// Adjusts a line's quantity by `delta`, never going below 1.
    pub fn change_quantity(&mut self, product_id: &ProductId, delta: i64) {
        if let Some(line) = self.line_mut(product_id) {
            let quantity = i64::from(line.quantity)
                .saturating_add(delta)
                .clamp(1, i64::from(u32::MAX));

            line.quantity = u32::try_from(quantity).unwrap_or(u32::MAX);
        }
    }

    /// Sets a line's quantity, clamped to at least 1.
    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        if let Some(line) = self.line_mut(product_id) {
            line.quantity = quantity.max(1);
        }
    }

    /// Removes a product's line regardless of quantity.
    pub fn remove_product(&mut self, product_id: &ProductId) {
        self.lines.retain(|line| &line.product.id != product_id);
    }

    /// Flips the add-on flag for a product's line.
    pub fn toggle_add_on(&mut self, product_id: &ProductId) {
        if let Some(line) = self.line_mut(product_id) {
            line.add_on = !line.add_on;
        }
    }

    /// Records size and color selections for a product's line.
    pub fn set_options(
        &mut self,
        product_id: &ProductId,
        size: Option<String>,
        color: Option<String>,
    ) {
        if let Some(line) = self.line_mut(product_id) {
            line.size = size;
            line.color = color;
        }
    }

    /// The line for a product, if present.
    pub fn line(&self, product_id: &ProductId) -> Option<&CartLine> {
        self.lines.iter().find(|line| &line.product.id == product_id)
    }

    fn line_mut(&mut self, product_id: &ProductId) -> Option<&mut CartLine> {
        self.lines
            .iter_mut()
            .find(|line| &line.product.id == product_id)
    }

    /// Lines in the order products were first added.
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of lines.
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Check if the cart is empty.
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Total units across all lines.
    pub fn item_count(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Removes every line.
    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Get the currency of the cart.
    pub fn currency(&self) -> &'static Currency {
        self.currency
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{
        Money,
        iso::{INR, USD},
    };
    use testresult::TestResult;

    use super::*;

    fn product(id: &str, price: i64) -> Product {
        Product::new(id, format!("Product {id}"), Money::from_minor(price, INR))
    }

    #[test]
    fn adding_same_product_twice_merges_into_one_line() -> TestResult {
        let mut cart = Cart::new(INR);

        cart.add_product(product("a", 500))?;
        cart.add_product(product("a", 500))?;

        assert_eq!(cart.len(), 1);
        assert_eq!(cart.line(&"a".into()).map(CartLine::quantity), Some(2));

        Ok(())
    }

    #[test]
    fn new_lines_start_at_one_without_add_on() -> TestResult {
        let mut cart = Cart::new(INR);

        cart.add_product(product("a", 500))?;

        let line = cart.line(&"a".into()).ok_or("missing line")?;

        assert_eq!(line.quantity(), 1);
        assert!(!line.has_add_on());

        Ok(())
    }

    #[test]
    fn add_product_rejects_other_currencies() {
        let mut cart = Cart::new(INR);
        let dollars = Product::new("usd", "Import", Money::from_minor(1_00, USD));

        let result = cart.add_product(dollars);

        assert_eq!(
            result,
            Err(CartError::CurrencyMismatch("usd".into(), "USD", "INR"))
        );
        assert!(cart.is_empty());
    }

    #[test]
    fn change_quantity_clamps_at_one() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_product(product("a", 500))?;
        cart.change_quantity(&"a".into(), 3);

        cart.change_quantity(&"a".into(), -10);

        assert_eq!(cart.line(&"a".into()).map(CartLine::quantity), Some(1));

        Ok(())
    }

    #[test]
    fn change_quantity_on_missing_product_is_noop() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_product(product("a", 500))?;
        let before = cart.clone();

        cart.change_quantity(&"missing".into(), 2);

        assert_eq!(cart, before);

        Ok(())
    }

    #[test]
    fn set_quantity_never_drops_below_one() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_product(product("a", 500))?;

        cart.set_quantity(&"a".into(), 0);

        assert_eq!(cart.line(&"a".into()).map(CartLine::quantity), Some(1));

        Ok(())
    }

    #[test]
    fn remove_product_drops_line_regardless_of_quantity() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_product(product("a", 500))?;
        cart.add_product(product("b", 700))?;
        cart.change_quantity(&"a".into(), 4);

        cart.remove_product(&"a".into());

        assert_eq!(cart.len(), 1);
        assert!(cart.line(&"a".into()).is_none());

        Ok(())
    }

    #[test]
    fn remove_missing_product_is_noop() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_product(product("a", 500))?;
        let before = cart.clone();

        cart.remove_product(&"missing".into());

        assert_eq!(cart, before);

        Ok(())
    }

    #[test]
    fn toggle_add_on_flips_flag() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_product(product("a", 500))?;

        cart.toggle_add_on(&"a".into());
        assert_eq!(cart.line(&"a".into()).map(CartLine::has_add_on), Some(true));

        cart.toggle_add_on(&"a".into());
        assert_eq!(cart.line(&"a".into()).map(CartLine::has_add_on), Some(false));

        Ok(())
    }

    #[test]
    fn set_options_records_size_and_color() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_product(product("a", 500))?;

        cart.set_options(&"a".into(), Some("M".to_string()), Some("Indigo".to_string()));

        let line = cart.line(&"a".into()).ok_or("missing line")?;

        assert_eq!(line.size(), Some("M"));
        assert_eq!(line.color(), Some("Indigo"));

        Ok(())
    }

    #[test]
    fn item_count_sums_quantities() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_product(product("a", 500))?;
        cart.add_product(product("a", 500))?;
        cart.add_product(product("b", 700))?;

        assert_eq!(cart.item_count(), 3);

        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.item_count(), 0);

        Ok(())
    }
}
