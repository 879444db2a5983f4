//! Products

use std::fmt::{Display, Formatter, Result as FmtResult};

use rustc_hash::FxHashMap;
use rusty_money::iso::Currency;

use crate::money::{Amount, zero};

/// Backend product identifier.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ProductId(String);

impl ProductId {
    /// Wraps a backend identifier.
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Returns the identifier as a string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Display for ProductId {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self::new(value)
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// Product
#[derive(Debug, Clone, PartialEq)]
pub struct Product {
    /// Product identifier
    pub id: ProductId,

    /// Display name
    pub name: String,

    /// Retail price
    pub price: Option<Amount>,

    /// Legacy price, used when no retail price is set
    pub legacy_price: Option<Amount>,

    /// Image references
    pub images: Vec<String>,

    /// Whether the product is in stock
    pub in_stock: bool,

    /// Category name
    pub category: Option<String>,

    /// Currency the product is priced in
    pub currency: &'static Currency,
}

impl Product {
    /// Creates an in-stock product with a retail price.
    pub fn new(id: impl Into<ProductId>, name: impl Into<String>, price: Amount) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            price: Some(price),
            legacy_price: None,
            images: Vec::new(),
            in_stock: true,
            category: None,
            currency: price.currency(),
        }
    }

    /// Price used for cart lines: the retail price when present, otherwise the legacy price.
    ///
    /// A product with neither price is treated as free.
    pub fn base_price(&self) -> Amount {
        self.price
            .or(self.legacy_price)
            .unwrap_or_else(|| zero(self.currency))
    }
}

/// Products listed by the backend, in listing order.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    products: Vec<Product>,
    index: FxHashMap<ProductId, usize>,
}

impl Catalog {
    /// Builds a catalog. A later product with a duplicate identifier replaces the earlier one.
    pub fn new(products: impl IntoIterator<Item = Product>) -> Self {
        let mut catalog = Self::default();

        for product in products {
            catalog.insert(product);
        }

        catalog
    }

    fn insert(&mut self, product: Product) {
        if let Some(slot) = self
            .index
            .get(&product.id)
            .and_then(|&idx| self.products.get_mut(idx))
        {
            *slot = product;
            return;
        }

        self.index.insert(product.id.clone(), self.products.len());
        self.products.push(product);
    }

    /// Looks up a product by identifier.
    pub fn get(&self, id: &ProductId) -> Option<&Product> {
        self.index.get(id).and_then(|&idx| self.products.get(idx))
    }

    /// Iterates products in listing order.
    pub fn iter(&self) -> impl Iterator<Item = &Product> {
        self.products.iter()
    }

    /// Products currently in stock.
    pub fn in_stock(&self) -> impl Iterator<Item = &Product> {
        self.products.iter().filter(|product| product.in_stock)
    }

    /// Case-insensitive match against product name or category.
    pub fn search<'a>(&'a self, term: &str) -> impl Iterator<Item = &'a Product> {
        let term = term.trim().to_lowercase();

        self.products.iter().filter(move |product| {
            term.is_empty()
                || product.name.to_lowercase().contains(&term)
                || product
                    .category
                    .as_ref()
                    .is_some_and(|category| category.to_lowercase().contains(&term))
        })
    }

    /// Number of products.
    pub fn len(&self) -> usize {
        self.products.len()
    }

    /// Whether the catalog has no products.
    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::{Money, iso::INR};

    use super::*;

    fn shirt() -> Product {
        Product {
            category: Some("Tops".to_string()),
            ..Product::new("p-1", "Linen Shirt", Money::from_minor(50_000, INR))
        }
    }

    #[test]
    fn base_price_prefers_retail_price() {
        let product = Product {
            legacy_price: Some(Money::from_minor(90_000, INR)),
            ..shirt()
        };

        assert_eq!(product.base_price(), Money::from_minor(50_000, INR));
    }

    #[test]
    fn base_price_falls_back_to_legacy_price() {
        let product = Product {
            price: None,
            legacy_price: Some(Money::from_minor(45_000, INR)),
            ..shirt()
        };

        assert_eq!(product.base_price(), Money::from_minor(45_000, INR));
    }

    #[test]
    fn base_price_without_any_price_is_zero() {
        let product = Product {
            price: None,
            ..shirt()
        };

        assert_eq!(product.base_price(), Money::from_minor(0, INR));
    }

    #[test]
    fn catalog_replaces_duplicate_ids_in_place() {
        let renamed = Product {
            name: "Linen Shirt (New)".to_string(),
            ..shirt()
        };
        let other = Product::new("p-2", "Denim", Money::from_minor(80_000, INR));

        let catalog = Catalog::new([shirt(), other, renamed]);

        assert_eq!(catalog.len(), 2);
        assert_eq!(
            catalog.get(&"p-1".into()).map(|product| product.name.as_str()),
            Some("Linen Shirt (New)")
        );
        assert_eq!(
            catalog.iter().map(|product| product.id.as_str()).collect::<Vec<_>>(),
            ["p-1", "p-2"]
        );
    }

    #[test]
    fn catalog_search_matches_name_and_category() {
        let catalog = Catalog::new([
            shirt(),
            Product::new("p-2", "Denim Jacket", Money::from_minor(80_000, INR)),
        ]);

        let by_name: Vec<_> = catalog.search("denim").map(|p| p.id.as_str()).collect();
        let by_category: Vec<_> = catalog.search("TOPS").map(|p| p.id.as_str()).collect();

        assert_eq!(by_name, ["p-2"]);
        assert_eq!(by_category, ["p-1"]);
        assert_eq!(catalog.search("  ").count(), 2);
    }

    #[test]
    fn in_stock_filters_out_of_stock_products() {
        let sold_out = Product {
            in_stock: false,
            ..Product::new("p-3", "Scarf", Money::from_minor(20_000, INR))
        };

        let catalog = Catalog::new([shirt(), sold_out]);

        assert_eq!(catalog.in_stock().count(), 1);
    }
}
