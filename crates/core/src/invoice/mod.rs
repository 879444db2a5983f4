//! Invoice
//!
//! Printable documents for a finalized order. Everything here is formatting over data the order
//! already carries; no totals are recomputed beyond per-line multiplication.

use std::{fmt, io};

use jiff::tz::TimeZone;
use thiserror::Error;

use crate::{orders::Order, pricing::PricingError};

mod html;
mod text;

const DEFAULT_PRIMARY: &str = "#1f2937";
const DEFAULT_ACCENT: &str = "#b45309";

/// Errors that can occur when rendering an invoice.
#[derive(Debug, Error)]
pub enum InvoiceError {
    /// A line total could not be computed.
    #[error(transparent)]
    Pricing(#[from] PricingError),

    /// Writing the document failed.
    #[error("failed to write invoice")]
    Io(#[from] io::Error),

    /// Formatting the document failed.
    #[error("failed to format invoice")]
    Format(#[from] fmt::Error),
}

/// Merchant identity printed in the invoice header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MerchantProfile {
    /// Store name
    pub name: String,

    /// Store address
    pub address: Option<String>,

    /// Store phone
    pub phone: Option<String>,

    /// Store email
    pub email: Option<String>,

    /// GST registration number
    pub tax_id: Option<String>,
}

/// Optional invoice colours as CSS hex strings.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InvoiceTheme {
    /// Header and total row colour
    pub primary: Option<String>,

    /// Accent colour for annotations
    pub accent: Option<String>,
}

impl InvoiceTheme {
    /// Primary colour, or the default when unset or not a hex colour.
    pub fn primary(&self) -> &str {
        valid_color(self.primary.as_deref()).unwrap_or(DEFAULT_PRIMARY)
    }

    /// Accent colour, or the default when unset or not a hex colour.
    pub fn accent(&self) -> &str {
        valid_color(self.accent.as_deref()).unwrap_or(DEFAULT_ACCENT)
    }
}

/// Accepts `#rgb` and `#rrggbb` only, so theme values can be embedded in CSS verbatim.
fn valid_color(color: Option<&str>) -> Option<&str> {
    let color = color?.trim();
    let hex = color.strip_prefix('#')?;

    ((hex.len() == 3 || hex.len() == 6) && hex.chars().all(|ch| ch.is_ascii_hexdigit()))
        .then_some(color)
}

/// An invoice for a finalized order.
#[derive(Debug, Clone)]
pub struct Invoice<'a> {
    order: &'a Order,
    merchant: &'a MerchantProfile,
    theme: InvoiceTheme,
    time_zone: TimeZone,
}

impl<'a> Invoice<'a> {
    /// Create an invoice for the given order and merchant.
    pub fn new(order: &'a Order, merchant: &'a MerchantProfile) -> Self {
        Self {
            order,
            merchant,
            theme: InvoiceTheme::default(),
            time_zone: TimeZone::UTC,
        }
    }

    /// Use the given colours.
    #[must_use]
    pub fn with_theme(mut self, theme: InvoiceTheme) -> Self {
        self.theme = theme;
        self
    }

    /// Print dates in the given time zone.
    #[must_use]
    pub fn with_time_zone(mut self, time_zone: TimeZone) -> Self {
        self.time_zone = time_zone;
        self
    }

    /// The order being invoiced.
    pub fn order(&self) -> &Order {
        self.order
    }

    fn issued_on(&self) -> String {
        self.order
            .created_at
            .to_zoned(self.time_zone.clone())
            .strftime("%d %b %Y, %H:%M %Z")
            .to_string()
    }

    fn invoice_number(&self) -> &str {
        if self.order.invoice_id.is_empty() {
            &self.order.id
        } else {
            &self.order.invoice_id
        }
    }

    /// Renders a standalone HTML document that opens the print dialog when loaded.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError`] if a line total cannot be computed.
    pub fn render_html(&self) -> Result<String, InvoiceError> {
        html::render(self)
    }

    /// Writes the invoice as a terminal table.
    ///
    /// # Errors
    ///
    /// Returns an [`InvoiceError`] if a line total cannot be computed or writing fails.
    pub fn write_text(&self, out: impl io::Write) -> Result<(), InvoiceError> {
        text::write(self, out)
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use jiff::Timestamp;
    use rusty_money::{Money, iso::INR};

    use crate::orders::{OrderItem, OrderSource, OrderStatus, PaymentMethod};

    use super::*;

    pub(crate) fn sample_order() -> Order {
        Order {
            id: "ord_123".to_string(),
            invoice_id: "INV-0042".to_string(),
            customer_name: "Asha <Rao>".to_string(),
            customer_email: Some("asha@example.com".to_string()),
            customer_phone: "9876543210".to_string(),
            shipping_address: "In-Store Purchase".to_string(),
            items: vec![
                OrderItem {
                    product_id: "a".into(),
                    name: "Kurta".to_string(),
                    quantity: 2,
                    unit_price: Money::from_minor(60_000, INR),
                    add_on: true,
                    size: Some("M".to_string()),
                    color: None,
                },
                OrderItem {
                    product_id: "b".into(),
                    name: "Stole".to_string(),
                    quantity: 1,
                    unit_price: Money::from_minor(20_000, INR),
                    add_on: false,
                    size: None,
                    color: None,
                },
            ],
            total_amount: Money::from_minor(110_000, INR),
            discount: Some(Money::from_minor(30_000, INR)),
            coupon_code: Some("SAVE300".to_string()),
            payment_method: PaymentMethod::Upi,
            payment_id: Some("pay_789".to_string()),
            source: OrderSource::Pos,
            status: OrderStatus::Completed,
            created_at: Timestamp::from_second(1_760_000_000).unwrap_or(Timestamp::UNIX_EPOCH),
        }
    }

    pub(crate) fn sample_merchant() -> MerchantProfile {
        MerchantProfile {
            name: "Emission".to_string(),
            address: Some("42 Residency Road, Bengaluru".to_string()),
            phone: Some("080-1234567".to_string()),
            email: None,
            tax_id: Some("29ABCDE1234F1Z5".to_string()),
        }
    }

    #[test]
    fn theme_falls_back_to_defaults_for_invalid_colors() {
        let theme = InvoiceTheme {
            primary: Some("red;}body{display:none".to_string()),
            accent: Some("#0a0".to_string()),
        };

        assert_eq!(theme.primary(), DEFAULT_PRIMARY);
        assert_eq!(theme.accent(), "#0a0");
        assert_eq!(InvoiceTheme::default().accent(), DEFAULT_ACCENT);
    }

    #[test]
    fn invoice_number_falls_back_to_order_id() {
        let order = Order {
            invoice_id: String::new(),
            ..sample_order()
        };
        let merchant = sample_merchant();

        assert_eq!(Invoice::new(&order, &merchant).invoice_number(), "ord_123");
    }

    #[test]
    fn issued_on_uses_time_zone() {
        let order = sample_order();
        let merchant = sample_merchant();

        let invoice = Invoice::new(&order, &merchant);

        assert_eq!(invoice.issued_on(), "09 Oct 2025, 08:53 UTC");
    }
}
