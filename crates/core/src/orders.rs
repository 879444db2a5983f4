//! Orders

use std::{
    fmt::{Display, Formatter, Result as FmtResult},
    str::FromStr,
};

use jiff::Timestamp;
use rusty_money::Money;
use thiserror::Error;

use crate::{
    cart::Cart,
    coupons::AppliedCoupon,
    customer::CustomerInfo,
    money::Amount,
    pricing::{PricingError, PricingSummary, unit_price},
    products::ProductId,
};

/// Unknown payment method string.
#[derive(Debug, Error, PartialEq, Eq)]
#[error("unknown payment method: {0}")]
pub struct UnknownPaymentMethod(pub String);

/// How a sale is paid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PaymentMethod {
    /// Cash at the till
    Cash,

    /// Card via the payment gateway
    Card,

    /// UPI via the payment gateway
    Upi,
}

impl PaymentMethod {
    /// Wire representation
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Cash => "cash",
            Self::Card => "card",
            Self::Upi => "upi",
        }
    }

    /// Whether the payment must be collected through the gateway.
    pub fn requires_gateway(self) -> bool {
        !matches!(self, Self::Cash)
    }

    /// Human readable label for receipts.
    pub fn label(self) -> &'static str {
        match self {
            Self::Cash => "Cash",
            Self::Card => "Card",
            Self::Upi => "UPI",
        }
    }
}

impl Display for PaymentMethod {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

impl FromStr for PaymentMethod {
    type Err = UnknownPaymentMethod;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "cash" => Ok(Self::Cash),
            "card" => Ok(Self::Card),
            "upi" => Ok(Self::Upi),
            _ => Err(UnknownPaymentMethod(s.to_string())),
        }
    }
}

/// Order status as tracked by the backend.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderStatus {
    /// Awaiting processing
    Pending,

    /// Being prepared
    Processing,

    /// Handed to a courier
    Shipped,

    /// Received by the customer
    Delivered,

    /// Completed sale
    Completed,

    /// Cancelled
    Cancelled,

    /// A status this client does not know about
    Other(String),
}

impl OrderStatus {
    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pending => "pending",
            Self::Processing => "processing",
            Self::Shipped => "shipped",
            Self::Delivered => "delivered",
            Self::Completed => "completed",
            Self::Cancelled => "cancelled",
            Self::Other(status) => status,
        }
    }
}

impl From<&str> for OrderStatus {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pending" => Self::Pending,
            "processing" => Self::Processing,
            "shipped" => Self::Shipped,
            "delivered" => Self::Delivered,
            "completed" => Self::Completed,
            "cancelled" | "canceled" => Self::Cancelled,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl Display for OrderStatus {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// Where an order was placed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OrderSource {
    /// In-person sale at the point of sale
    Pos,

    /// Online storefront
    Online,

    /// A source this client does not know about
    Other(String),
}

impl OrderSource {
    /// Wire representation
    pub fn as_str(&self) -> &str {
        match self {
            Self::Pos => "pos",
            Self::Online => "online",
            Self::Other(source) => source,
        }
    }
}

impl From<&str> for OrderSource {
    fn from(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "pos" => Self::Pos,
            "online" | "website" => Self::Online,
            _ => Self::Other(value.to_string()),
        }
    }
}

impl Display for OrderSource {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// A line item snapshot on an order.
#[derive(Debug, Clone, PartialEq)]
pub struct OrderItem {
    /// Product identifier
    pub product_id: ProductId,

    /// Product name at time of sale
    pub name: String,

    /// Units sold
    pub quantity: u32,

    /// Unit price including any add-on surcharge
    pub unit_price: Amount,

    /// Whether the add-on was selected
    pub add_on: bool,

    /// Selected size
    pub size: Option<String>,

    /// Selected color
    pub color: Option<String>,
}

impl OrderItem {
    /// Unit price times quantity.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit.
    pub fn line_total(&self) -> Result<Amount, PricingError> {
        let minor = self
            .unit_price
            .to_minor_units()
            .checked_mul(i64::from(self.quantity))
            .ok_or(PricingError::Overflow)?;

        Ok(Money::from_minor(minor, self.unit_price.currency()))
    }
}

/// Order creation request for a completed sale.
#[derive(Debug, Clone, PartialEq)]
pub struct NewOrder {
    /// Customer name
    pub customer_name: String,

    /// Customer email
    pub customer_email: Option<String>,

    /// Customer phone
    pub customer_phone: String,

    /// Shipping address or the in-store placeholder
    pub shipping_address: String,

    /// Line item snapshot
    pub items: Vec<OrderItem>,

    /// Grand total charged
    pub total_amount: Amount,

    /// Coupon discount applied
    pub discount: Amount,

    /// Applied coupon code
    pub coupon_code: Option<String>,

    /// Order status
    pub status: OrderStatus,

    /// Payment method
    pub payment_method: PaymentMethod,

    /// Gateway payment identifier
    pub payment_id: Option<String>,

    /// Order source tag
    pub source: OrderSource,
}

impl NewOrder {
    /// Snapshots a cart into an order creation request for an in-person sale.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the cart cannot be priced.
    pub fn from_checkout(
        cart: &Cart,
        surcharge: Amount,
        coupon: Option<&AppliedCoupon>,
        customer: &CustomerInfo,
        payment_method: PaymentMethod,
        payment_id: Option<String>,
    ) -> Result<Self, PricingError> {
        let summary = PricingSummary::derive(cart, surcharge, coupon)?;

        let items = cart
            .lines()
            .iter()
            .map(|line| {
                Ok(OrderItem {
                    product_id: line.product().id.clone(),
                    name: line.product().name.clone(),
                    quantity: line.quantity(),
                    unit_price: unit_price(line, surcharge)?,
                    add_on: line.has_add_on(),
                    size: line.size().map(str::to_string),
                    color: line.color().map(str::to_string),
                })
            })
            .collect::<Result<Vec<_>, PricingError>>()?;

        Ok(Self {
            customer_name: customer.name.trim().to_string(),
            customer_email: customer.email().map(str::to_string),
            customer_phone: customer.phone.trim().to_string(),
            shipping_address: customer.shipping_address().to_string(),
            items,
            total_amount: summary.grand_total(),
            discount: summary.discount(),
            coupon_code: coupon.map(|coupon| coupon.code().to_string()),
            status: OrderStatus::Completed,
            payment_method,
            payment_id,
            source: OrderSource::Pos,
        })
    }
}

/// An order persisted by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct Order {
    /// Server-assigned identifier
    pub id: String,

    /// Server-assigned invoice number
    pub invoice_id: String,

    /// Customer name
    pub customer_name: String,

    /// Customer email
    pub customer_email: Option<String>,

    /// Customer phone
    pub customer_phone: String,

    /// Shipping address
    pub shipping_address: String,

    /// Line items
    pub items: Vec<OrderItem>,

    /// Total charged
    pub total_amount: Amount,

    /// Coupon discount, when one was applied
    pub discount: Option<Amount>,

    /// Applied coupon code
    pub coupon_code: Option<String>,

    /// Payment method
    pub payment_method: PaymentMethod,

    /// Gateway payment identifier
    pub payment_id: Option<String>,

    /// Order source tag
    pub source: OrderSource,

    /// Order status
    pub status: OrderStatus,

    /// Creation time
    pub created_at: Timestamp,
}

impl Order {
    /// Sum of line totals before any discount.
    ///
    /// # Errors
    ///
    /// Returns [`PricingError::Overflow`] if the total does not fit.
    pub fn items_total(&self) -> Result<Amount, PricingError> {
        let minor = self.items.iter().try_fold(0_i64, |acc, item| {
            acc.checked_add(item.line_total()?.to_minor_units())
                .ok_or(PricingError::Overflow)
        })?;

        Ok(Money::from_minor(minor, self.total_amount.currency()))
    }
}

#[cfg(test)]
mod tests {
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use crate::{customer::IN_STORE_ADDRESS, products::Product};

    use super::*;

    fn inr(minor: i64) -> Amount {
        Money::from_minor(minor, INR)
    }

    #[test]
    fn payment_method_round_trips_wire_strings() -> TestResult {
        assert_eq!("UPI".parse::<PaymentMethod>()?, PaymentMethod::Upi);
        assert_eq!(PaymentMethod::Card.as_str(), "card");
        assert!(!PaymentMethod::Cash.requires_gateway());
        assert!(PaymentMethod::Upi.requires_gateway());

        Ok(())
    }

    #[test]
    fn unknown_payment_method_is_rejected() {
        assert_eq!(
            "cheque".parse::<PaymentMethod>(),
            Err(UnknownPaymentMethod("cheque".to_string()))
        );
    }

    #[test]
    fn unknown_statuses_and_sources_pass_through() {
        assert_eq!(OrderStatus::from("Canceled"), OrderStatus::Cancelled);
        assert_eq!(
            OrderStatus::from("on-hold"),
            OrderStatus::Other("on-hold".to_string())
        );
        assert_eq!(OrderSource::from("POS"), OrderSource::Pos);
        assert_eq!(OrderSource::from("kiosk").as_str(), "kiosk");
    }

    #[test]
    fn from_checkout_snapshots_lines_with_surcharge() -> TestResult {
        let mut cart = Cart::new(INR);
        cart.add_product(Product::new("a", "Kurta", inr(500)))?;
        cart.add_product(Product::new("a", "Kurta", inr(500)))?;
        cart.add_product(Product::new("b", "Stole", inr(200)))?;
        cart.toggle_add_on(&"a".into());

        let coupon = AppliedCoupon::new("SAVE300", inr(300), "c-1")?;
        let customer = CustomerInfo::new(" Asha ", "9876543210");

        let order = NewOrder::from_checkout(
            &cart,
            inr(100),
            Some(&coupon),
            &customer,
            PaymentMethod::Cash,
            None,
        )?;

        let first = order.items.first().ok_or("missing item")?;

        assert_eq!(first.unit_price, inr(600));
        assert_eq!(first.quantity, 2);
        assert!(first.add_on);
        assert_eq!(order.total_amount, inr(1_200 + 200 - 300));
        assert_eq!(order.discount, inr(300));
        assert_eq!(order.coupon_code.as_deref(), Some("SAVE300"));
        assert_eq!(order.customer_name, "Asha");
        assert_eq!(order.shipping_address, IN_STORE_ADDRESS);
        assert_eq!(order.source, OrderSource::Pos);
        assert_eq!(order.status, OrderStatus::Completed);
        assert_eq!(order.payment_id, None);

        Ok(())
    }

    #[test]
    fn item_line_total_multiplies_quantity() -> TestResult {
        let item = OrderItem {
            product_id: "a".into(),
            name: "Kurta".to_string(),
            quantity: 3,
            unit_price: inr(450),
            add_on: false,
            size: None,
            color: None,
        };

        assert_eq!(item.line_total()?, inr(1_350));

        Ok(())
    }
}
