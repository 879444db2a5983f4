//! Emission prelude.
//!
//! Convenience exports for common library consumers.

pub use crate::{
    cart::{Cart, CartError, CartLine},
    coupons::{AppliedCoupon, CouponError, CouponSlot, normalize_code},
    customer::{CustomerField, CustomerInfo, IN_STORE_ADDRESS, MissingFields},
    export::{ExportError, orders_csv, write_orders_csv},
    invoice::{Invoice, InvoiceError, InvoiceTheme, MerchantProfile},
    money::Amount,
    orders::{NewOrder, Order, OrderItem, OrderSource, OrderStatus, PaymentMethod},
    pricing::{PricingError, PricingSummary},
    products::{Catalog, Product, ProductId},
};
