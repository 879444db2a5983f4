//! Emission
//!
//! Point-of-sale cart, pricing, coupon, order and invoice logic for the Emission retail dashboard.

pub mod cart;
pub mod coupons;
pub mod customer;
pub mod export;
pub mod invoice;
pub mod money;
pub mod orders;
pub mod prelude;
pub mod pricing;
pub mod products;
