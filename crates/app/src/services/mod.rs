//! External collaborators of the till.
//!
//! Every backend endpoint and the payment collection surface sit behind a trait so the session
//! and checkout logic can be driven by mocks in tests.

pub mod catalog;
pub mod coupons;
mod errors;
pub mod gateway;
pub mod orders;
pub mod payments;
pub mod settings;

pub use catalog::{CatalogService, MockCatalogService};
pub use coupons::{CouponValidation, CouponsService, MockCouponsService};
pub use errors::ServiceError;
pub use gateway::{MockPaymentGateway, PaymentCollection, PaymentGateway, PaymentRequest};
pub use orders::{MockOrdersService, OrdersService};
pub use payments::{GatewayOrder, MockPaymentsService, PaymentsService};
pub use settings::{MockSettingsService, PosSettings, SettingsService};
