//! Point-of-sale application layer: backend services, the till session and checkout.

pub mod backend;
pub mod checkout;
pub mod config;
pub mod context;
pub mod observability;
pub mod services;
pub mod session;
