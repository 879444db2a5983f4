//! Payment collection surface.

use async_trait::async_trait;
use emission::{money::Amount, orders::PaymentMethod};
use mockall::automock;

use crate::services::ServiceError;

/// Details handed to the payment collection surface.
#[derive(Debug, Clone, PartialEq)]
pub struct PaymentRequest {
    /// Gateway public key
    pub key: String,

    /// Gateway order to pay
    pub gateway_order_id: String,

    /// Amount to collect
    pub amount: Amount,

    /// Card or UPI
    pub method: PaymentMethod,

    /// Merchant name shown on the payment surface
    pub merchant_name: String,

    /// Prefilled customer name
    pub customer_name: String,

    /// Prefilled customer phone
    pub customer_phone: String,

    /// Prefilled customer email
    pub customer_email: Option<String>,
}

/// Result of presenting the payment surface.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PaymentCollection {
    /// The customer paid.
    Captured {
        /// Gateway payment identifier
        payment_id: String,

        /// Gateway order the payment belongs to
        gateway_order_id: String,

        /// Gateway signature over the payment
        signature: Option<String>,
    },

    /// The surface was closed without paying.
    Cancelled,
}

#[automock]
#[async_trait]
pub trait PaymentGateway: Send + Sync {
    /// Present the payment surface and wait for the customer.
    async fn collect(&self, request: PaymentRequest) -> Result<PaymentCollection, ServiceError>;
}
