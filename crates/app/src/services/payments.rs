//! Payments service.

use async_trait::async_trait;
use emission::money::Amount;
use mockall::automock;

use crate::services::ServiceError;

/// A payment order created with the gateway ahead of collection.
#[derive(Debug, Clone, PartialEq)]
pub struct GatewayOrder {
    /// Gateway order identifier
    pub id: String,

    /// Amount to collect
    pub amount: Amount,

    /// Currency code reported by the gateway
    pub currency: String,
}

#[automock]
#[async_trait]
pub trait PaymentsService: Send + Sync {
    /// Create a gateway order for the given amount and receipt label.
    async fn create_payment_order(
        &self,
        amount: Amount,
        receipt: &str,
    ) -> Result<GatewayOrder, ServiceError>;
}
