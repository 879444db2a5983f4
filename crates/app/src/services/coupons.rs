//! Coupons service.

use async_trait::async_trait;
use emission::money::Amount;
use mockall::automock;

use crate::services::ServiceError;

/// A coupon accepted by the backend, resolved to an absolute discount.
#[derive(Debug, Clone, PartialEq)]
pub struct CouponValidation {
    /// Code as recorded by the backend
    pub code: String,

    /// Discount for the submitted order amount
    pub discount: Amount,

    /// Backend coupon identifier
    pub coupon_id: String,
}

#[automock]
#[async_trait]
pub trait CouponsService: Send + Sync {
    /// Validates a coupon against the current order amount.
    ///
    /// Invalid, expired, exhausted or below-minimum coupons are reported as
    /// [`ServiceError::Rejected`] with the backend's reason.
    async fn validate_coupon(
        &self,
        code: &str,
        order_amount: Amount,
    ) -> Result<CouponValidation, ServiceError>;
}
