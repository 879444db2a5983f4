//! Checkout attempts
//!
//! A [`CheckoutAttempt`] is a snapshot of the session taken when checkout starts. Cart edits made
//! while the attempt is in flight do not change what it charges or records.

use std::fmt::{Display, Formatter, Result as FmtResult};

use emission::{
    cart::Cart,
    coupons::AppliedCoupon,
    customer::CustomerInfo,
    money::Amount,
    orders::{NewOrder, Order, PaymentMethod},
    pricing::{PricingError, PricingSummary},
};
use tracing::debug;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CheckoutState {
    #[default]
    Idle,
    Validating,
    AwaitingGatewayOrder,
    AwaitingGatewayResult,
    Finalizing,
    Completed,
    Failed,
}

impl CheckoutState {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Idle => "idle",
            Self::Validating => "validating",
            Self::AwaitingGatewayOrder => "awaiting_gateway_order",
            Self::AwaitingGatewayResult => "awaiting_gateway_result",
            Self::Finalizing => "finalizing",
            Self::Completed => "completed",
            Self::Failed => "failed",
        }
    }
}

impl Display for CheckoutState {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        f.write_str(self.as_str())
    }
}

/// How a checkout attempt ended when it did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum CheckoutOutcome {
    /// The order was recorded.
    Completed(Order),

    /// The customer closed the payment surface; nothing was recorded.
    Cancelled,
}

/// A single checkout attempt.
#[derive(Debug, Clone)]
pub struct CheckoutAttempt {
    id: Uuid,
    method: PaymentMethod,
    cart: Cart,
    coupon: Option<AppliedCoupon>,
    customer: CustomerInfo,
    surcharge: Amount,
    summary: PricingSummary,
    state: CheckoutState,
}

impl CheckoutAttempt {
    pub(crate) fn new(
        method: PaymentMethod,
        cart: Cart,
        coupon: Option<AppliedCoupon>,
        customer: CustomerInfo,
        surcharge: Amount,
    ) -> Result<Self, PricingError> {
        let summary = PricingSummary::derive(&cart, surcharge, coupon.as_ref())?;

        Ok(Self {
            id: Uuid::now_v7(),
            method,
            cart,
            coupon,
            customer,
            surcharge,
            summary,
            state: CheckoutState::Validating,
        })
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn method(&self) -> PaymentMethod {
        self.method
    }

    pub fn state(&self) -> CheckoutState {
        self.state
    }

    /// Totals at the time checkout started.
    pub fn summary(&self) -> &PricingSummary {
        &self.summary
    }

    pub fn grand_total(&self) -> Amount {
        self.summary.grand_total()
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub(crate) fn transition(&mut self, state: CheckoutState) {
        debug!(attempt = %self.id, from = %self.state, to = %state, "checkout state changed");

        self.state = state;
    }

    pub(crate) fn new_order(&self, payment_id: Option<String>) -> Result<NewOrder, PricingError> {
        NewOrder::from_checkout(
            &self.cart,
            self.surcharge,
            self.coupon.as_ref(),
            &self.customer,
            self.method,
            payment_id,
        )
    }
}
