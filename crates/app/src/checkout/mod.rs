//! Checkout
//!
//! Drives a [`CheckoutAttempt`] through payment collection and order creation:
//!
//! ```text
//! Idle -> Validating -> Finalizing -> Completed                                      (cash)
//! Idle -> Validating -> AwaitingGatewayOrder -> AwaitingGatewayResult -> Finalizing -> Completed
//! ```
//!
//! Any state before `Completed` may end in `Failed`. A cancelled payment returns the attempt to
//! `Idle` without recording anything.

use std::{fmt, sync::Arc};

use emission::{money, orders::PaymentMethod};
use jiff::Timestamp;
use tracing::{info, warn};

use crate::{
    services::{
        OrdersService, PaymentCollection, PaymentGateway, PaymentRequest, PaymentsService,
        SettingsService,
    },
    session::PosSession,
};

mod attempt;
mod errors;

pub use attempt::{CheckoutAttempt, CheckoutOutcome, CheckoutState};
pub use errors::CheckoutError;

/// Receipt label sent with gateway orders.
pub fn receipt_label(now: Timestamp) -> String {
    format!("rcpt_{}", now.as_millisecond())
}

/// Services a checkout talks to.
#[derive(Clone)]
pub struct Checkout {
    settings: Arc<dyn SettingsService>,
    payments: Arc<dyn PaymentsService>,
    gateway: Arc<dyn PaymentGateway>,
    orders: Arc<dyn OrdersService>,
}

impl fmt::Debug for Checkout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Checkout").finish_non_exhaustive()
    }
}

impl Checkout {
    #[must_use]
    pub fn new(
        settings: Arc<dyn SettingsService>,
        payments: Arc<dyn PaymentsService>,
        gateway: Arc<dyn PaymentGateway>,
        orders: Arc<dyn OrdersService>,
    ) -> Self {
        Self {
            settings,
            payments,
            gateway,
            orders,
        }
    }

    /// Begin, process and finish a checkout for the session.
    ///
    /// # Errors
    ///
    /// Returns a [`CheckoutError`] when validation, payment or order creation fails. The session
    /// keeps its cart, coupon and customer details in that case.
    pub async fn run(
        &self,
        session: &mut PosSession,
        method: PaymentMethod,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let mut attempt = session.begin_checkout(method)?;
        let outcome = self.process(&mut attempt).await;

        session.finish_checkout(attempt, outcome)
    }

    /// Collect payment for the attempt and record the order.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::Reconciliation`] when a captured payment could not be recorded,
    /// [`CheckoutError::OrderCreation`] when a cash order could not be recorded, and
    /// [`CheckoutError::Gateway`] or [`CheckoutError::GatewayUnavailable`] when payment could not
    /// be collected.
    pub async fn process(
        &self,
        attempt: &mut CheckoutAttempt,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        let result = self.drive(attempt).await;

        if result.is_err() {
            attempt.transition(CheckoutState::Failed);
        }

        result
    }

    async fn drive(&self, attempt: &mut CheckoutAttempt) -> Result<CheckoutOutcome, CheckoutError> {
        let payment_id = if attempt.method().requires_gateway() {
            match self.collect_payment(attempt).await? {
                Some(payment_id) => Some(payment_id),
                None => {
                    attempt.transition(CheckoutState::Idle);

                    info!(attempt = %attempt.id(), "payment cancelled");

                    return Ok(CheckoutOutcome::Cancelled);
                }
            }
        } else {
            None
        };

        attempt.transition(CheckoutState::Finalizing);

        let new_order = attempt.new_order(payment_id.clone())?;

        match self.orders.create_order(new_order).await {
            Ok(order) => {
                attempt.transition(CheckoutState::Completed);

                info!(
                    order_id = %order.id,
                    invoice_id = %order.invoice_id,
                    method = %attempt.method(),
                    total = %money::format(&order.total_amount),
                    "order finalized"
                );

                Ok(CheckoutOutcome::Completed(order))
            }
            Err(error) => match payment_id {
                Some(payment_id) => {
                    warn!(
                        %payment_id,
                        %error,
                        "payment captured but order was not recorded; manual reconciliation required"
                    );

                    Err(CheckoutError::Reconciliation {
                        payment_id,
                        message: error.user_message().to_string(),
                    })
                }
                None => Err(CheckoutError::OrderCreation(error)),
            },
        }
    }

    /// Returns the captured payment id, or `None` when the customer cancelled.
    async fn collect_payment(
        &self,
        attempt: &mut CheckoutAttempt,
    ) -> Result<Option<String>, CheckoutError> {
        attempt.transition(CheckoutState::AwaitingGatewayOrder);

        let settings = self
            .settings
            .fetch_settings()
            .await
            .map_err(CheckoutError::Gateway)?;

        let key = settings
            .gateway_key
            .ok_or(CheckoutError::GatewayUnavailable)?;

        let receipt = receipt_label(Timestamp::now());

        let gateway_order = self
            .payments
            .create_payment_order(attempt.grand_total(), &receipt)
            .await
            .map_err(CheckoutError::Gateway)?;

        attempt.transition(CheckoutState::AwaitingGatewayResult);

        let customer = attempt.customer();

        let request = PaymentRequest {
            key,
            gateway_order_id: gateway_order.id,
            amount: gateway_order.amount,
            method: attempt.method(),
            merchant_name: settings.merchant.name,
            customer_name: customer.name.trim().to_string(),
            customer_phone: customer.phone.trim().to_string(),
            customer_email: customer.email().map(str::to_string),
        };

        match self
            .gateway
            .collect(request)
            .await
            .map_err(CheckoutError::Gateway)?
        {
            PaymentCollection::Captured { payment_id, .. } => Ok(Some(payment_id)),
            PaymentCollection::Cancelled => Ok(None),
        }
    }
}
