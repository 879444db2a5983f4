//! Checkout errors.

use emission::{customer::MissingFields, pricing::PricingError};
use thiserror::Error;
use uuid::Uuid;

use crate::services::ServiceError;

#[derive(Debug, Error)]
pub enum CheckoutError {
    /// Another checkout attempt for this session has not finished.
    #[error("a checkout is already in progress")]
    AlreadyInProgress,

    #[error("cart is empty")]
    EmptyCart,

    #[error(transparent)]
    MissingCustomerDetails(#[from] MissingFields),

    #[error("failed to price cart")]
    Pricing(#[from] PricingError),

    /// Card and UPI need a gateway key in the store settings.
    #[error("payment gateway is not configured")]
    GatewayUnavailable,

    #[error("payment gateway error")]
    Gateway(#[source] ServiceError),

    #[error("failed to record order")]
    OrderCreation(#[source] ServiceError),

    /// Payment was captured but the order was not recorded.
    #[error("payment {payment_id} was captured but the order was not recorded: {message}")]
    Reconciliation { payment_id: String, message: String },

    /// The attempt does not hold this session's checkout lock.
    #[error("checkout attempt {0} is not in progress")]
    StaleAttempt(Uuid),
}

impl CheckoutError {
    /// Message to show the operator.
    pub fn user_message(&self) -> String {
        match self {
            Self::AlreadyInProgress => "Please wait for the current checkout to finish.".to_string(),
            Self::EmptyCart => "Add at least one product before checking out.".to_string(),
            Self::MissingCustomerDetails(_) => {
                "Please enter the customer's name and phone number.".to_string()
            }
            Self::GatewayUnavailable => {
                "Card and UPI payments are not configured for this store.".to_string()
            }
            Self::Gateway(error) | Self::OrderCreation(error) => error.user_message().to_string(),
            Self::Reconciliation { payment_id, .. } => format!(
                "Payment {payment_id} was received but the order could not be saved. \
                 Please record this payment reference and contact support."
            ),
            Self::Pricing(_) | Self::StaleAttempt(_) => {
                "Something went wrong. Please try again.".to_string()
            }
        }
    }
}
