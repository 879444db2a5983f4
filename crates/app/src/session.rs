//! Point-of-sale session
//!
//! Everything the till holds for the sale in progress: the cart, the applied coupon, the
//! customer details and the checkout lock.

use emission::{
    cart::{Cart, CartError},
    coupons::{AppliedCoupon, CouponError, CouponSlot, normalize_code},
    customer::CustomerInfo,
    money::{self, Amount},
    orders::{Order, PaymentMethod},
    pricing::{self, PricingError, PricingSummary},
    products::{Product, ProductId},
};
use rusty_money::iso::Currency;
use thiserror::Error;
use tracing::{debug, warn};
use uuid::Uuid;

use crate::{
    checkout::{CheckoutAttempt, CheckoutError, CheckoutOutcome, CheckoutState},
    services::{CouponsService, ServiceError},
};

/// Errors applying a coupon.
#[derive(Debug, Error)]
pub enum ApplyCouponError {
    #[error(transparent)]
    Coupon(#[from] CouponError),

    #[error(transparent)]
    Pricing(#[from] PricingError),

    #[error("coupon validation failed")]
    Service(#[from] ServiceError),
}

impl ApplyCouponError {
    /// Message to show the operator.
    pub fn user_message(&self) -> String {
        match self {
            Self::Coupon(CouponError::EmptyCode) => "Please enter a coupon code.".to_string(),
            Self::Coupon(CouponError::AlreadyApplied(code)) => {
                format!("Coupon {code} is already applied. Remove it to use another.")
            }
            Self::Coupon(error) => error.to_string(),
            Self::Pricing(_) => "Something went wrong. Please try again.".to_string(),
            Self::Service(error) => error.user_message().to_string(),
        }
    }
}

/// The sale in progress at the till.
#[derive(Debug, Clone)]
pub struct PosSession {
    cart: Cart,
    coupons: CouponSlot,
    customer: CustomerInfo,
    surcharge: Amount,
    in_flight: Option<Uuid>,
    checkout_state: CheckoutState,
    last_order: Option<Order>,
}

impl PosSession {
    /// Create an empty session with the store's per-unit add-on surcharge.
    pub fn new(currency: &'static Currency, surcharge: Amount) -> Self {
        Self {
            cart: Cart::new(currency),
            coupons: CouponSlot::default(),
            customer: CustomerInfo::default(),
            surcharge,
            in_flight: None,
            checkout_state: CheckoutState::Idle,
            last_order: None,
        }
    }

    pub fn cart(&self) -> &Cart {
        &self.cart
    }

    pub fn surcharge(&self) -> Amount {
        self.surcharge
    }

    /// Update the surcharge rate, e.g. after settings are reloaded.
    pub fn set_surcharge(&mut self, surcharge: Amount) {
        self.surcharge = surcharge;
    }

    /// Add a product, or one more unit of it when already in the cart.
    ///
    /// # Errors
    ///
    /// Returns [`CartError::CurrencyMismatch`] if the product is priced in another currency.
    pub fn add_product(&mut self, product: Product) -> Result<(), CartError> {
        self.cart.add_product(product)
    }

    pub fn change_quantity(&mut self, product_id: &ProductId, delta: i64) {
        self.cart.change_quantity(product_id, delta);
    }

    pub fn set_quantity(&mut self, product_id: &ProductId, quantity: u32) {
        self.cart.set_quantity(product_id, quantity);
    }

    pub fn remove_product(&mut self, product_id: &ProductId) {
        self.cart.remove_product(product_id);
    }

    pub fn toggle_add_on(&mut self, product_id: &ProductId) {
        self.cart.toggle_add_on(product_id);
    }

    pub fn set_options(
        &mut self,
        product_id: &ProductId,
        size: Option<String>,
        color: Option<String>,
    ) {
        self.cart.set_options(product_id, size, color);
    }

    /// Current totals.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] if the totals overflow.
    pub fn pricing(&self) -> Result<PricingSummary, PricingError> {
        PricingSummary::derive(&self.cart, self.surcharge, self.coupons.active())
    }

    pub fn coupon(&self) -> Option<&AppliedCoupon> {
        self.coupons.active()
    }

    /// Validates `code` against the current subtotal and applies it.
    ///
    /// A failed validation leaves any previously applied coupon untouched.
    ///
    /// # Errors
    ///
    /// Returns [`ApplyCouponError::Coupon`] for a blank code or when a coupon is already applied,
    /// without calling the service, and [`ApplyCouponError::Service`] when the backend rejects
    /// the coupon.
    pub async fn apply_coupon(
        &mut self,
        service: &dyn CouponsService,
        code: &str,
    ) -> Result<AppliedCoupon, ApplyCouponError> {
        let code = normalize_code(code)?;

        self.coupons.ensure_vacant()?;

        let subtotal = pricing::subtotal(&self.cart, self.surcharge)?;

        let validation = service
            .validate_coupon(&code, subtotal)
            .await
            .inspect_err(|error| warn!(%code, %error, "coupon rejected"))?;

        let coupon =
            AppliedCoupon::new(validation.code, validation.discount, validation.coupon_id)?;

        debug!(
            code = coupon.code(),
            discount = %money::format(&coupon.discount()),
            "coupon applied"
        );

        self.coupons.apply(coupon.clone())?;

        Ok(coupon)
    }

    /// Remove the applied coupon, returning it.
    pub fn remove_coupon(&mut self) -> Option<AppliedCoupon> {
        self.coupons.remove()
    }

    pub fn customer(&self) -> &CustomerInfo {
        &self.customer
    }

    pub fn customer_mut(&mut self) -> &mut CustomerInfo {
        &mut self.customer
    }

    pub fn set_customer(&mut self, customer: CustomerInfo) {
        self.customer = customer;
    }

    /// The most recently completed order, for reprinting its receipt.
    pub fn last_order(&self) -> Option<&Order> {
        self.last_order.as_ref()
    }

    pub fn checkout_state(&self) -> CheckoutState {
        self.checkout_state
    }

    pub fn checkout_in_progress(&self) -> bool {
        self.in_flight.is_some()
    }

    /// Validates the sale and snapshots it into a checkout attempt, taking the checkout lock.
    ///
    /// Validation makes no network calls; on failure the session is left as it was.
    ///
    /// # Errors
    ///
    /// Returns [`CheckoutError::AlreadyInProgress`] while another attempt holds the lock,
    /// [`CheckoutError::EmptyCart`] for an empty cart, and
    /// [`CheckoutError::MissingCustomerDetails`] when the name or phone is blank.
    pub fn begin_checkout(
        &mut self,
        method: PaymentMethod,
    ) -> Result<CheckoutAttempt, CheckoutError> {
        if self.in_flight.is_some() {
            return Err(CheckoutError::AlreadyInProgress);
        }

        self.checkout_state = CheckoutState::Validating;

        let attempt = match self.snapshot(method) {
            Ok(attempt) => attempt,
            Err(error) => {
                debug!(%error, "checkout validation failed");

                self.checkout_state = CheckoutState::Idle;
                return Err(error);
            }
        };

        debug!(attempt = %attempt.id(), %method, "checkout started");

        self.in_flight = Some(attempt.id());

        Ok(attempt)
    }

    fn snapshot(&self, method: PaymentMethod) -> Result<CheckoutAttempt, CheckoutError> {
        if self.cart.is_empty() {
            return Err(CheckoutError::EmptyCart);
        }

        self.customer.validate()?;

        Ok(CheckoutAttempt::new(
            method,
            self.cart.clone(),
            self.coupons.active().cloned(),
            self.customer.clone(),
            self.surcharge,
        )?)
    }

    /// Releases the checkout lock held by `attempt` and applies its outcome.
    ///
    /// A completed order clears the cart, coupon and customer details and becomes the
    /// [`last_order`](Self::last_order). Cancellation and failure leave the sale intact.
    ///
    /// # Errors
    ///
    /// Returns the attempt's own error, or [`CheckoutError::StaleAttempt`] when `attempt` does
    /// not hold the lock.
    pub fn finish_checkout(
        &mut self,
        attempt: CheckoutAttempt,
        outcome: Result<CheckoutOutcome, CheckoutError>,
    ) -> Result<CheckoutOutcome, CheckoutError> {
        if self.in_flight != Some(attempt.id()) {
            return Err(CheckoutError::StaleAttempt(attempt.id()));
        }

        self.in_flight = None;
        self.checkout_state = attempt.state();

        let outcome = outcome?;

        if let CheckoutOutcome::Completed(order) = &outcome {
            self.cart.clear();
            self.coupons.remove();
            self.customer.clear();
            self.last_order = Some(order.clone());
        }

        Ok(outcome)
    }
}
