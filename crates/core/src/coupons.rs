//! Coupons
//!
//! Coupons are validated and resolved to an absolute discount by the backend. This module only
//! holds the result and enforces that a single coupon is active at a time.

use rusty_money::iso::Currency;
use thiserror::Error;

use crate::money::{Amount, zero};

/// Errors raised while applying a coupon locally.
#[derive(Debug, Error, PartialEq)]
pub enum CouponError {
    /// No code was entered.
    #[error("enter a coupon code")]
    EmptyCode,

    /// Another coupon is already applied and must be removed first.
    #[error("coupon {0} is already applied; remove it before applying another")]
    AlreadyApplied(String),

    /// The resolved discount was negative.
    #[error("coupon {0} resolved to a negative discount")]
    NegativeDiscount(String),
}

/// Normalizes a coupon code as entered by the operator.
///
/// # Errors
///
/// Returns [`CouponError::EmptyCode`] when nothing but whitespace was entered.
pub fn normalize_code(code: &str) -> Result<String, CouponError> {
    let code = code.trim();

    if code.is_empty() {
        return Err(CouponError::EmptyCode);
    }

    Ok(code.to_uppercase())
}

/// A coupon accepted by the backend.
#[derive(Debug, Clone, PartialEq)]
pub struct AppliedCoupon {
    code: String,
    discount: Amount,
    coupon_id: String,
}

impl AppliedCoupon {
    /// Creates an applied coupon from a validation result.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::NegativeDiscount`] if the discount is below zero.
    pub fn new(
        code: impl Into<String>,
        discount: Amount,
        coupon_id: impl Into<String>,
    ) -> Result<Self, CouponError> {
        let code = code.into();

        if discount.to_minor_units() < 0 {
            return Err(CouponError::NegativeDiscount(code));
        }

        Ok(Self {
            code,
            discount,
            coupon_id: coupon_id.into(),
        })
    }

    /// Coupon code
    pub fn code(&self) -> &str {
        &self.code
    }

    /// Absolute discount amount
    pub fn discount(&self) -> Amount {
        self.discount
    }

    /// Backend-assigned coupon identifier
    pub fn coupon_id(&self) -> &str {
        &self.coupon_id
    }
}

/// Holds at most one applied coupon.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CouponSlot {
    active: Option<AppliedCoupon>,
}

impl CouponSlot {
    /// Checks whether a coupon could be applied right now.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::AlreadyApplied`] when a coupon is active.
    pub fn ensure_vacant(&self) -> Result<(), CouponError> {
        match &self.active {
            Some(active) => Err(CouponError::AlreadyApplied(active.code.clone())),
            None => Ok(()),
        }
    }

    /// Stores an applied coupon.
    ///
    /// # Errors
    ///
    /// Returns [`CouponError::AlreadyApplied`] when a coupon is already active; the active
    /// coupon is left in place.
    pub fn apply(&mut self, coupon: AppliedCoupon) -> Result<(), CouponError> {
        self.ensure_vacant()?;
        self.active = Some(coupon);

        Ok(())
    }

    /// Clears the active coupon, returning it.
    pub fn remove(&mut self) -> Option<AppliedCoupon> {
        self.active.take()
    }

    /// The active coupon, if any.
    pub fn active(&self) -> Option<&AppliedCoupon> {
        self.active.as_ref()
    }

    /// Discount of the active coupon, or zero.
    pub fn discount(&self, currency: &'static Currency) -> Amount {
        self.active
            .as_ref()
            .map_or_else(|| zero(currency), AppliedCoupon::discount)
    }
}
