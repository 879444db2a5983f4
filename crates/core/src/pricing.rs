//! Pricing
//!
//! Totals are derived from the cart on every read; nothing here is cached.

use decimal_percentage::Percentage;
use rust_decimal::{Decimal, prelude::FromPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

use crate::{
    cart::{Cart, CartLine},
    coupons::AppliedCoupon,
    money::Amount,
};

/// Errors that can occur while deriving cart totals.
#[derive(Debug, Error, PartialEq)]
pub enum PricingError {
    /// Money arithmetic overflowed.
    #[error("amount overflowed while pricing the cart")]
    Overflow,

    /// An amount was in a different currency to the cart (amount currency, cart currency).
    #[error("amount in {0} cannot be combined with a cart in {1}")]
    CurrencyMismatch(&'static str, &'static str),
}

fn ensure_currency(amount: &Amount, currency: &'static Currency) -> Result<(), PricingError> {
    if amount.currency() == currency {
        Ok(())
    } else {
        Err(PricingError::CurrencyMismatch(
            amount.currency().iso_alpha_code,
            currency.iso_alpha_code,
        ))
    }
}

/// Effective unit price: the product's base price plus the surcharge when the add-on is set.
///
/// # Errors
///
/// Returns a [`PricingError`] on overflow or when the surcharge currency differs.
pub fn unit_price(line: &CartLine, surcharge: Amount) -> Result<Amount, PricingError> {
    let base = line.product().base_price();

    if !line.has_add_on() {
        return Ok(base);
    }

    ensure_currency(&surcharge, base.currency())?;

    let minor = base
        .to_minor_units()
        .checked_add(surcharge.to_minor_units())
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, base.currency()))
}

/// Line total: effective unit price times quantity.
///
/// # Errors
///
/// Returns a [`PricingError`] on overflow or when the surcharge currency differs.
pub fn line_total(line: &CartLine, surcharge: Amount) -> Result<Amount, PricingError> {
    let unit = unit_price(line, surcharge)?;

    let minor = unit
        .to_minor_units()
        .checked_mul(i64::from(line.quantity()))
        .ok_or(PricingError::Overflow)?;

    Ok(Money::from_minor(minor, unit.currency()))
}

/// Sum of all line totals; zero for an empty cart.
///
/// # Errors
///
/// Returns a [`PricingError`] on overflow or currency mismatch.
pub fn subtotal(cart: &Cart, surcharge: Amount) -> Result<Amount, PricingError> {
    let minor = cart.lines().iter().try_fold(0_i64, |acc, line| {
        let total = line_total(line, surcharge)?;
        ensure_currency(&total, cart.currency())?;

        acc.checked_add(total.to_minor_units())
            .ok_or(PricingError::Overflow)
    })?;

    Ok(Money::from_minor(minor, cart.currency()))
}

/// Subtotal minus discount, floored at zero.
///
/// # Errors
///
/// Returns [`PricingError::CurrencyMismatch`] if the amounts are in different currencies.
pub fn grand_total(subtotal: Amount, discount: Amount) -> Result<Amount, PricingError> {
    ensure_currency(&discount, subtotal.currency())?;

    let minor = subtotal
        .to_minor_units()
        .saturating_sub(discount.to_minor_units())
        .max(0);

    Ok(Money::from_minor(minor, subtotal.currency()))
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PricingSummary {
    subtotal: Amount,
    discount: Amount,
    grand_total: Amount,
}

impl PricingSummary {
    /// Derives totals for a cart, add-on surcharge rate and optional coupon.
    ///
    /// # Errors
    ///
    /// Returns a [`PricingError`] on overflow or currency mismatch.
    pub fn derive(
        cart: &Cart,
        surcharge: Amount,
        coupon: Option<&AppliedCoupon>,
    ) -> Result<Self, PricingError> {
        let subtotal = subtotal(cart, surcharge)?;
        let discount = coupon.map_or_else(
            || Money::from_minor(0, cart.currency()),
            AppliedCoupon::discount,
        );

        Ok(Self {
            subtotal,
            discount,
            grand_total: grand_total(subtotal, discount)?,
        })
    }

    /// Sum of line totals before discount
    pub fn subtotal(&self) -> Amount {
        self.subtotal
    }

    /// Coupon discount as applied, which may exceed the subtotal
    pub fn discount(&self) -> Amount {
        self.discount
    }

    /// Payable amount
    pub fn grand_total(&self) -> Amount {
        self.grand_total
    }

    /// Currency of all amounts
    pub fn currency(&self) -> &'static Currency {
        self.subtotal.currency()
    }

    /// Reduction from subtotal to grand total as a fraction of the subtotal.
    pub fn savings_percent(&self) -> Percentage {
        let subtotal_minor = self.subtotal.to_minor_units();

        if subtotal_minor == 0 {
            return Percentage::from(0.0);
        }

        let savings_minor = subtotal_minor.saturating_sub(self.grand_total.to_minor_units());

        let savings_dec = Decimal::from_i64(savings_minor).unwrap_or(Decimal::ZERO);
        let subtotal_dec = Decimal::from_i64(subtotal_minor).unwrap_or(Decimal::ZERO);

        Percentage::from(savings_dec / subtotal_dec)
    }
}
