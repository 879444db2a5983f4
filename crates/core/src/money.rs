//! Money helpers
//!
//! Conversions between minor units, decimal major units and display strings.

use rust_decimal::{Decimal, RoundingStrategy, prelude::ToPrimitive};
use rusty_money::{Money, iso::Currency};
use thiserror::Error;

/// Money in a statically known ISO currency.
pub type Amount = Money<'static, Currency>;

/// Errors converting decimal amounts into minor units.
#[derive(Debug, Error, PartialEq)]
pub enum MoneyConversionError {
    /// The amount does not fit in 64-bit minor units.
    #[error("amount {0} is out of range for {1}")]
    OutOfRange(Decimal, &'static str),
}

/// Zero in the given currency.
pub fn zero(currency: &'static Currency) -> Amount {
    Money::from_minor(0, currency)
}

/// Converts a decimal major-unit amount (e.g. `499.50`) into money.
///
/// Amounts with more fractional digits than the currency supports are rounded half away from zero.
///
/// # Errors
///
/// Returns [`MoneyConversionError::OutOfRange`] when the amount cannot be represented.
pub fn from_major(amount: Decimal, currency: &'static Currency) -> Result<Amount, MoneyConversionError> {
    let out_of_range = || MoneyConversionError::OutOfRange(amount, currency.iso_alpha_code);

    let scale = Decimal::from(10_i64.checked_pow(currency.exponent).ok_or_else(out_of_range)?);

    let minor = amount
        .checked_mul(scale)
        .ok_or_else(out_of_range)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_i64()
        .ok_or_else(out_of_range)?;

    Ok(Money::from_minor(minor, currency))
}

/// Returns the amount in decimal major units, scaled to the currency exponent.
pub fn to_major(money: &Amount) -> Decimal {
    Decimal::new(money.to_minor_units(), money.currency().exponent)
}

/// Formats money with its currency symbol, e.g. `₹1200.00`.
pub fn format(money: &Amount) -> String {
    let major = to_major(money);
    let symbol = money.currency().symbol;

    if major.is_sign_negative() && !major.is_zero() {
        format!("-{symbol}{}", major.abs())
    } else {
        format!("{symbol}{major}")
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use rusty_money::iso::INR;
    use testresult::TestResult;

    use super::*;

    #[test]
    fn from_major_scales_to_minor_units() -> TestResult {
        let money = from_major(Decimal::new(49_950, 2), INR)?;

        assert_eq!(money.to_minor_units(), 49_950);

        Ok(())
    }

    #[test]
    fn from_major_rounds_excess_precision() -> TestResult {
        let money = from_major(Decimal::new(10_005, 3), INR)?;

        assert_eq!(money.to_minor_units(), 1_001);

        Ok(())
    }

    #[test]
    fn from_major_rejects_out_of_range_amounts() {
        let result = from_major(Decimal::MAX, INR);

        assert!(matches!(result, Err(MoneyConversionError::OutOfRange(_, "INR"))));
    }

    #[test]
    fn to_major_keeps_currency_exponent() {
        let major = to_major(&Money::from_minor(120_000, INR));

        assert_eq!(major.to_string(), "1200.00");
    }

    #[test]
    fn format_prefixes_symbol() {
        assert_eq!(format(&Money::from_minor(120_000, INR)), "₹1200.00");
        assert_eq!(format(&Money::from_minor(-30_000, INR)), "-₹300.00");
    }
}
