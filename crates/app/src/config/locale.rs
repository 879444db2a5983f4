//! Locale Config

use clap::Args;
use jiff::tz::TimeZone;
use rusty_money::{Findable, iso::Currency};

use crate::config::ConfigError;

/// Currency and time zone settings.
#[derive(Debug, Args)]
pub struct LocaleConfig {
    /// ISO 4217 currency code for prices
    #[arg(long, env = "EMISSION_CURRENCY", default_value = "INR", value_parser = parse_currency)]
    pub currency: &'static Currency,

    /// IANA time zone for invoice and export dates
    #[arg(long, env = "EMISSION_TIME_ZONE", default_value = "UTC", value_parser = parse_time_zone)]
    pub time_zone: TimeZone,
}

/// Looks up an ISO 4217 currency code, ignoring case.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownCurrency`] for unknown codes.
pub fn parse_currency(code: &str) -> Result<&'static Currency, ConfigError> {
    let code = code.trim().to_ascii_uppercase();

    Currency::find(&code).ok_or(ConfigError::UnknownCurrency(code))
}

/// Looks up an IANA time zone name.
///
/// # Errors
///
/// Returns [`ConfigError::UnknownTimeZone`] for unknown names.
pub fn parse_time_zone(name: &str) -> Result<TimeZone, ConfigError> {
    TimeZone::get(name.trim()).map_err(|source| ConfigError::UnknownTimeZone {
        name: name.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn currency_codes_are_case_insensitive() -> Result<(), ConfigError> {
        let currency = parse_currency(" inr ")?;

        assert_eq!(currency.iso_alpha_code, "INR");

        Ok(())
    }

    #[test]
    fn unknown_currency_is_rejected() {
        assert!(matches!(
            parse_currency("XYZ"),
            Err(ConfigError::UnknownCurrency(code)) if code == "XYZ"
        ));
    }

    #[test]
    fn utc_time_zone_parses() -> Result<(), ConfigError> {
        parse_time_zone("UTC")?;

        Ok(())
    }
}
