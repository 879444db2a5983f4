//! Customer details captured at the till

use std::fmt::{Display, Formatter, Result as FmtResult};

use smallvec::SmallVec;
use thiserror::Error;

/// Shipping address recorded for in-person sales without a customer address.
pub const IN_STORE_ADDRESS: &str = "In-Store Purchase";

/// A customer field required before checkout.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CustomerField {
    /// Customer name
    Name,

    /// Customer phone number
    Phone,
}

impl Display for CustomerField {
    fn fmt(&self, f: &mut Formatter<'_>) -> FmtResult {
        match self {
            Self::Name => f.write_str("name"),
            Self::Phone => f.write_str("phone"),
        }
    }
}

/// Required customer fields that were left blank.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("missing required customer details: {}", join_fields(.0))]
pub struct MissingFields(pub SmallVec<[CustomerField; 2]>);

fn join_fields(fields: &[CustomerField]) -> String {
    fields
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Customer details for the current sale.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CustomerInfo {
    /// Customer name (required)
    pub name: String,

    /// Customer phone (required)
    pub phone: String,

    /// Customer email
    pub email: Option<String>,

    /// Shipping address
    pub address: Option<String>,
}

impl CustomerInfo {
    /// Creates customer details with the required fields.
    pub fn new(name: impl Into<String>, phone: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            phone: phone.into(),
            ..Self::default()
        }
    }

    /// Checks that name and phone are present.
    ///
    /// # Errors
    ///
    /// Returns [`MissingFields`] listing every blank required field.
    pub fn validate(&self) -> Result<(), MissingFields> {
        let mut missing = SmallVec::new();

        if self.name.trim().is_empty() {
            missing.push(CustomerField::Name);
        }

        if self.phone.trim().is_empty() {
            missing.push(CustomerField::Phone);
        }

        if missing.is_empty() {
            Ok(())
        } else {
            Err(MissingFields(missing))
        }
    }

    /// Email, if one was entered.
    pub fn email(&self) -> Option<&str> {
        non_blank(self.email.as_deref())
    }

    /// The entered address or the in-store placeholder.
    pub fn shipping_address(&self) -> &str {
        non_blank(self.address.as_deref()).unwrap_or(IN_STORE_ADDRESS)
    }

    /// Resets every field to blank.
    pub fn clear(&mut self) {
        *self = Self::default();
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|value| !value.is_empty())
}

#[cfg(test)]
mod tests {
    use smallvec::smallvec;

    use super::*;

    #[test]
    fn validate_accepts_name_and_phone() {
        assert!(CustomerInfo::new("Asha", "9876543210").validate().is_ok());
    }

    #[test]
    fn validate_lists_every_missing_field() {
        let customer = CustomerInfo::new("  ", "");

        let result = customer.validate();

        assert_eq!(
            result,
            Err(MissingFields(smallvec![CustomerField::Name, CustomerField::Phone]))
        );
    }

    #[test]
    fn missing_fields_message_names_fields() {
        let error = MissingFields(smallvec![CustomerField::Phone]);

        assert_eq!(error.to_string(), "missing required customer details: phone");
    }

    #[test]
    fn blank_address_falls_back_to_in_store_placeholder() {
        let mut customer = CustomerInfo::new("Asha", "9876543210");
        assert_eq!(customer.shipping_address(), IN_STORE_ADDRESS);

        customer.address = Some("   ".to_string());
        assert_eq!(customer.shipping_address(), IN_STORE_ADDRESS);

        customer.address = Some("12 MG Road".to_string());
        assert_eq!(customer.shipping_address(), "12 MG Road");
    }

    #[test]
    fn blank_email_is_treated_as_absent() {
        let customer = CustomerInfo {
            email: Some(String::new()),
            ..CustomerInfo::new("Asha", "9876543210")
        };

        assert_eq!(customer.email(), None);
    }

    #[test]
    fn clear_resets_to_blank() {
        let mut customer = CustomerInfo {
            email: Some("asha@example.com".to_string()),
            ..CustomerInfo::new("Asha", "9876543210")
        };

        customer.clear();

        assert_eq!(customer, CustomerInfo::default());
    }
}
