//! Order export
//!
//! CSV export of orders for bookkeeping.

use std::{borrow::Cow, io};

use jiff::tz::TimeZone;
use thiserror::Error;

use crate::{money, orders::Order};

/// CSV header row.
pub const CSV_HEADER: [&str; 8] = [
    "Invoice ID",
    "Order ID",
    "Customer",
    "Email",
    "Amount",
    "Status",
    "Source",
    "Date",
];

/// Errors that can occur while exporting orders.
#[derive(Debug, Error)]
pub enum ExportError {
    /// Writing the export failed.
    #[error("failed to write export")]
    Io(#[from] io::Error),
}

/// Writes orders as CSV, dating each order in UTC.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if writing fails.
pub fn write_orders_csv(out: impl io::Write, orders: &[Order]) -> Result<(), ExportError> {
    write_orders_csv_in(out, orders, &TimeZone::UTC)
}

/// Writes orders as CSV, dating each order in the given time zone.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if writing fails.
pub fn write_orders_csv_in(
    mut out: impl io::Write,
    orders: &[Order],
    time_zone: &TimeZone,
) -> Result<(), ExportError> {
    write_record(&mut out, CSV_HEADER.iter().copied())?;

    for order in orders {
        let amount = money::to_major(&order.total_amount).to_string();
        let date = order
            .created_at
            .to_zoned(time_zone.clone())
            .strftime("%Y-%m-%d")
            .to_string();

        write_record(
            &mut out,
            [
                order.invoice_id.as_str(),
                order.id.as_str(),
                order.customer_name.as_str(),
                order.customer_email.as_deref().unwrap_or_default(),
                amount.as_str(),
                order.status.as_str(),
                order.source.as_str(),
                date.as_str(),
            ],
        )?;
    }

    out.flush()?;

    Ok(())
}

/// Renders orders as a CSV string.
///
/// # Errors
///
/// Returns [`ExportError::Io`] if writing fails.
pub fn orders_csv(orders: &[Order]) -> Result<String, ExportError> {
    let mut out = Vec::new();

    write_orders_csv(&mut out, orders)?;

    Ok(String::from_utf8_lossy(&out).into_owned())
}

fn write_record<'a>(
    out: &mut impl io::Write,
    fields: impl IntoIterator<Item = &'a str>,
) -> Result<(), ExportError> {
    let line = fields
        .into_iter()
        .map(quote)
        .collect::<Vec<_>>()
        .join(",");

    out.write_all(line.as_bytes())?;
    out.write_all(b"\r\n")?;

    Ok(())
}

/// Quotes a field when it contains a delimiter, quote or line break.
fn quote(field: &str) -> Cow<'_, str> {
    if field.contains(&[',', '"', '\r', '\n'][..]) {
        Cow::Owned(format!("\"{}\"", field.replace('"', "\"\"")))
    } else {
        Cow::Borrowed(field)
    }
}

#[cfg(test)]
mod tests {
    use jiff::Timestamp;
    use rusty_money::{Money, iso::INR};
    use testresult::TestResult;

    use crate::orders::{OrderSource, OrderStatus, PaymentMethod};

    use super::*;

    fn order(id: &str, customer: &str) -> Order {
        Order {
            id: id.to_string(),
            invoice_id: format!("INV-{id}"),
            customer_name: customer.to_string(),
            customer_email: None,
            customer_phone: "9876543210".to_string(),
            shipping_address: "In-Store Purchase".to_string(),
            items: Vec::new(),
            total_amount: Money::from_minor(149_900, INR),
            discount: None,
            coupon_code: None,
            payment_method: PaymentMethod::Cash,
            payment_id: None,
            source: OrderSource::Pos,
            status: OrderStatus::Completed,
            created_at: Timestamp::from_second(1_760_000_000).unwrap_or(Timestamp::UNIX_EPOCH),
        }
    }

    #[test]
    fn header_matches_export_columns() -> TestResult {
        let csv = orders_csv(&[])?;

        assert_eq!(
            csv,
            "Invoice ID,Order ID,Customer,Email,Amount,Status,Source,Date\r\n"
        );

        Ok(())
    }

    #[test]
    fn rows_use_major_units_and_iso_dates() -> TestResult {
        let csv = orders_csv(&[order("1", "Asha")])?;

        let row = csv.lines().nth(1).ok_or("missing row")?;

        assert_eq!(row, "INV-1,1,Asha,,1499.00,completed,pos,2025-10-09");

        Ok(())
    }

    #[test]
    fn fields_with_delimiters_are_quoted() -> TestResult {
        let csv = orders_csv(&[order("2", "Rao, \"Asha\"")])?;

        let row = csv.lines().nth(1).ok_or("missing row")?;

        assert!(row.starts_with("INV-2,2,\"Rao, \"\"Asha\"\"\","));

        Ok(())
    }

    #[test]
    fn dates_follow_time_zone() -> TestResult {
        let late = Order {
            created_at: "2025-10-09T20:00:00Z".parse()?,
            ..order("3", "Asha")
        };
        let tz = TimeZone::fixed(jiff::tz::offset(5));

        let mut out = Vec::new();
        write_orders_csv_in(&mut out, &[late], &tz)?;

        let csv = String::from_utf8(out)?;

        assert!(csv.trim_end().ends_with("2025-10-10"));

        Ok(())
    }
}
