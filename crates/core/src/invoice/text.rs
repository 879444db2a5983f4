//! Terminal receipt

use std::io;

use tabled::{
    builder::Builder,
    settings::{Alignment, Style, object::Columns},
};

use crate::{invoice::Invoice, money};

use super::InvoiceError;

pub(super) fn write(invoice: &Invoice<'_>, mut out: impl io::Write) -> Result<(), InvoiceError> {
    let order = invoice.order;

    writeln!(out, "{}", invoice.merchant.name)?;
    writeln!(
        out,
        "Invoice {}  ·  {}",
        invoice.invoice_number(),
        invoice.issued_on()
    )?;
    writeln!(out, "{}  {}", order.customer_name, order.customer_phone)?;

    let mut builder = Builder::default();

    builder.push_record(["Item", "Qty", "Unit Price", "Total"]);

    for item in &order.items {
        let name = if item.add_on {
            format!("{}\n  + add-on", item.name)
        } else {
            item.name.clone()
        };

        builder.push_record([
            name,
            item.quantity.to_string(),
            money::format(&item.unit_price),
            money::format(&item.line_total()?),
        ]);
    }

    let mut table = builder.build();

    table.with(Style::modern_rounded());
    table.modify(Columns::new(1..4), Alignment::right());

    writeln!(out, "{table}")?;

    if let Some(discount) = order
        .discount
        .filter(|discount| discount.to_minor_units() > 0)
    {
        writeln!(out, "{:>14}  {}", "Subtotal:", money::format(&order.items_total()?))?;
        writeln!(out, "{:>14}  -{}", "Discount:", money::format(&discount))?;
    }

    writeln!(out, "{:>14}  {}", "Total:", money::format(&order.total_amount))?;
    writeln!(out, "{:>14}  {}", "Paid by:", order.payment_method.label())?;

    if let Some(payment_id) = &order.payment_id {
        writeln!(out, "{:>14}  {payment_id}", "Reference:")?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::invoice::{
        Invoice,
        tests::{sample_merchant, sample_order},
    };

    #[test]
    fn write_text_renders_items_and_summary() -> TestResult {
        let order = sample_order();
        let merchant = sample_merchant();

        let mut out = Vec::new();
        Invoice::new(&order, &merchant).write_text(&mut out)?;

        let output = String::from_utf8(out)?;

        assert!(output.contains("Emission"));
        assert!(output.contains("Kurta"));
        assert!(output.contains("+ add-on"));
        assert!(output.contains("Stole"));
        assert!(output.contains("Subtotal:  ₹1400.00"));
        assert!(output.contains("Discount:  -₹300.00"));
        assert!(output.contains("Total:  ₹1100.00"));
        assert!(output.contains("Reference:  pay_789"));

        Ok(())
    }
}
