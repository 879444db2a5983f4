//! HTML invoice

use std::fmt::Write;

use crate::{invoice::Invoice, money};

use super::InvoiceError;

pub(super) fn render(invoice: &Invoice<'_>) -> Result<String, InvoiceError> {
    let order = invoice.order;
    let merchant = invoice.merchant;
    let primary = invoice.theme.primary();
    let accent = invoice.theme.accent();

    let mut html = String::with_capacity(4096);

    writeln!(html, "<!DOCTYPE html>")?;
    writeln!(html, "<html lang=\"en\">")?;
    writeln!(html, "<head>")?;
    writeln!(html, "<meta charset=\"utf-8\">")?;
    writeln!(
        html,
        "<title>Invoice {}</title>",
        escape(invoice.invoice_number())
    )?;
    writeln!(html, "<style>")?;
    writeln!(
        html,
        "body {{ font-family: Helvetica, Arial, sans-serif; color: #111827; margin: 32px; }}"
    )?;
    writeln!(
        html,
        "header {{ border-bottom: 3px solid {primary}; padding-bottom: 12px; }}"
    )?;
    writeln!(html, "h1 {{ color: {primary}; margin: 0; }}")?;
    writeln!(
        html,
        "table {{ width: 100%; border-collapse: collapse; margin-top: 24px; }}"
    )?;
    writeln!(
        html,
        "th {{ background: {primary}; color: #ffffff; text-align: left; padding: 8px; }}"
    )?;
    writeln!(
        html,
        "td {{ border-bottom: 1px solid #e5e7eb; padding: 8px; }}"
    )?;
    writeln!(html, ".num {{ text-align: right; }}")?;
    writeln!(html, ".add-on {{ color: {accent}; font-size: 0.85em; }}")?;
    writeln!(
        html,
        ".total td {{ font-weight: bold; border-top: 2px solid {primary}; }}"
    )?;
    writeln!(html, "footer {{ margin-top: 24px; font-size: 0.9em; }}")?;
    writeln!(html, "@media print {{ body {{ margin: 0; }} }}")?;
    writeln!(html, "</style>")?;
    writeln!(html, "</head>")?;
    writeln!(html, "<body>")?;

    writeln!(html, "<header>")?;
    writeln!(html, "<h1>{}</h1>", escape(&merchant.name))?;

    for detail in [&merchant.address, &merchant.phone, &merchant.email]
        .into_iter()
        .flatten()
    {
        writeln!(html, "<div>{}</div>", escape(detail))?;
    }

    if let Some(tax_id) = &merchant.tax_id {
        writeln!(html, "<div>GSTIN: {}</div>", escape(tax_id))?;
    }

    writeln!(html, "</header>")?;

    writeln!(html, "<section class=\"meta\">")?;
    writeln!(
        html,
        "<p><strong>Invoice:</strong> {}<br><strong>Order:</strong> {}<br><strong>Date:</strong> {}</p>",
        escape(invoice.invoice_number()),
        escape(&order.id),
        escape(&invoice.issued_on())
    )?;
    writeln!(html, "</section>")?;

    writeln!(html, "<section class=\"customer\">")?;
    writeln!(html, "<h2>Billed To</h2>")?;
    writeln!(html, "<div>{}</div>", escape(&order.customer_name))?;
    writeln!(html, "<div>{}</div>", escape(&order.customer_phone))?;

    if let Some(email) = &order.customer_email {
        writeln!(html, "<div>{}</div>", escape(email))?;
    }

    writeln!(html, "<div>{}</div>", escape(&order.shipping_address))?;
    writeln!(html, "</section>")?;

    writeln!(html, "<table>")?;
    writeln!(
        html,
        "<thead><tr><th>Item</th><th class=\"num\">Qty</th><th class=\"num\">Unit Price</th><th class=\"num\">Total</th></tr></thead>"
    )?;
    writeln!(html, "<tbody>")?;

    for item in &order.items {
        let line_total = item.line_total()?;

        write!(html, "<tr><td>{}", escape(&item.name))?;

        let options: Vec<&str> = [item.size.as_deref(), item.color.as_deref()]
            .into_iter()
            .flatten()
            .collect();

        if !options.is_empty() {
            write!(html, " <small>({})</small>", escape(&options.join(", ")))?;
        }

        if item.add_on {
            write!(html, "<div class=\"add-on\">+ add-on</div>")?;
        }

        writeln!(
            html,
            "</td><td class=\"num\">{}</td><td class=\"num\">{}</td><td class=\"num\">{}</td></tr>",
            item.quantity,
            escape(&money::format(&item.unit_price)),
            escape(&money::format(&line_total))
        )?;
    }

    writeln!(html, "</tbody>")?;
    writeln!(html, "<tfoot>")?;

    if let Some(discount) = order
        .discount
        .filter(|discount| discount.to_minor_units() > 0)
    {
        writeln!(
            html,
            "<tr><td colspan=\"3\">Subtotal</td><td class=\"num\">{}</td></tr>",
            escape(&money::format(&order.items_total()?))
        )?;

        let label = order
            .coupon_code
            .as_deref()
            .map_or_else(|| "Discount".to_string(), |code| format!("Discount ({code})"));

        writeln!(
            html,
            "<tr><td colspan=\"3\">{}</td><td class=\"num\">-{}</td></tr>",
            escape(&label),
            escape(&money::format(&discount))
        )?;
    }

    writeln!(
        html,
        "<tr class=\"total\"><td colspan=\"3\">Grand Total</td><td class=\"num\">{}</td></tr>",
        escape(&money::format(&order.total_amount))
    )?;
    writeln!(html, "</tfoot>")?;
    writeln!(html, "</table>")?;

    writeln!(html, "<footer>")?;
    writeln!(
        html,
        "<div><strong>Payment:</strong> {}</div>",
        order.payment_method.label()
    )?;

    if let Some(payment_id) = &order.payment_id {
        writeln!(
            html,
            "<div><strong>Reference:</strong> {}</div>",
            escape(payment_id)
        )?;
    }

    writeln!(html, "<div>Thank you for shopping with us.</div>")?;
    writeln!(html, "</footer>")?;
    writeln!(
        html,
        "<script>window.addEventListener('load', () => window.print());</script>"
    )?;
    writeln!(html, "</body>")?;
    writeln!(html, "</html>")?;

    Ok(html)
}

/// Escapes text for HTML element and attribute content.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());

    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }

    out
}

#[cfg(test)]
mod tests {
    use testresult::TestResult;

    use crate::{
        invoice::{
            Invoice, InvoiceTheme,
            tests::{sample_merchant, sample_order},
        },
        orders::{Order, PaymentMethod},
    };

    use super::*;

    #[test]
    fn escape_replaces_markup_characters() {
        assert_eq!(
            escape(r#"<a href="x">Tom & 'Jerry'</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; &#39;Jerry&#39;&lt;/a&gt;"
        );
    }

    #[test]
    fn render_includes_header_customer_and_items() -> TestResult {
        let order = sample_order();
        let merchant = sample_merchant();

        let html = Invoice::new(&order, &merchant).render_html()?;

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<h1>Emission</h1>"));
        assert!(html.contains("GSTIN: 29ABCDE1234F1Z5"));
        assert!(html.contains("INV-0042"));
        assert!(html.contains("Asha &lt;Rao&gt;"));
        assert!(html.contains("Kurta <small>(M)</small>"));
        assert!(html.contains("<div class=\"add-on\">+ add-on</div>"));
        assert!(html.contains("₹1200.00"));
        assert!(html.contains("Grand Total</td><td class=\"num\">₹1100.00"));
        assert!(html.contains("window.print()"));

        Ok(())
    }

    #[test]
    fn render_shows_discount_and_subtotal_rows_when_discounted() -> TestResult {
        let order = sample_order();
        let merchant = sample_merchant();

        let html = Invoice::new(&order, &merchant).render_html()?;

        assert!(html.contains("Subtotal</td><td class=\"num\">₹1400.00"));
        assert!(html.contains("Discount (SAVE300)</td><td class=\"num\">-₹300.00"));

        Ok(())
    }

    #[test]
    fn render_omits_discount_rows_without_discount() -> TestResult {
        let order = Order {
            discount: None,
            coupon_code: None,
            ..sample_order()
        };
        let merchant = sample_merchant();

        let html = Invoice::new(&order, &merchant).render_html()?;

        assert!(!html.contains("Subtotal"));
        assert!(!html.contains("Discount"));

        Ok(())
    }

    #[test]
    fn render_prints_payment_footer() -> TestResult {
        let cash = Order {
            payment_method: PaymentMethod::Cash,
            payment_id: None,
            ..sample_order()
        };
        let merchant = sample_merchant();

        let upi_html = Invoice::new(&sample_order(), &merchant).render_html()?;
        let cash_html = Invoice::new(&cash, &merchant).render_html()?;

        assert!(upi_html.contains("<strong>Payment:</strong> UPI"));
        assert!(upi_html.contains("<strong>Reference:</strong> pay_789"));
        assert!(cash_html.contains("<strong>Payment:</strong> Cash"));
        assert!(!cash_html.contains("Reference:"));

        Ok(())
    }

    #[test]
    fn render_uses_theme_colors() -> TestResult {
        let order = sample_order();
        let merchant = sample_merchant();
        let theme = InvoiceTheme {
            primary: Some("#123abc".to_string()),
            accent: None,
        };

        let html = Invoice::new(&order, &merchant)
            .with_theme(theme)
            .render_html()?;

        assert!(html.contains("h1 { color: #123abc; margin: 0; }"));

        Ok(())
    }
}
