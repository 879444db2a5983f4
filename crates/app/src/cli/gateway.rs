use async_trait::async_trait;
use emission::money;
use emission_app::services::{PaymentCollection, PaymentGateway, PaymentRequest, ServiceError};
use tokio::io::{self, AsyncBufReadExt, AsyncWriteExt, BufReader};

/// Payment surface for a staffed till: the operator takes payment on the card machine or UPI
/// scanner and types the gateway payment reference. A blank reference cancels.
#[derive(Debug, Default)]
pub(crate) struct TerminalGateway;

fn io_error(error: &io::Error) -> ServiceError {
    ServiceError::Unavailable(format!("terminal input failed: {error}"))
}

#[async_trait]
impl PaymentGateway for TerminalGateway {
    async fn collect(&self, request: PaymentRequest) -> Result<PaymentCollection, ServiceError> {
        let prompt = format!(
            "Collect {amount} by {method} for {merchant} (gateway order {order})\n\
             Payment reference (blank to cancel): ",
            amount = money::format(&request.amount),
            method = request.method.label(),
            merchant = request.merchant_name,
            order = request.gateway_order_id,
        );

        let mut stdout = io::stdout();

        stdout
            .write_all(prompt.as_bytes())
            .await
            .map_err(|error| io_error(&error))?;
        stdout.flush().await.map_err(|error| io_error(&error))?;

        let mut lines = BufReader::new(io::stdin()).lines();

        let reference = lines
            .next_line()
            .await
            .map_err(|error| io_error(&error))?
            .unwrap_or_default();

        let reference = reference.trim();

        if reference.is_empty() {
            return Ok(PaymentCollection::Cancelled);
        }

        Ok(PaymentCollection::Captured {
            payment_id: reference.to_string(),
            gateway_order_id: request.gateway_order_id,
            signature: None,
        })
    }
}
