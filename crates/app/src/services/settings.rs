//! Settings service.

use async_trait::async_trait;
use emission::{
    invoice::{InvoiceTheme, MerchantProfile},
    money::Amount,
};
use mockall::automock;

use crate::services::ServiceError;

/// Store configuration relevant to the till.
#[derive(Debug, Clone, PartialEq)]
pub struct PosSettings {
    /// Per-unit add-on surcharge rate
    pub add_on_surcharge: Amount,

    /// Payment gateway public key
    pub gateway_key: Option<String>,

    /// Merchant identity for invoices
    pub merchant: MerchantProfile,

    /// Invoice colours
    pub theme: InvoiceTheme,
}

#[automock]
#[async_trait]
pub trait SettingsService: Send + Sync {
    /// Fetch the current store settings.
    async fn fetch_settings(&self) -> Result<PosSettings, ServiceError>;
}
