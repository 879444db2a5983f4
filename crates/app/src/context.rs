//! App Context

use std::{fmt, sync::Arc};

use jiff::tz::TimeZone;
use rusty_money::iso::Currency;
use thiserror::Error;

use crate::{
    backend::{BackendError, RestBackend},
    checkout::Checkout,
    config::PosConfig,
    services::{
        CatalogService, CouponsService, OrdersService, PaymentGateway, PaymentsService,
        PosSettings, ServiceError, SettingsService,
    },
    session::PosSession,
};

#[derive(Debug, Error)]
pub enum AppInitError {
    #[error("failed to create backend client")]
    Backend(#[from] BackendError),
}

#[derive(Clone)]
pub struct AppContext {
    pub catalog: Arc<dyn CatalogService>,
    pub settings: Arc<dyn SettingsService>,
    pub coupons: Arc<dyn CouponsService>,
    pub payments: Arc<dyn PaymentsService>,
    pub orders: Arc<dyn OrdersService>,
    pub currency: &'static Currency,
    pub time_zone: TimeZone,
}

impl fmt::Debug for AppContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AppContext")
            .field("currency", &self.currency.iso_alpha_code)
            .field("time_zone", &self.time_zone.iana_name())
            .finish_non_exhaustive()
    }
}

impl AppContext {
    /// Build application context from configuration.
    ///
    /// # Errors
    ///
    /// Returns an error when the backend client cannot be created.
    pub fn from_config(config: &PosConfig) -> Result<Self, AppInitError> {
        let backend = Arc::new(RestBackend::new(
            &config.backend.api_url,
            config.backend.api_token.clone(),
            config.locale.currency,
        )?);

        Ok(Self {
            catalog: backend.clone(),
            settings: backend.clone(),
            coupons: backend.clone(),
            payments: backend.clone(),
            orders: backend,
            currency: config.locale.currency,
            time_zone: config.locale.time_zone.clone(),
        })
    }

    /// Fetch the store settings and open an empty session priced with them.
    ///
    /// # Errors
    ///
    /// Returns a [`ServiceError`] when the settings cannot be fetched.
    pub async fn open_session(&self) -> Result<(PosSession, PosSettings), ServiceError> {
        let settings = self.settings.fetch_settings().await?;
        let session = PosSession::new(self.currency, settings.add_on_surcharge);

        Ok((session, settings))
    }

    /// Checkout wired to this context's services and the given payment surface.
    #[must_use]
    pub fn checkout(&self, gateway: Arc<dyn PaymentGateway>) -> Checkout {
        Checkout::new(
            self.settings.clone(),
            self.payments.clone(),
            gateway,
            self.orders.clone(),
        )
    }
}
