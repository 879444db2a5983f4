//! REST client for the store backend.

use std::time::Duration;

use async_trait::async_trait;
use emission::{
    money::{self, Amount},
    orders::{NewOrder, Order},
    products::Catalog,
};
use reqwest::{Client, RequestBuilder};
use rusty_money::iso::Currency;
use serde::{Serialize, de::DeserializeOwned};
use thiserror::Error;
use tracing::{debug, error};

use crate::services::{
    CatalogService, CouponValidation, CouponsService, GatewayOrder, OrdersService,
    PaymentsService, PosSettings, ServiceError, SettingsService,
};

mod wire;

use wire::{
    CreateOrderRequest, CreatePaymentOrderRequest, CreatePaymentOrderResponse, ErrorBody,
    Listing, OrderDto, OrderEnvelope, ProductDto, SettingsDocument, ValidateCouponRequest,
    ValidateCouponResponse,
};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Errors constructing the backend client.
#[derive(Debug, Error)]
pub enum BackendError {
    /// The HTTP client could not be built.
    #[error("failed to build HTTP client: {0}")]
    Client(#[from] reqwest::Error),

    /// The base URL is not an absolute http(s) URL.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(String),
}

/// Store backend reached over HTTP.
#[derive(Debug, Clone)]
pub struct RestBackend {
    http: Client,
    base_url: String,
    token: Option<String>,
    currency: &'static Currency,
}

impl RestBackend {
    /// Create a client for the backend at `base_url`, e.g. `"https://shop.example/api"`.
    ///
    /// # Errors
    ///
    /// Returns a [`BackendError`] when the URL is not http(s) or the client cannot be built.
    pub fn new(
        base_url: &str,
        token: Option<String>,
        currency: &'static Currency,
    ) -> Result<Self, BackendError> {
        let base_url = base_url.trim().trim_end_matches('/');

        if !(base_url.starts_with("http://") || base_url.starts_with("https://")) {
            return Err(BackendError::InvalidUrl(base_url.to_string()));
        }

        let http = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .user_agent(concat!("emission-pos/", env!("CARGO_PKG_VERSION")))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.to_string(),
            token: token.filter(|token| !token.trim().is_empty()),
            currency,
        })
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ServiceError> {
        self.send(self.http.get(self.url(path))).await
    }

    async fn post<B, T>(&self, path: &str, body: &B) -> Result<T, ServiceError>
    where
        B: Serialize + Sync + ?Sized,
        T: DeserializeOwned,
    {
        self.send(self.http.post(self.url(path)).json(body)).await
    }

    async fn send<T: DeserializeOwned>(&self, request: RequestBuilder) -> Result<T, ServiceError> {
        let request = match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        };

        let response = request.send().await.map_err(|error| {
            error!(%error, "backend request failed");

            ServiceError::Unavailable(error.to_string())
        })?;

        let status = response.status();
        let url = response.url().path().to_string();
        let text = response.text().await.unwrap_or_default();

        if !status.is_success() {
            let message = ErrorBody::message_from(&text);

            if status.is_client_error() {
                debug!(%status, %url, %message, "backend rejected request");

                return Err(ServiceError::Rejected(message));
            }

            error!(%status, %url, %message, "backend request failed");

            return Err(ServiceError::Unavailable(format!(
                "request failed with status {status}: {message}"
            )));
        }

        serde_json::from_str(&text).map_err(|error| {
            ServiceError::InvalidResponse(format!("unexpected response from {url}: {error}"))
        })
    }
}

#[async_trait]
impl CatalogService for RestBackend {
    async fn list_products(&self) -> Result<Catalog, ServiceError> {
        let listing: Listing<ProductDto> = self.get("products").await?;

        let products = listing
            .into_inner()
            .into_iter()
            .map(|product| product.into_product(self.currency))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Catalog::new(products))
    }
}

#[async_trait]
impl SettingsService for RestBackend {
    async fn fetch_settings(&self) -> Result<PosSettings, ServiceError> {
        let document: SettingsDocument = self.get("settings").await?;

        document.into_settings(self.currency)
    }
}

#[async_trait]
impl CouponsService for RestBackend {
    async fn validate_coupon(
        &self,
        code: &str,
        order_amount: Amount,
    ) -> Result<CouponValidation, ServiceError> {
        let request = ValidateCouponRequest {
            code,
            order_amount: money::to_major(&order_amount),
        };

        let response: ValidateCouponResponse = self.post("coupons/validate", &request).await?;

        response.into_validation(code, self.currency)
    }
}

#[async_trait]
impl PaymentsService for RestBackend {
    async fn create_payment_order(
        &self,
        amount: Amount,
        receipt: &str,
    ) -> Result<GatewayOrder, ServiceError> {
        let request = CreatePaymentOrderRequest {
            amount: money::to_major(&amount),
            currency: amount.currency().iso_alpha_code,
            receipt,
        };

        let response: CreatePaymentOrderResponse =
            self.post("payment/create-order", &request).await?;

        response.into_gateway_order(amount.currency())
    }
}

#[async_trait]
impl OrdersService for RestBackend {
    async fn create_order(&self, order: NewOrder) -> Result<Order, ServiceError> {
        let request = CreateOrderRequest::from(&order);

        let envelope: OrderEnvelope = self.post("orders", &request).await?;

        envelope.into_inner().into_order(self.currency)
    }

    async fn list_orders(&self) -> Result<Vec<Order>, ServiceError> {
        let listing: Listing<OrderDto> = self.get("orders").await?;

        listing
            .into_inner()
            .into_iter()
            .map(|order| order.into_order(self.currency))
            .collect()
    }
}
