//! Wire formats exchanged with the store backend.
//!
//! Amounts are sent as decimal major units. Gateway orders come back in the
//! gateway's minor units.

use std::str::FromStr;

use emission::{
    invoice::{InvoiceTheme, MerchantProfile},
    money::{self, Amount},
    orders::{NewOrder, Order, OrderItem, OrderSource, OrderStatus, PaymentMethod},
    products::{Product, ProductId},
};
use jiff::Timestamp;
use rust_decimal::Decimal;
use rusty_money::{Money, iso::Currency};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::services::{CouponValidation, GatewayOrder, PosSettings, ServiceError};

fn invalid(message: impl Into<String>) -> ServiceError {
    ServiceError::InvalidResponse(message.into())
}

fn amount(value: Decimal, currency: &'static Currency) -> Result<Amount, ServiceError> {
    money::from_major(value, currency).map_err(|error| invalid(error.to_string()))
}

/// Error body sent with non-2xx responses.
#[derive(Debug, Default, Deserialize)]
pub(super) struct ErrorBody {
    message: Option<String>,
    error: Option<String>,
}

impl ErrorBody {
    /// Extracts the server message from a response body, falling back to the raw text.
    pub(super) fn message_from(text: &str) -> String {
        let body: Self = serde_json::from_str(text).unwrap_or_default();

        body.message
            .or(body.error)
            .unwrap_or_else(|| text.trim().to_string())
    }
}

/// A list response, either bare or wrapped in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum Listing<T> {
    Wrapped {
        #[serde(alias = "products", alias = "orders")]
        data: Vec<T>,
    },
    Bare(Vec<T>),
}

impl<T> Listing<T> {
    pub(super) fn into_inner(self) -> Vec<T> {
        match self {
            Self::Wrapped { data } | Self::Bare(data) => data,
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ProductDto {
    #[serde(alias = "_id")]
    id: String,
    name: String,
    retail_price: Option<Decimal>,
    price: Option<Decimal>,
    #[serde(default)]
    images: Vec<String>,
    #[serde(default = "in_stock_default")]
    in_stock: bool,
    category: Option<String>,
}

fn in_stock_default() -> bool {
    true
}

impl ProductDto {
    pub(super) fn into_product(self, currency: &'static Currency) -> Result<Product, ServiceError> {
        Ok(Product {
            id: ProductId::new(self.id),
            name: self.name,
            price: self.retail_price.map(|price| amount(price, currency)).transpose()?,
            legacy_price: self.price.map(|price| amount(price, currency)).transpose()?,
            images: self.images,
            in_stock: self.in_stock,
            category: self.category.filter(|category| !category.trim().is_empty()),
            currency,
        })
    }
}

#[derive(Debug, Deserialize)]
pub(super) struct SettingEntry {
    key: String,
    value: Value,
}

/// Settings as a key/value document or a list of entries.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SettingsBody {
    Entries(Vec<SettingEntry>),
    Map(Map<String, Value>),
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum SettingsDocument {
    Wrapped { settings: SettingsBody },
    Body(SettingsBody),
}

impl SettingsDocument {
    pub(super) fn into_settings(self, currency: &'static Currency) -> Result<PosSettings, ServiceError> {
        let body = match self {
            Self::Wrapped { settings } | Self::Body(settings) => settings,
        };

        let map = match body {
            SettingsBody::Map(map) => map,
            SettingsBody::Entries(entries) => entries
                .into_iter()
                .map(|entry| (entry.key, entry.value))
                .collect(),
        };

        let text = |keys: &[&str]| {
            keys.iter().find_map(|key| match map.get(*key) {
                Some(Value::String(value)) if !value.trim().is_empty() => {
                    Some(value.trim().to_string())
                }
                Some(Value::Number(value)) => Some(value.to_string()),
                _ => None,
            })
        };

        let add_on_surcharge = match text(&["addOnCharge", "embroideryCharge"]) {
            Some(value) => {
                let rate = Decimal::from_str(&value)
                    .map_err(|error| invalid(format!("invalid add-on charge {value}: {error}")))?;

                amount(rate, currency)?
            }
            None => money::zero(currency),
        };

        Ok(PosSettings {
            add_on_surcharge,
            gateway_key: text(&["razorpayKeyId", "gatewayKey"]),
            merchant: MerchantProfile {
                name: text(&["storeName"]).unwrap_or_default(),
                address: text(&["storeAddress"]),
                phone: text(&["storePhone"]),
                email: text(&["storeEmail"]),
                tax_id: text(&["gstNumber"]),
            },
            theme: InvoiceTheme {
                primary: text(&["primaryColor"]),
                accent: text(&["accentColor"]),
            },
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ValidateCouponRequest<'a> {
    pub(super) code: &'a str,
    #[serde(with = "rust_decimal::serde::float")]
    pub(super) order_amount: Decimal,
}

#[derive(Debug, Deserialize)]
pub(super) struct CouponDto {
    #[serde(alias = "_id")]
    id: String,
    code: Option<String>,
}

/// Flat `{valid, code, discount, couponId}` body. Older backends nest the
/// coupon record under `coupon` instead.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct ValidateCouponResponse {
    #[serde(default)]
    valid: bool,
    message: Option<String>,
    code: Option<String>,
    discount: Option<Decimal>,
    coupon_id: Option<String>,
    coupon: Option<CouponDto>,
}

impl ValidateCouponResponse {
    pub(super) fn into_validation(
        self,
        submitted: &str,
        currency: &'static Currency,
    ) -> Result<CouponValidation, ServiceError> {
        if !self.valid {
            return Err(ServiceError::Rejected(self.message.unwrap_or_default()));
        }

        let discount = self
            .discount
            .ok_or_else(|| invalid("coupon validation response has no discount"))?;

        let (nested_id, nested_code) = match self.coupon {
            Some(coupon) => (Some(coupon.id), coupon.code),
            None => (None, None),
        };

        let coupon_id = self
            .coupon_id
            .or(nested_id)
            .ok_or_else(|| invalid("coupon validation response has no coupon id"))?;

        Ok(CouponValidation {
            code: self
                .code
                .or(nested_code)
                .unwrap_or_else(|| submitted.to_string()),
            discount: amount(discount, currency)?,
            coupon_id,
        })
    }
}

#[derive(Debug, Serialize)]
pub(super) struct CreatePaymentOrderRequest<'a> {
    /// Major units, like every other amount sent to the backend.
    #[serde(with = "rust_decimal::serde::float")]
    pub(super) amount: Decimal,
    pub(super) currency: &'a str,
    pub(super) receipt: &'a str,
}

#[derive(Debug, Deserialize)]
pub(super) struct GatewayOrderDto {
    id: String,
    /// Minor units, as issued by the gateway.
    amount: i64,
    currency: String,
}

#[derive(Debug, Deserialize)]
pub(super) struct CreatePaymentOrderResponse {
    #[serde(default = "success_default")]
    success: bool,
    message: Option<String>,
    order: Option<GatewayOrderDto>,
}

fn success_default() -> bool {
    true
}

impl CreatePaymentOrderResponse {
    pub(super) fn into_gateway_order(
        self,
        currency: &'static Currency,
    ) -> Result<GatewayOrder, ServiceError> {
        let order = match (self.success, self.order) {
            (true, Some(order)) => order,
            (_, _) => {
                return Err(ServiceError::Unavailable(self.message.unwrap_or_else(|| {
                    "payment order could not be created".to_string()
                })));
            }
        };

        Ok(GatewayOrder {
            id: order.id,
            amount: Money::from_minor(order.amount, currency),
            currency: order.currency,
        })
    }
}

#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OrderItemDto {
    #[serde(alias = "product")]
    product_id: String,
    name: String,
    quantity: u32,
    #[serde(serialize_with = "rust_decimal::serde::float::serialize")]
    price: Decimal,
    #[serde(default, alias = "addOn", alias = "embroidery")]
    has_add_on: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    size: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    color: Option<String>,
}

impl From<&OrderItem> for OrderItemDto {
    fn from(item: &OrderItem) -> Self {
        Self {
            product_id: item.product_id.as_str().to_string(),
            name: item.name.clone(),
            quantity: item.quantity,
            price: money::to_major(&item.unit_price),
            has_add_on: item.add_on,
            size: item.size.clone(),
            color: item.color.clone(),
        }
    }
}

impl OrderItemDto {
    fn into_item(self, currency: &'static Currency) -> Result<OrderItem, ServiceError> {
        Ok(OrderItem {
            product_id: ProductId::new(self.product_id),
            name: self.name,
            quantity: self.quantity,
            unit_price: amount(self.price, currency)?,
            add_on: self.has_add_on,
            size: self.size,
            color: self.color,
        })
    }
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct CreateOrderRequest {
    customer_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    customer_email: Option<String>,
    customer_phone: String,
    shipping_address: String,
    items: Vec<OrderItemDto>,
    #[serde(with = "rust_decimal::serde::float")]
    total_amount: Decimal,
    #[serde(with = "rust_decimal::serde::float")]
    discount: Decimal,
    #[serde(skip_serializing_if = "Option::is_none")]
    coupon_code: Option<String>,
    status: String,
    payment_method: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    payment_id: Option<String>,
    source: String,
}

impl From<&NewOrder> for CreateOrderRequest {
    fn from(order: &NewOrder) -> Self {
        Self {
            customer_name: order.customer_name.clone(),
            customer_email: order.customer_email.clone(),
            customer_phone: order.customer_phone.clone(),
            shipping_address: order.shipping_address.clone(),
            items: order.items.iter().map(OrderItemDto::from).collect(),
            total_amount: money::to_major(&order.total_amount),
            discount: money::to_major(&order.discount),
            coupon_code: order.coupon_code.clone(),
            status: order.status.as_str().to_string(),
            payment_method: order.payment_method.as_str(),
            payment_id: order.payment_id.clone(),
            source: order.source.as_str().to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub(super) struct OrderDto {
    #[serde(alias = "_id")]
    id: String,
    #[serde(default)]
    invoice_id: String,
    customer_name: String,
    customer_email: Option<String>,
    #[serde(default)]
    customer_phone: String,
    #[serde(default)]
    shipping_address: String,
    #[serde(default)]
    items: Vec<OrderItemDto>,
    total_amount: Decimal,
    discount: Option<Decimal>,
    coupon_code: Option<String>,
    payment_method: String,
    payment_id: Option<String>,
    #[serde(default)]
    source: String,
    #[serde(default)]
    status: String,
    created_at: Timestamp,
}

/// Backends that predate card and UPI record gateway payments under older names.
fn payment_method(value: &str) -> Result<PaymentMethod, ServiceError> {
    PaymentMethod::from_str(value).or_else(|error| {
        match value.trim().to_ascii_lowercase().as_str() {
            "cod" => Ok(PaymentMethod::Cash),
            "razorpay" | "online" => Ok(PaymentMethod::Card),
            _ => Err(invalid(error.to_string())),
        }
    })
}

impl OrderDto {
    pub(super) fn into_order(self, currency: &'static Currency) -> Result<Order, ServiceError> {
        let items = self
            .items
            .into_iter()
            .map(|item| item.into_item(currency))
            .collect::<Result<Vec<_>, _>>()?;

        Ok(Order {
            id: self.id,
            invoice_id: self.invoice_id,
            customer_name: self.customer_name,
            customer_email: self.customer_email.filter(|email| !email.trim().is_empty()),
            customer_phone: self.customer_phone,
            shipping_address: self.shipping_address,
            items,
            total_amount: amount(self.total_amount, currency)?,
            discount: self
                .discount
                .map(|discount| amount(discount, currency))
                .transpose()?,
            coupon_code: self.coupon_code.filter(|code| !code.trim().is_empty()),
            payment_method: payment_method(&self.payment_method)?,
            payment_id: self.payment_id.filter(|id| !id.trim().is_empty()),
            source: OrderSource::from(self.source.as_str()),
            status: OrderStatus::from(self.status.as_str()),
            created_at: self.created_at,
        })
    }
}

/// A single order response, either bare or wrapped in an object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(super) enum OrderEnvelope {
    Wrapped { order: OrderDto },
    Bare(OrderDto),
}

impl OrderEnvelope {
    pub(super) fn into_inner(self) -> OrderDto {
        match self {
            Self::Wrapped { order } | Self::Bare(order) => order,
        }
    }
}
