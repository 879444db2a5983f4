//! Orders service.

use async_trait::async_trait;
use emission::orders::{NewOrder, Order};
use mockall::automock;

use crate::services::ServiceError;

#[automock]
#[async_trait]
pub trait OrdersService: Send + Sync {
    /// Persist a completed sale.
    async fn create_order(&self, order: NewOrder) -> Result<Order, ServiceError>;

    /// List orders, newest first as returned by the backend.
    async fn list_orders(&self) -> Result<Vec<Order>, ServiceError>;
}
