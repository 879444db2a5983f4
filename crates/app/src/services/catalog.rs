//! Catalog service.

use async_trait::async_trait;
use emission::products::Catalog;
use mockall::automock;

use crate::services::ServiceError;

#[automock]
#[async_trait]
pub trait CatalogService: Send + Sync {
    /// List every product offered at the till.
    async fn list_products(&self) -> Result<Catalog, ServiceError>;
}
