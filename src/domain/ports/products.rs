//! Driving ports for product use-cases.

use async_trait::async_trait;

use crate::domain::category::CategoryId;
use crate::domain::error::Error;
use crate::domain::product::{NewProduct, Product, ProductChanges, ProductId};

/// Read side of the product catalogue.
///
/// Reads follow the storefront degradation policy: a failed backend call is
/// logged and surfaces as an empty list or `None`, never as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductsQuery: Send + Sync {
    /// All products, for admin listings.
    async fn list(&self) -> Vec<Product>;

    /// One product by identifier.
    async fn get(&self, id: ProductId) -> Option<Product>;

    /// Products in the category and all of its descendants, for admin
    /// listings.
    async fn list_by_category(&self, category: CategoryId) -> Vec<Product>;

    /// The public storefront listing: active and visible products only,
    /// optionally filtered to a category subtree.
    async fn storefront(&self, category: Option<CategoryId>) -> Vec<Product>;
}

/// Write side of the product catalogue.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductsCommand: Send + Sync {
    /// Create a product.
    async fn create(&self, draft: NewProduct) -> Result<Product, Error>;

    /// Apply changes to a product.
    async fn update(&self, id: ProductId, changes: ProductChanges) -> Result<Product, Error>;

    /// Delete a product. Returns `false` when the product does not exist.
    async fn delete(&self, id: ProductId) -> Result<bool, Error>;
}
