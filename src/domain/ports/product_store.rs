//! Driven port for product rows in the hosted data API.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::category::CategoryId;
use crate::domain::product::{NewProduct, Product, ProductChanges, ProductId};

/// Port for product row storage in the hosted backend.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait ProductStore: Send + Sync {
    /// Fetch every product row.
    async fn select_all(&self) -> Result<Vec<Product>, StoreError>;

    /// Fetch one row by identifier.
    async fn select_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError>;

    /// Fetch the rows belonging to any of the given categories.
    async fn select_by_categories(
        &self,
        categories: &[CategoryId],
    ) -> Result<Vec<Product>, StoreError>;

    /// Insert a row and return it with its assigned identifier.
    async fn insert(&self, row: NewProduct) -> Result<Product, StoreError>;

    /// Apply a patch to one row; `None` when no row matched.
    async fn update(
        &self,
        id: ProductId,
        patch: ProductChanges,
    ) -> Result<Option<Product>, StoreError>;

    /// Delete one row. Deleting an absent row is not an error.
    async fn delete(&self, id: ProductId) -> Result<(), StoreError>;

    /// Move every product in category `from` into category `to`.
    ///
    /// Used by the category deletion cascade to park orphaned products under
    /// the default category.
    async fn reassign_category(&self, from: CategoryId, to: CategoryId)
    -> Result<(), StoreError>;
}
