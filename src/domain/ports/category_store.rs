//! Driven port for category rows in the hosted data API.

use async_trait::async_trait;

use super::StoreError;
use crate::domain::category::{Category, CategoryId};

/// Insert payload for a category row.
///
/// Slug and order are already derived by the service; the store writes them
/// verbatim.
#[derive(Debug, Clone, PartialEq)]
pub struct NewCategoryRow {
    pub name: String,
    pub visible: bool,
    pub parent_id: Option<CategoryId>,
    pub slug: String,
    pub description: Option<String>,
    pub order: i32,
}

/// Column-level patch for a category row.
///
/// Doubly optional fields distinguish "leave untouched" (outer `None`) from
/// "set NULL" (`Some(None)`). Unlike [`crate::domain::CategoryChanges`] this
/// includes the slug, which only the service may derive.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub parent_id: Option<Option<CategoryId>>,
    pub slug: Option<String>,
    pub description: Option<Option<String>>,
    pub order: Option<i32>,
}

/// Port for category row storage in the hosted backend.
///
/// Listing operations return rows ordered by `order` ascending; the backend
/// applies the ordering so callers never re-sort.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoryStore: Send + Sync {
    /// Fetch every category row.
    async fn select_all(&self) -> Result<Vec<Category>, StoreError>;

    /// Fetch one row by identifier.
    async fn select_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError>;

    /// Fetch the children of `parent`, or the top level when `parent` is
    /// `None`.
    async fn select_children(
        &self,
        parent: Option<CategoryId>,
    ) -> Result<Vec<Category>, StoreError>;

    /// Insert a row and return it with its assigned identifier.
    async fn insert(&self, row: NewCategoryRow) -> Result<Category, StoreError>;

    /// Apply a patch to one row; `None` when no row matched.
    async fn update(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, StoreError>;

    /// Delete one row. Deleting an absent row is not an error.
    async fn delete(&self, id: CategoryId) -> Result<(), StoreError>;
}
