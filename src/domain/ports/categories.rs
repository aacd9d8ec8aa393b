//! Driving ports for category use-cases.

use async_trait::async_trait;
use serde::Serialize;
use utoipa::ToSchema;

use crate::domain::category::{Category, CategoryChanges, CategoryId, NewCategory};
use crate::domain::error::Error;

/// A navigation entry: one visible top-level category and its visible
/// children, in display order.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CategoryNode {
    pub category: Category,
    pub subcategories: Vec<Category>,
}

/// Read side of the category tree.
///
/// Reads follow the storefront degradation policy: a failed backend call is
/// logged and surfaces as an empty list or `None`, never as an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoriesQuery: Send + Sync {
    /// All categories, ordered by display position.
    async fn list(&self) -> Vec<Category>;

    /// One category by identifier.
    async fn get(&self, id: CategoryId) -> Option<Category>;

    /// Categories without a parent, ordered.
    async fn top_level(&self) -> Vec<Category>;

    /// Children of `parent`, or the top level when `parent` is `None`.
    async fn subcategories(&self, parent: Option<CategoryId>) -> Vec<Category>;

    /// The category plus all transitive children.
    async fn descendants(&self, id: CategoryId) -> Vec<Category>;

    /// The storefront navigation tree: visible top-level categories paired
    /// with their visible children.
    async fn navigation(&self) -> Vec<CategoryNode>;
}

/// Write side of the category tree.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CategoriesCommand: Send + Sync {
    /// Create a category, deriving its slug and appending it after its
    /// siblings.
    async fn create(&self, draft: NewCategory) -> Result<Category, Error>;

    /// Apply changes to a category. The default category is protected.
    async fn update(&self, id: CategoryId, changes: CategoryChanges) -> Result<Category, Error>;

    /// Delete a category, re-parenting its children and reassigning its
    /// products to the default category. Returns `false` when the category
    /// does not exist. The default category is protected.
    async fn delete(&self, id: CategoryId) -> Result<bool, Error>;

    /// Move a category to a new position and (optionally) parent, keeping
    /// sibling order dense.
    async fn reorder(
        &self,
        id: CategoryId,
        new_order: i32,
        new_parent: Option<CategoryId>,
    ) -> Result<(), Error>;
}
