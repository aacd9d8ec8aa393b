//! Category tree entities.
//!
//! Categories form a two-level tree rooted at a protected default category
//! that always exists and owns products whose own category is removed.
//! Sibling display order is an integer kept dense and unique by the
//! categories service, not by any schema constraint.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Identifier for a category row in the hosted backend.
pub type CategoryId = i64;

/// The protected "all products" root category.
///
/// It can never be edited, deleted, or re-parented, and it receives the
/// products of any category that is deleted.
pub const DEFAULT_CATEGORY_ID: CategoryId = 1;

/// A product category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Stable identifier assigned by the backend.
    pub id: CategoryId,
    /// Display name shown in navigation and admin listings.
    pub name: String,
    /// Hidden categories stay out of storefront navigation.
    pub visible: bool,
    /// Parent category; `None` for top-level categories.
    pub parent_id: Option<CategoryId>,
    /// URL-safe identifier derived from the name.
    pub slug: String,
    /// Optional marketing copy for the category page.
    pub description: Option<String>,
    /// Display position among siblings sharing the same parent.
    pub order: i32,
}

impl Category {
    /// Whether this is the protected default category.
    #[must_use]
    pub fn is_default(&self) -> bool {
        self.id == DEFAULT_CATEGORY_ID
    }

    /// Whether this category sits at the top level of the tree.
    #[must_use]
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

/// Input for creating a category. Slug and order are derived, never supplied.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewCategory {
    pub name: String,
    /// Defaults to visible when omitted.
    #[serde(default = "default_visible")]
    pub visible: bool,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
    #[serde(default)]
    pub description: Option<String>,
}

fn default_visible() -> bool {
    true
}

/// Partial update for a category.
///
/// `parent_id` and `description` are doubly optional: the outer `None` leaves
/// the field untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CategoryChanges {
    pub name: Option<String>,
    pub visible: Option<bool>,
    pub parent_id: Option<Option<CategoryId>>,
    pub description: Option<Option<String>>,
    pub order: Option<i32>,
}

impl CategoryChanges {
    /// Whether the update carries no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.visible.is_none()
            && self.parent_id.is_none()
            && self.description.is_none()
            && self.order.is_none()
    }
}

/// Collect `root` and all of its transitive children from `all`.
///
/// Breadth-first over the in-memory list; the tree is nominally two levels
/// deep but deeper chains are followed if the data contains them. Returns an
/// empty list when `root` is not present. Each category is visited at most
/// once, so a parent cycle in stored data cannot hang the walk.
#[must_use]
pub fn collect_descendants(all: &[Category], root: CategoryId) -> Vec<Category> {
    let mut descendants = Vec::new();
    let mut visited = std::collections::HashSet::from([root]);
    let mut queue = std::collections::VecDeque::from([root]);
    while let Some(id) = queue.pop_front() {
        let Some(category) = all.iter().find(|c| c.id == id) else {
            continue;
        };
        descendants.push(category.clone());
        queue.extend(
            all.iter()
                .filter(|c| c.parent_id == Some(id) && visited.insert(c.id))
                .map(|c| c.id),
        );
    }
    descendants
}
