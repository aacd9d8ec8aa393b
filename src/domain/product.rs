//! Product catalogue entities.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::domain::category::{CategoryId, DEFAULT_CATEGORY_ID};

/// Identifier for a product row in the hosted backend.
pub type ProductId = i64;

/// How a product is sized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum SizeKind {
    /// Letter sizing (PP–GG).
    Clothing,
    /// Numeric footwear sizing.
    Shoes,
}

/// A colour option offered for a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductColor {
    pub name: String,
    /// Hex value, e.g. `#1a1a1a`.
    #[serde(default)]
    pub value: Option<String>,
    /// Colour-specific product photo.
    #[serde(default)]
    pub image: Option<String>,
    /// Custom colours are merchant-entered rather than from the standard
    /// palette.
    #[serde(default)]
    pub custom: bool,
}

/// A size/colour combination with its own stock count.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ProductVariant {
    pub size: String,
    #[serde(default)]
    pub color: Option<String>,
    pub stock: i32,
}

/// How a discount is applied to the base price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub enum DiscountKind {
    Percentage,
    Fixed,
}

/// An active discount on a product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Discount {
    pub kind: DiscountKind,
    /// Percentage points or an absolute amount, depending on `kind`.
    pub value: f64,
    /// Discount runs until this instant; `None` means open-ended.
    #[serde(default)]
    pub expires_at: Option<DateTime<Utc>>,
}

/// A catalogue product.
///
/// `active` gates purchasability, `visible` gates storefront listing; the
/// public catalogue only shows products that are both.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    /// Main product photo.
    #[serde(default)]
    pub image: Option<String>,
    pub category_id: CategoryId,
    pub active: bool,
    pub visible: bool,
    pub stock: i32,
    #[serde(default)]
    pub size_kind: Option<SizeKind>,
    #[serde(default)]
    pub colors: Vec<ProductColor>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    /// When set, every colour option must carry its own photo.
    #[serde(default)]
    pub images_required_for_colors: bool,
    #[serde(default)]
    pub discount: Option<Discount>,
    /// Launch promotions badge the product on the storefront.
    #[serde(default)]
    pub is_launch: bool,
    #[serde(default)]
    pub launch_expires_at: Option<DateTime<Utc>>,
}

impl Product {
    /// Whether the product appears in the public storefront listing.
    #[must_use]
    pub fn is_listed(&self) -> bool {
        self.active && self.visible
    }
}

/// Input for creating a product.
#[derive(Debug, Clone, PartialEq, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct NewProduct {
    pub name: String,
    pub price: f64,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    /// Defaults to the protected default category.
    #[serde(default = "default_category")]
    pub category_id: CategoryId,
    #[serde(default = "default_flag")]
    pub active: bool,
    #[serde(default = "default_flag")]
    pub visible: bool,
    #[serde(default)]
    pub stock: i32,
    #[serde(default)]
    pub size_kind: Option<SizeKind>,
    #[serde(default)]
    pub colors: Vec<ProductColor>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
    #[serde(default)]
    pub images_required_for_colors: bool,
    #[serde(default)]
    pub discount: Option<Discount>,
    #[serde(default)]
    pub is_launch: bool,
    #[serde(default)]
    pub launch_expires_at: Option<DateTime<Utc>>,
}

fn default_category() -> CategoryId {
    DEFAULT_CATEGORY_ID
}

fn default_flag() -> bool {
    true
}

/// Partial update for a product.
///
/// Doubly optional fields distinguish "leave untouched" (outer `None`) from
/// "clear" (`Some(None)`).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ProductChanges {
    pub name: Option<String>,
    pub price: Option<f64>,
    pub description: Option<Option<String>>,
    pub image: Option<Option<String>>,
    pub category_id: Option<CategoryId>,
    pub active: Option<bool>,
    pub visible: Option<bool>,
    pub stock: Option<i32>,
    pub size_kind: Option<Option<SizeKind>>,
    pub colors: Option<Vec<ProductColor>>,
    pub variants: Option<Vec<ProductVariant>>,
    pub images_required_for_colors: Option<bool>,
    pub discount: Option<Option<Discount>>,
    pub is_launch: Option<bool>,
    pub launch_expires_at: Option<Option<DateTime<Utc>>>,
}

impl ProductChanges {
    /// Whether the update carries no changes at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.name.is_none()
            && self.price.is_none()
            && self.description.is_none()
            && self.image.is_none()
            && self.category_id.is_none()
            && self.active.is_none()
            && self.visible.is_none()
            && self.stock.is_none()
            && self.size_kind.is_none()
            && self.colors.is_none()
            && self.variants.is_none()
            && self.images_required_for_colors.is_none()
            && self.discount.is_none()
            && self.is_launch.is_none()
            && self.launch_expires_at.is_none()
    }
}
