//! In-memory stores.
//!
//! Back the server when no hosted data API is configured, and give
//! integration tests a real store without network I/O. Semantics mirror the
//! hosted backend: listings come back ordered by display position, patches
//! touch only the supplied columns.

use std::sync::atomic::{AtomicI64, Ordering};

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::category::{Category, CategoryId, DEFAULT_CATEGORY_ID};
use crate::domain::ports::{
    CategoryPatch, CategoryStore, NewCategoryRow, ProductStore, StoreError,
};
use crate::domain::product::{NewProduct, Product, ProductChanges, ProductId};

/// Category store holding rows in a mutex-guarded vector.
pub struct InMemoryCategoryStore {
    rows: Mutex<Vec<Category>>,
    next_id: AtomicI64,
}

impl InMemoryCategoryStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }

    /// Create a store seeded with the protected default category.
    pub fn with_default_category() -> Self {
        Self {
            rows: Mutex::new(vec![Category {
                id: DEFAULT_CATEGORY_ID,
                name: "Geral".to_owned(),
                visible: true,
                parent_id: None,
                slug: "geral".to_owned(),
                description: None,
                order: 0,
            }]),
            next_id: AtomicI64::new(DEFAULT_CATEGORY_ID + 1),
        }
    }
}

impl Default for InMemoryCategoryStore {
    fn default() -> Self {
        Self::new()
    }
}

fn by_position(rows: &mut Vec<Category>) {
    rows.sort_by_key(|row| (row.order, row.id));
}

fn apply_category_patch(row: &mut Category, patch: CategoryPatch) {
    if let Some(name) = patch.name {
        row.name = name;
    }
    if let Some(visible) = patch.visible {
        row.visible = visible;
    }
    if let Some(parent_id) = patch.parent_id {
        row.parent_id = parent_id;
    }
    if let Some(slug) = patch.slug {
        row.slug = slug;
    }
    if let Some(description) = patch.description {
        row.description = description;
    }
    if let Some(order) = patch.order {
        row.order = order;
    }
}

#[async_trait]
impl CategoryStore for InMemoryCategoryStore {
    async fn select_all(&self) -> Result<Vec<Category>, StoreError> {
        let mut rows = self.rows.lock().await.clone();
        by_position(&mut rows);
        Ok(rows)
    }

    async fn select_by_id(&self, id: CategoryId) -> Result<Option<Category>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn select_children(
        &self,
        parent: Option<CategoryId>,
    ) -> Result<Vec<Category>, StoreError> {
        let rows = self.rows.lock().await;
        let mut children: Vec<Category> = rows
            .iter()
            .filter(|row| row.parent_id == parent)
            .cloned()
            .collect();
        by_position(&mut children);
        Ok(children)
    }

    async fn insert(&self, row: NewCategoryRow) -> Result<Category, StoreError> {
        let category = Category {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: row.name,
            visible: row.visible,
            parent_id: row.parent_id,
            slug: row.slug,
            description: row.description,
            order: row.order,
        };
        self.rows.lock().await.push(category.clone());
        Ok(category)
    }

    async fn update(
        &self,
        id: CategoryId,
        patch: CategoryPatch,
    ) -> Result<Option<Category>, StoreError> {
        let mut rows = self.rows.lock().await;
        let Some(row) = rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        apply_category_patch(row, patch);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: CategoryId) -> Result<(), StoreError> {
        self.rows.lock().await.retain(|row| row.id != id);
        Ok(())
    }
}

/// Product store holding rows in a mutex-guarded vector.
pub struct InMemoryProductStore {
    rows: Mutex<Vec<Product>>,
    next_id: AtomicI64,
}

impl InMemoryProductStore {
    /// Create an empty store.
    pub fn new() -> Self {
        Self {
            rows: Mutex::new(Vec::new()),
            next_id: AtomicI64::new(1),
        }
    }
}

impl Default for InMemoryProductStore {
    fn default() -> Self {
        Self::new()
    }
}

fn apply_product_changes(row: &mut Product, changes: ProductChanges) {
    if let Some(name) = changes.name {
        row.name = name;
    }
    if let Some(price) = changes.price {
        row.price = price;
    }
    if let Some(description) = changes.description {
        row.description = description;
    }
    if let Some(image) = changes.image {
        row.image = image;
    }
    if let Some(category_id) = changes.category_id {
        row.category_id = category_id;
    }
    if let Some(active) = changes.active {
        row.active = active;
    }
    if let Some(visible) = changes.visible {
        row.visible = visible;
    }
    if let Some(stock) = changes.stock {
        row.stock = stock;
    }
    if let Some(size_kind) = changes.size_kind {
        row.size_kind = size_kind;
    }
    if let Some(colors) = changes.colors {
        row.colors = colors;
    }
    if let Some(variants) = changes.variants {
        row.variants = variants;
    }
    if let Some(flag) = changes.images_required_for_colors {
        row.images_required_for_colors = flag;
    }
    if let Some(discount) = changes.discount {
        row.discount = discount;
    }
    if let Some(is_launch) = changes.is_launch {
        row.is_launch = is_launch;
    }
    if let Some(expires) = changes.launch_expires_at {
        row.launch_expires_at = expires;
    }
}

#[async_trait]
impl ProductStore for InMemoryProductStore {
    async fn select_all(&self) -> Result<Vec<Product>, StoreError> {
        Ok(self.rows.lock().await.clone())
    }

    async fn select_by_id(&self, id: ProductId) -> Result<Option<Product>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows.iter().find(|row| row.id == id).cloned())
    }

    async fn select_by_categories(
        &self,
        categories: &[CategoryId],
    ) -> Result<Vec<Product>, StoreError> {
        let rows = self.rows.lock().await;
        Ok(rows
            .iter()
            .filter(|row| categories.contains(&row.category_id))
            .cloned()
            .collect())
    }

    async fn insert(&self, draft: NewProduct) -> Result<Product, StoreError> {
        let product = Product {
            id: self.next_id.fetch_add(1, Ordering::SeqCst),
            name: draft.name,
            price: draft.price,
            description: draft.description,
            image: draft.image,
            category_id: draft.category_id,
            active: draft.active,
            visible: draft.visible,
            stock: draft.stock,
            size_kind: draft.size_kind,
            colors: draft.colors,
            variants: draft.variants,
            images_required_for_colors: draft.images_required_for_colors,
            discount: draft.discount,
            is_launch: draft.is_launch,
            launch_expires_at: draft.launch_expires_at,
        };
        self.rows.lock().await.push(product.clone());
        Ok(product)
    }

    async fn update(
        &self,
        id: ProductId,
        changes: ProductChanges,
    ) -> Result<Option<Product>, StoreError> {
        let mut rows = self.rows.lock().await;
        let Some(row) = rows.iter_mut().find(|row| row.id == id) else {
            return Ok(None);
        };
        apply_product_changes(row, changes);
        Ok(Some(row.clone()))
    }

    async fn delete(&self, id: ProductId) -> Result<(), StoreError> {
        self.rows.lock().await.retain(|row| row.id != id);
        Ok(())
    }

    async fn reassign_category(
        &self,
        from: CategoryId,
        to: CategoryId,
    ) -> Result<(), StoreError> {
        let mut rows = self.rows.lock().await;
        for row in rows.iter_mut().filter(|row| row.category_id == from) {
            row.category_id = to;
        }
        Ok(())
    }
}
