//! Category tree maintenance service.
//!
//! Implements the category driving ports over the hosted data API stores.
//! Slug derivation, sibling ordering, the deletion cascade, and the
//! protected default category all live here; the stores stay dumb.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::category::{
    Category, CategoryChanges, CategoryId, DEFAULT_CATEGORY_ID, NewCategory, collect_descendants,
};
use crate::domain::error::Error;
use crate::domain::ports::{
    CategoriesCommand, CategoriesQuery, CategoryNode, CategoryPatch, CategoryStore, NewCategoryRow,
    ProductStore, StoreError,
};
use crate::domain::slug::slugify;

/// Category service implementing the driving ports.
///
/// Holds the product store as well: deleting a category reassigns its
/// products to the default category, which is a cross-table fixup.
#[derive(Clone)]
pub struct CategoriesService<C, P> {
    categories: Arc<C>,
    products: Arc<P>,
}

impl<C, P> CategoriesService<C, P> {
    /// Create a new service over the given stores.
    pub fn new(categories: Arc<C>, products: Arc<P>) -> Self {
        Self {
            categories,
            products,
        }
    }
}

/// Map a store failure onto a domain error for mutation paths.
pub(crate) fn map_store_error(error: StoreError) -> Error {
    match error {
        StoreError::Transport { .. } | StoreError::Timeout { .. } => {
            Error::service_unavailable(error.to_string())
        }
        StoreError::Backend { .. } | StoreError::Decode { .. } => Error::internal(error.to_string()),
    }
}

impl<C, P> CategoriesService<C, P>
where
    C: CategoryStore,
    P: ProductStore,
{
    fn derive_slug(name: &str) -> Result<String, Error> {
        let slug = slugify(name);
        if slug.is_empty() {
            return Err(Error::invalid_request(
                "category name must contain at least one letter or digit",
            ));
        }
        Ok(slug)
    }

    async fn shift_sibling(&self, sibling: &Category, order: i32) -> Result<(), Error> {
        let patch = CategoryPatch {
            order: Some(order),
            ..CategoryPatch::default()
        };
        self.categories
            .update(sibling.id, patch)
            .await
            .map_err(map_store_error)?;
        Ok(())
    }
}

#[async_trait]
impl<C, P> CategoriesQuery for CategoriesService<C, P>
where
    C: CategoryStore,
    P: ProductStore,
{
    async fn list(&self) -> Vec<Category> {
        match self.categories.select_all().await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, "category listing failed; serving empty list");
                Vec::new()
            }
        }
    }

    async fn get(&self, id: CategoryId) -> Option<Category> {
        match self.categories.select_by_id(id).await {
            Ok(row) => row,
            Err(error) => {
                warn!(%error, category = id, "category lookup failed");
                None
            }
        }
    }

    async fn top_level(&self) -> Vec<Category> {
        self.subcategories(None).await
    }

    async fn subcategories(&self, parent: Option<CategoryId>) -> Vec<Category> {
        match self.categories.select_children(parent).await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, ?parent, "subcategory listing failed; serving empty list");
                Vec::new()
            }
        }
    }

    async fn descendants(&self, id: CategoryId) -> Vec<Category> {
        let all = self.list().await;
        collect_descendants(&all, id)
    }

    async fn navigation(&self) -> Vec<CategoryNode> {
        let top_level: Vec<Category> = self
            .top_level()
            .await
            .into_iter()
            .filter(|c| c.visible)
            .collect();

        let mut nodes = Vec::with_capacity(top_level.len());
        for category in top_level {
            let subcategories = self
                .subcategories(Some(category.id))
                .await
                .into_iter()
                .filter(|c| c.visible)
                .collect();
            nodes.push(CategoryNode {
                category,
                subcategories,
            });
        }
        nodes
    }
}

#[async_trait]
impl<C, P> CategoriesCommand for CategoriesService<C, P>
where
    C: CategoryStore,
    P: ProductStore,
{
    async fn create(&self, draft: NewCategory) -> Result<Category, Error> {
        let slug = Self::derive_slug(&draft.name)?;

        // Append after the existing siblings under the same parent.
        let siblings = self
            .categories
            .select_children(draft.parent_id)
            .await
            .map_err(map_store_error)?;
        let order = siblings
            .iter()
            .map(|s| s.order)
            .max()
            .map_or(0, |highest| highest + 1);

        self.categories
            .insert(NewCategoryRow {
                name: draft.name,
                visible: draft.visible,
                parent_id: draft.parent_id,
                slug,
                description: draft.description,
                order,
            })
            .await
            .map_err(map_store_error)
    }

    async fn update(&self, id: CategoryId, changes: CategoryChanges) -> Result<Category, Error> {
        if id == DEFAULT_CATEGORY_ID {
            return Err(Error::forbidden("the default category cannot be edited"));
        }
        if changes.is_empty() {
            return Err(Error::invalid_request("update carries no changes"));
        }

        let mut patch = CategoryPatch {
            name: changes.name.clone(),
            visible: changes.visible,
            parent_id: changes.parent_id,
            slug: None,
            description: changes.description,
            order: changes.order,
        };
        if let Some(name) = &changes.name {
            patch.slug = Some(Self::derive_slug(name)?);
        }

        self.categories
            .update(id, patch)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("category {id} does not exist")))
    }

    async fn delete(&self, id: CategoryId) -> Result<bool, Error> {
        if id == DEFAULT_CATEGORY_ID {
            return Err(Error::forbidden("the default category cannot be deleted"));
        }

        let Some(category) = self
            .categories
            .select_by_id(id)
            .await
            .map_err(map_store_error)?
        else {
            return Ok(false);
        };

        // Re-parent children onto the deleted node's parent, keeping the
        // tree two levels deep.
        let children = self
            .categories
            .select_children(Some(id))
            .await
            .map_err(map_store_error)?;
        for child in children {
            let patch = CategoryPatch {
                parent_id: Some(category.parent_id),
                ..CategoryPatch::default()
            };
            self.categories
                .update(child.id, patch)
                .await
                .map_err(map_store_error)?;
        }

        // Orphaned products fall back to the default category.
        self.products
            .reassign_category(id, DEFAULT_CATEGORY_ID)
            .await
            .map_err(map_store_error)?;

        self.categories.delete(id).await.map_err(map_store_error)?;
        Ok(true)
    }

    async fn reorder(
        &self,
        id: CategoryId,
        new_order: i32,
        new_parent: Option<CategoryId>,
    ) -> Result<(), Error> {
        if id == DEFAULT_CATEGORY_ID && new_parent.is_some() {
            return Err(Error::forbidden(
                "the default category cannot be re-parented",
            ));
        }

        let Some(moved) = self
            .categories
            .select_by_id(id)
            .await
            .map_err(map_store_error)?
        else {
            return Err(Error::not_found(format!("category {id} does not exist")));
        };

        // Close the gap left behind at the old position.
        let old_siblings = self
            .categories
            .select_children(moved.parent_id)
            .await
            .map_err(map_store_error)?;
        for sibling in &old_siblings {
            if sibling.id != id && sibling.order > moved.order {
                self.shift_sibling(sibling, sibling.order - 1).await?;
            }
        }

        // Open a gap at the new position. Fetched after the close above so a
        // same-parent move sees the already-shifted orders.
        let new_siblings = self
            .categories
            .select_children(new_parent)
            .await
            .map_err(map_store_error)?;
        for sibling in &new_siblings {
            if sibling.id != id && sibling.order >= new_order {
                self.shift_sibling(sibling, sibling.order + 1).await?;
            }
        }

        let patch = CategoryPatch {
            order: Some(new_order),
            parent_id: Some(new_parent),
            ..CategoryPatch::default()
        };
        self.categories
            .update(id, patch)
            .await
            .map_err(map_store_error)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ErrorCode;
    use crate::domain::ports::{MockCategoryStore, MockProductStore};
    use mockall::predicate::eq;

    fn category(id: CategoryId, parent_id: Option<CategoryId>, order: i32) -> Category {
        Category {
            id,
            name: format!("category {id}"),
            visible: true,
            parent_id,
            slug: format!("category-{id}"),
            description: None,
            order,
        }
    }

    fn service(
        categories: MockCategoryStore,
        products: MockProductStore,
    ) -> CategoriesService<MockCategoryStore, MockProductStore> {
        CategoriesService::new(Arc::new(categories), Arc::new(products))
    }

    #[tokio::test]
    async fn list_serves_empty_on_store_failure() {
        let mut categories = MockCategoryStore::new();
        categories
            .expect_select_all()
            .times(1)
            .return_once(|| Err(StoreError::transport("connection refused")));

        let service = service(categories, MockProductStore::new());
        assert!(service.list().await.is_empty());
    }

    #[tokio::test]
    async fn get_returns_none_on_store_failure() {
        let mut categories = MockCategoryStore::new();
        categories
            .expect_select_by_id()
            .with(eq(7))
            .times(1)
            .return_once(|_| Err(StoreError::timeout("deadline exceeded")));

        let service = service(categories, MockProductStore::new());
        assert!(service.get(7).await.is_none());
    }

    #[tokio::test]
    async fn create_derives_slug_and_appends_order() {
        let mut categories = MockCategoryStore::new();
        categories
            .expect_select_children()
            .with(eq(None))
            .times(1)
            .return_once(|_| Ok(vec![category(2, None, 0), category(3, None, 1)]));
        categories
            .expect_insert()
            .withf(|row: &NewCategoryRow| {
                row.slug == "calcas-jeans" && row.order == 2 && row.visible
            })
            .times(1)
            .return_once(|row| {
                Ok(Category {
                    id: 9,
                    name: row.name,
                    visible: row.visible,
                    parent_id: row.parent_id,
                    slug: row.slug,
                    description: row.description,
                    order: row.order,
                })
            });

        let service = service(categories, MockProductStore::new());
        let created = service
            .create(NewCategory {
                name: "Calças Jeans".into(),
                visible: true,
                parent_id: None,
                description: None,
            })
            .await
            .expect("create succeeds");
        assert_eq!(created.id, 9);
        assert_eq!(created.slug, "calcas-jeans");
        assert_eq!(created.order, 2);
    }

    #[tokio::test]
    async fn create_starts_order_at_zero_without_siblings() {
        let mut categories = MockCategoryStore::new();
        categories
            .expect_select_children()
            .with(eq(Some(2)))
            .times(1)
            .return_once(|_| Ok(Vec::new()));
        categories
            .expect_insert()
            .withf(|row: &NewCategoryRow| row.order == 0 && row.parent_id == Some(2))
            .times(1)
            .return_once(|row| {
                Ok(Category {
                    id: 10,
                    name: row.name,
                    visible: row.visible,
                    parent_id: row.parent_id,
                    slug: row.slug,
                    description: row.description,
                    order: row.order,
                })
            });

        let service = service(categories, MockProductStore::new());
        let created = service
            .create(NewCategory {
                name: "Bermudas".into(),
                visible: true,
                parent_id: Some(2),
                description: None,
            })
            .await
            .expect("create succeeds");
        assert_eq!(created.order, 0);
    }

    #[tokio::test]
    async fn create_rejects_names_without_slug_material() {
        let service = service(MockCategoryStore::new(), MockProductStore::new());
        let error = service
            .create(NewCategory {
                name: "!!!".into(),
                visible: true,
                parent_id: None,
                description: None,
            })
            .await
            .expect_err("create must fail");
        assert_eq!(error.code(), ErrorCode::InvalidRequest);
    }

    #[tokio::test]
    async fn update_rejects_the_default_category() {
        let service = service(MockCategoryStore::new(), MockProductStore::new());
        let error = service
            .update(DEFAULT_CATEGORY_ID, CategoryChanges::default())
            .await
            .expect_err("update must fail");
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn update_rederives_slug_on_rename() {
        let mut categories = MockCategoryStore::new();
        categories
            .expect_update()
            .withf(|id, patch: &CategoryPatch| {
                *id == 4
                    && patch.name.as_deref() == Some("Moda Íntima")
                    && patch.slug.as_deref() == Some("moda-intima")
            })
            .times(1)
            .return_once(|id, patch| {
                let mut row = category(id, None, 1);
                row.name = patch.name.expect("name set");
                row.slug = patch.slug.expect("slug set");
                Ok(Some(row))
            });

        let service = service(categories, MockProductStore::new());
        let updated = service
            .update(
                4,
                CategoryChanges {
                    name: Some("Moda Íntima".into()),
                    ..CategoryChanges::default()
                },
            )
            .await
            .expect("update succeeds");
        assert_eq!(updated.slug, "moda-intima");
    }

    #[tokio::test]
    async fn update_maps_missing_rows_to_not_found() {
        let mut categories = MockCategoryStore::new();
        categories
            .expect_update()
            .times(1)
            .return_once(|_, _| Ok(None));

        let service = service(categories, MockProductStore::new());
        let error = service
            .update(
                99,
                CategoryChanges {
                    visible: Some(false),
                    ..CategoryChanges::default()
                },
            )
            .await
            .expect_err("update must fail");
        assert_eq!(error.code(), ErrorCode::NotFound);
    }

    #[tokio::test]
    async fn delete_rejects_the_default_category() {
        let service = service(MockCategoryStore::new(), MockProductStore::new());
        let error = service
            .delete(DEFAULT_CATEGORY_ID)
            .await
            .expect_err("delete must fail");
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn delete_returns_false_for_missing_category() {
        let mut categories = MockCategoryStore::new();
        categories
            .expect_select_by_id()
            .with(eq(42))
            .times(1)
            .return_once(|_| Ok(None));

        let service = service(categories, MockProductStore::new());
        assert!(!service.delete(42).await.expect("delete succeeds"));
    }

    #[tokio::test]
    async fn delete_reparents_children_and_reassigns_products() {
        let mut categories = MockCategoryStore::new();
        categories
            .expect_select_by_id()
            .with(eq(5))
            .times(1)
            .return_once(|_| Ok(Some(category(5, Some(2), 1))));
        categories
            .expect_select_children()
            .with(eq(Some(5)))
            .times(1)
            .return_once(|_| Ok(vec![category(6, Some(5), 0), category(7, Some(5), 1)]));
        // Children inherit the deleted node's parent.
        categories
            .expect_update()
            .withf(|id, patch: &CategoryPatch| {
                (*id == 6 || *id == 7) && patch.parent_id == Some(Some(2))
            })
            .times(2)
            .returning(|id, _| Ok(Some(category(id, Some(2), 0))));
        categories
            .expect_delete()
            .with(eq(5))
            .times(1)
            .return_once(|_| Ok(()));

        let mut products = MockProductStore::new();
        products
            .expect_reassign_category()
            .with(eq(5), eq(DEFAULT_CATEGORY_ID))
            .times(1)
            .return_once(|_, _| Ok(()));

        let service = service(categories, products);
        assert!(service.delete(5).await.expect("delete succeeds"));
    }

    #[tokio::test]
    async fn reorder_shifts_old_and_new_siblings() {
        // Move category 3 (order 1 under parent None) to order 0 under
        // parent 8: category 4 closes the gap, category 9 opens one.
        let mut categories = MockCategoryStore::new();
        categories
            .expect_select_by_id()
            .with(eq(3))
            .times(1)
            .return_once(|_| Ok(Some(category(3, None, 1))));
        categories
            .expect_select_children()
            .with(eq(None))
            .times(1)
            .return_once(|_| {
                Ok(vec![
                    category(2, None, 0),
                    category(3, None, 1),
                    category(4, None, 2),
                ])
            });
        categories
            .expect_select_children()
            .with(eq(Some(8)))
            .times(1)
            .return_once(|_| Ok(vec![category(9, Some(8), 0)]));
        categories
            .expect_update()
            .withf(|id, patch: &CategoryPatch| *id == 4 && patch.order == Some(1))
            .times(1)
            .returning(|id, _| Ok(Some(category(id, None, 1))));
        categories
            .expect_update()
            .withf(|id, patch: &CategoryPatch| *id == 9 && patch.order == Some(1))
            .times(1)
            .returning(|id, _| Ok(Some(category(id, Some(8), 1))));
        categories
            .expect_update()
            .withf(|id, patch: &CategoryPatch| {
                *id == 3 && patch.order == Some(0) && patch.parent_id == Some(Some(8))
            })
            .times(1)
            .returning(|id, _| Ok(Some(category(id, Some(8), 0))));

        let service = service(categories, MockProductStore::new());
        service.reorder(3, 0, Some(8)).await.expect("reorder succeeds");
    }

    #[tokio::test]
    async fn reorder_rejects_reparenting_the_default_category() {
        let service = service(MockCategoryStore::new(), MockProductStore::new());
        let error = service
            .reorder(DEFAULT_CATEGORY_ID, 0, Some(2))
            .await
            .expect_err("reorder must fail");
        assert_eq!(error.code(), ErrorCode::Forbidden);
    }

    #[tokio::test]
    async fn navigation_hides_invisible_categories() {
        let mut categories = MockCategoryStore::new();
        let mut hidden = category(3, None, 1);
        hidden.visible = false;
        categories
            .expect_select_children()
            .with(eq(None))
            .times(1)
            .return_once(move |_| Ok(vec![category(2, None, 0), hidden]));
        let mut hidden_child = category(5, Some(2), 1);
        hidden_child.visible = false;
        categories
            .expect_select_children()
            .with(eq(Some(2)))
            .times(1)
            .return_once(move |_| Ok(vec![category(4, Some(2), 0), hidden_child]));

        let service = service(categories, MockProductStore::new());
        let nodes = service.navigation().await;
        assert_eq!(nodes.len(), 1);
        assert_eq!(nodes[0].category.id, 2);
        let sub_ids: Vec<_> = nodes[0].subcategories.iter().map(|c| c.id).collect();
        assert_eq!(sub_ids, vec![4]);
    }

    #[tokio::test]
    async fn descendants_walk_the_tree_breadth_first() {
        let mut categories = MockCategoryStore::new();
        categories.expect_select_all().times(1).return_once(|| {
            Ok(vec![
                category(1, None, 0),
                category(2, None, 1),
                category(3, Some(2), 0),
                category(4, Some(3), 0),
            ])
        });

        let service = service(categories, MockProductStore::new());
        let ids: Vec<_> = service.descendants(2).await.iter().map(|c| c.id).collect();
        assert_eq!(ids, vec![2, 3, 4]);
    }
}
