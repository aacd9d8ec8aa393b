//! Product catalogue service.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::warn;

use crate::domain::categories_service::map_store_error;
use crate::domain::category::{CategoryId, collect_descendants};
use crate::domain::error::Error;
use crate::domain::ports::{CategoryStore, ProductStore, ProductsCommand, ProductsQuery};
use crate::domain::product::{NewProduct, Product, ProductChanges, ProductId};

/// Product service implementing the driving ports.
///
/// Category-scoped listings expand the requested category into its whole
/// subtree first, so products filed under a child category still show up
/// when browsing the parent.
#[derive(Clone)]
pub struct ProductsService<P, C> {
    products: Arc<P>,
    categories: Arc<C>,
}

impl<P, C> ProductsService<P, C> {
    /// Create a new service over the given stores.
    pub fn new(products: Arc<P>, categories: Arc<C>) -> Self {
        Self {
            products,
            categories,
        }
    }
}

impl<P, C> ProductsService<P, C>
where
    P: ProductStore,
    C: CategoryStore,
{
    /// The category plus every transitive child, as identifiers.
    ///
    /// Degrades to just the requested category when the tree cannot be
    /// loaded, so the filter still matches direct members.
    async fn subtree_ids(&self, category: CategoryId) -> Vec<CategoryId> {
        match self.categories.select_all().await {
            Ok(all) => collect_descendants(&all, category)
                .iter()
                .map(|c| c.id)
                .collect(),
            Err(error) => {
                warn!(%error, category, "category tree load failed; filtering by the category alone");
                vec![category]
            }
        }
    }

    async fn in_categories(&self, ids: &[CategoryId]) -> Vec<Product> {
        match self.products.select_by_categories(ids).await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, "category-scoped product listing failed; serving empty list");
                Vec::new()
            }
        }
    }
}

#[async_trait]
impl<P, C> ProductsQuery for ProductsService<P, C>
where
    P: ProductStore,
    C: CategoryStore,
{
    async fn list(&self) -> Vec<Product> {
        match self.products.select_all().await {
            Ok(rows) => rows,
            Err(error) => {
                warn!(%error, "product listing failed; serving empty list");
                Vec::new()
            }
        }
    }

    async fn get(&self, id: ProductId) -> Option<Product> {
        match self.products.select_by_id(id).await {
            Ok(row) => row,
            Err(error) => {
                warn!(%error, product = id, "product lookup failed");
                None
            }
        }
    }

    async fn list_by_category(&self, category: CategoryId) -> Vec<Product> {
        let ids = self.subtree_ids(category).await;
        self.in_categories(&ids).await
    }

    async fn storefront(&self, category: Option<CategoryId>) -> Vec<Product> {
        let products = match category {
            Some(id) => {
                let ids = self.subtree_ids(id).await;
                self.in_categories(&ids).await
            }
            None => self.list().await,
        };
        products.into_iter().filter(Product::is_listed).collect()
    }
}

#[async_trait]
impl<P, C> ProductsCommand for ProductsService<P, C>
where
    P: ProductStore,
    C: CategoryStore,
{
    async fn create(&self, draft: NewProduct) -> Result<Product, Error> {
        if draft.name.trim().is_empty() {
            return Err(Error::invalid_request("product name must not be blank"));
        }
        self.products.insert(draft).await.map_err(map_store_error)
    }

    async fn update(&self, id: ProductId, changes: ProductChanges) -> Result<Product, Error> {
        if changes.is_empty() {
            return Err(Error::invalid_request("update carries no changes"));
        }
        self.products
            .update(id, changes)
            .await
            .map_err(map_store_error)?
            .ok_or_else(|| Error::not_found(format!("product {id} does not exist")))
    }

    async fn delete(&self, id: ProductId) -> Result<bool, Error> {
        if self
            .products
            .select_by_id(id)
            .await
            .map_err(map_store_error)?
            .is_none()
        {
            return Ok(false);
        }
        self.products.delete(id).await.map_err(map_store_error)?;
        Ok(true)
    }
}
