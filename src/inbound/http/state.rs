//! Shared HTTP adapter state.
//!
//! HTTP handlers accept this state via `actix_web::web::Data` so they only
//! depend on domain ports (use-cases) and remain testable without I/O.

use std::sync::Arc;

use crate::domain::ports::{
    CategoriesCommand, CategoriesQuery, CityAutocomplete, ProductsCommand, ProductsQuery,
};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    pub categories_query: Arc<dyn CategoriesQuery>,
    pub categories: Arc<dyn CategoriesCommand>,
    pub products_query: Arc<dyn ProductsQuery>,
    pub products: Arc<dyn ProductsCommand>,
    pub cities: Arc<dyn CityAutocomplete>,
}
