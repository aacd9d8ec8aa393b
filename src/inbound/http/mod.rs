//! HTTP inbound adapter exposing REST endpoints.

pub mod categories;
pub mod cities;
pub mod error;
pub mod health;
pub mod navigation;
pub mod products;
pub mod state;

pub use crate::domain::ApiResult;

use actix_web::{Scope, web};

/// All `/api/v1` routes, shared between the server and integration tests.
pub fn api_scope() -> Scope {
    web::scope("/api/v1")
        .service(categories::list_categories)
        .service(categories::get_category)
        .service(categories::category_descendants)
        .service(categories::create_category)
        .service(categories::update_category)
        .service(categories::delete_category)
        .service(categories::reorder_category)
        .service(navigation::get_navigation)
        .service(products::list_products)
        .service(products::get_product)
        .service(products::create_product)
        .service(products::update_product)
        .service(products::delete_product)
        .service(products::storefront_products)
        .service(cities::search_cities)
}
