//! OpenAPI documentation configuration.
//!
//! The generated specification is served by Swagger UI in debug builds.

use utoipa::OpenApi;

use crate::domain::ports::CategoryNode;
use crate::domain::{
    Category, City, Discount, DiscountKind, Error, ErrorCode, NewCategory, NewProduct, Product,
    ProductColor, ProductVariant, SizeKind,
};
use crate::inbound::http::categories::{ReorderRequest, UpdateCategoryRequest};
use crate::inbound::http::products::UpdateProductRequest;

/// OpenAPI document for the REST API.
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Storefront backend API",
        description = "Catalogue, navigation, and city autocomplete endpoints for the storefront and its admin panel."
    ),
    servers(
        (url = "/", description = "Relative to the deployment base URL")
    ),
    paths(
        crate::inbound::http::categories::list_categories,
        crate::inbound::http::categories::get_category,
        crate::inbound::http::categories::category_descendants,
        crate::inbound::http::categories::create_category,
        crate::inbound::http::categories::update_category,
        crate::inbound::http::categories::delete_category,
        crate::inbound::http::categories::reorder_category,
        crate::inbound::http::navigation::get_navigation,
        crate::inbound::http::products::list_products,
        crate::inbound::http::products::get_product,
        crate::inbound::http::products::create_product,
        crate::inbound::http::products::update_product,
        crate::inbound::http::products::delete_product,
        crate::inbound::http::products::storefront_products,
        crate::inbound::http::cities::search_cities,
        crate::inbound::http::health::ready,
        crate::inbound::http::health::live,
    ),
    components(schemas(
        Category,
        NewCategory,
        CategoryNode,
        UpdateCategoryRequest,
        ReorderRequest,
        Product,
        NewProduct,
        UpdateProductRequest,
        ProductColor,
        ProductVariant,
        Discount,
        DiscountKind,
        SizeKind,
        City,
        Error,
        ErrorCode,
    ))
)]
pub struct ApiDoc;
