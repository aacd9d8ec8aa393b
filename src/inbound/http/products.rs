//! Product HTTP handlers.
//!
//! ```text
//! GET    /api/v1/products?category=
//! POST   /api/v1/products
//! GET    /api/v1/products/{id}
//! PATCH  /api/v1/products/{id}
//! DELETE /api/v1/products/{id}
//! GET    /api/v1/storefront/products?category=
//! ```
//!
//! Category filters cover the whole subtree of the requested category.

use actix_web::{HttpResponse, delete, get, patch, post, web};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use crate::domain::{
    CategoryId, Discount, Error, NewProduct, Product, ProductChanges, ProductColor, ProductId,
    ProductVariant, SizeKind,
};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

fn double_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Optional category filter for product listings.
#[derive(Debug, Deserialize)]
pub struct CategoryFilter {
    #[serde(default)]
    pub category: Option<CategoryId>,
}

/// Patch payload for a product. A `null` clears a clearable field; an
/// absent field leaves it untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateProductRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub image: Option<Option<String>>,
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default)]
    pub stock: Option<i32>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<SizeKind>, nullable)]
    pub size_kind: Option<Option<SizeKind>>,
    #[serde(default)]
    pub colors: Option<Vec<ProductColor>>,
    #[serde(default)]
    pub variants: Option<Vec<ProductVariant>>,
    #[serde(default)]
    pub images_required_for_colors: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<Discount>, nullable)]
    pub discount: Option<Option<Discount>>,
    #[serde(default)]
    pub is_launch: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub launch_expires_at: Option<Option<DateTime<Utc>>>,
}

impl From<UpdateProductRequest> for ProductChanges {
    fn from(value: UpdateProductRequest) -> Self {
        Self {
            name: value.name,
            price: value.price,
            description: value.description,
            image: value.image,
            category_id: value.category_id,
            active: value.active,
            visible: value.visible,
            stock: value.stock,
            size_kind: value.size_kind,
            colors: value.colors,
            variants: value.variants,
            images_required_for_colors: value.images_required_for_colors,
            discount: value.discount,
            is_launch: value.is_launch,
            launch_expires_at: value.launch_expires_at,
        }
    }
}

/// List products for the admin view, optionally scoped to a category
/// subtree.
#[utoipa::path(
    get,
    path = "/api/v1/products",
    params(("category" = Option<i64>, Query, description = "Restrict to a category subtree")),
    responses(
        (status = 200, description = "Products", body = [Product])
    ),
    tags = ["products"],
    operation_id = "listProducts"
)]
#[get("/products")]
pub async fn list_products(
    state: web::Data<HttpState>,
    filter: web::Query<CategoryFilter>,
) -> web::Json<Vec<Product>> {
    let products = match filter.category {
        Some(category) => state.products_query.list_by_category(category).await,
        None => state.products_query.list().await,
    };
    web::Json(products)
}

/// Fetch one product.
#[utoipa::path(
    get,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 200, description = "The product", body = Product),
        (status = 404, description = "No such product", body = Error)
    ),
    tags = ["products"],
    operation_id = "getProduct"
)]
#[get("/products/{id}")]
pub async fn get_product(
    state: web::Data<HttpState>,
    id: web::Path<ProductId>,
) -> ApiResult<web::Json<Product>> {
    let id = id.into_inner();
    state
        .products_query
        .get(id)
        .await
        .map(web::Json)
        .ok_or_else(|| Error::not_found(format!("product {id} does not exist")))
}

/// Create a product.
#[utoipa::path(
    post,
    path = "/api/v1/products",
    request_body = NewProduct,
    responses(
        (status = 201, description = "Created product", body = Product),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["products"],
    operation_id = "createProduct"
)]
#[post("/products")]
pub async fn create_product(
    state: web::Data<HttpState>,
    payload: web::Json<NewProduct>,
) -> ApiResult<HttpResponse> {
    let created = state.products.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Patch a product.
#[utoipa::path(
    patch,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    request_body = UpdateProductRequest,
    responses(
        (status = 200, description = "Updated product", body = Product),
        (status = 400, description = "Invalid request", body = Error),
        (status = 404, description = "No such product", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["products"],
    operation_id = "updateProduct"
)]
#[patch("/products/{id}")]
pub async fn update_product(
    state: web::Data<HttpState>,
    id: web::Path<ProductId>,
    payload: web::Json<UpdateProductRequest>,
) -> ApiResult<web::Json<Product>> {
    let updated = state
        .products
        .update(id.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(updated))
}

/// Delete a product.
#[utoipa::path(
    delete,
    path = "/api/v1/products/{id}",
    params(("id" = i64, Path, description = "Product identifier")),
    responses(
        (status = 204, description = "Product deleted"),
        (status = 404, description = "No such product", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["products"],
    operation_id = "deleteProduct"
)]
#[delete("/products/{id}")]
pub async fn delete_product(
    state: web::Data<HttpState>,
    id: web::Path<ProductId>,
) -> ApiResult<HttpResponse> {
    let id = id.into_inner();
    if state.products.delete(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found(format!("product {id} does not exist")))
    }
}

/// The public storefront listing: active and visible products only.
#[utoipa::path(
    get,
    path = "/api/v1/storefront/products",
    params(("category" = Option<i64>, Query, description = "Restrict to a category subtree")),
    responses(
        (status = 200, description = "Listed products", body = [Product])
    ),
    tags = ["storefront"],
    operation_id = "listStorefrontProducts"
)]
#[get("/storefront/products")]
pub async fn storefront_products(
    state: web::Data<HttpState>,
    filter: web::Query<CategoryFilter>,
) -> web::Json<Vec<Product>> {
    web::Json(state.products_query.storefront(filter.category).await)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{
        MockCategoriesCommand, MockCategoriesQuery, MockCityAutocomplete, MockProductsCommand,
        MockProductsQuery,
    };
    use crate::domain::product::tests::product;
    use crate::inbound::http::api_scope;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;
    use std::sync::Arc;

    fn state_with(products_query: MockProductsQuery, products: MockProductsCommand) -> HttpState {
        HttpState {
            categories_query: Arc::new(MockCategoriesQuery::new()),
            categories: Arc::new(MockCategoriesCommand::new()),
            products_query: Arc::new(products_query),
            products: Arc::new(products),
            cities: Arc::new(MockCityAutocomplete::new()),
        }
    }

    async fn call(
        state: HttpState,
        request: test::TestRequest,
    ) -> actix_web::dev::ServiceResponse {
        let app = test::init_service(
            App::new()
                .app_data(web::Data::new(state))
                .service(api_scope()),
        )
        .await;
        test::call_service(&app, request.to_request()).await
    }

    #[actix_web::test]
    async fn update_request_distinguishes_null_from_absent() {
        let cleared: UpdateProductRequest =
            serde_json::from_value(json!({ "discount": null })).expect("valid payload");
        assert_eq!(cleared.discount, Some(None));
        assert!(cleared.description.is_none());
    }

    #[actix_web::test]
    async fn list_products_without_filter_uses_full_listing() {
        let mut query = MockProductsQuery::new();
        query
            .expect_list()
            .return_once(|| vec![product(10, 1), product(11, 2)]);

        let res = call(
            state_with(query, MockProductsCommand::new()),
            test::TestRequest::get().uri("/api/v1/products"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
        let body: Vec<Product> = test::read_body_json(res).await;
        assert_eq!(body.len(), 2);
    }

    #[actix_web::test]
    async fn list_products_with_filter_scopes_to_category() {
        let mut query = MockProductsQuery::new();
        query
            .expect_list_by_category()
            .withf(|category| *category == 3)
            .return_once(|_| vec![product(10, 3)]);

        let res = call(
            state_with(query, MockProductsCommand::new()),
            test::TestRequest::get().uri("/api/v1/products?category=3"),
        )
        .await;
        let body: Vec<Product> = test::read_body_json(res).await;
        assert_eq!(body.len(), 1);
    }

    #[actix_web::test]
    async fn storefront_listing_passes_the_filter_through() {
        let mut query = MockProductsQuery::new();
        query
            .expect_storefront()
            .withf(|category| *category == Some(2))
            .return_once(|_| vec![product(10, 2)]);

        let res = call(
            state_with(query, MockProductsCommand::new()),
            test::TestRequest::get().uri("/api/v1/storefront/products?category=2"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::OK);
    }

    #[actix_web::test]
    async fn delete_product_maps_false_to_not_found() {
        let mut command = MockProductsCommand::new();
        command.expect_delete().return_once(|_| Ok(false));

        let res = call(
            state_with(MockProductsQuery::new(), command),
            test::TestRequest::delete().uri("/api/v1/products/42"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn create_product_returns_created() {
        let mut command = MockProductsCommand::new();
        command.expect_create().return_once(|draft| {
            let mut created = product(9, draft.category_id);
            created.name = draft.name;
            Ok(created)
        });

        let res = call(
            state_with(MockProductsQuery::new(), command),
            test::TestRequest::post()
                .uri("/api/v1/products")
                .set_json(json!({ "name": "Camiseta", "price": 59.9 })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Product = test::read_body_json(res).await;
        assert_eq!(body.name, "Camiseta");
        assert_eq!(body.category_id, 1);
    }
}
