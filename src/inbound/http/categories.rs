//! Category HTTP handlers.
//!
//! ```text
//! GET    /api/v1/categories
//! POST   /api/v1/categories
//! GET    /api/v1/categories/{id}
//! PATCH  /api/v1/categories/{id}
//! DELETE /api/v1/categories/{id}
//! GET    /api/v1/categories/{id}/descendants
//! POST   /api/v1/categories/{id}/reorder
//! ```

use actix_web::{HttpResponse, delete, get, patch, post, web};
use serde::{Deserialize, Deserializer};
use utoipa::ToSchema;

use crate::domain::{Category, CategoryChanges, CategoryId, Error, NewCategory};
use crate::inbound::http::ApiResult;
use crate::inbound::http::state::HttpState;

/// Deserialize a present field into `Some(value)`, keeping `null` as
/// `Some(None)`. Absent fields stay `None` via `#[serde(default)]`.
fn double_option<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

/// Patch payload for a category. A `null` clears a clearable field; an
/// absent field leaves it untouched.
#[derive(Debug, Default, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct UpdateCategoryRequest {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub visible: Option<bool>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<i64>, nullable)]
    pub parent_id: Option<Option<CategoryId>>,
    #[serde(default, deserialize_with = "double_option")]
    #[schema(value_type = Option<String>, nullable)]
    pub description: Option<Option<String>>,
    #[serde(default)]
    pub order: Option<i32>,
}

impl From<UpdateCategoryRequest> for CategoryChanges {
    fn from(value: UpdateCategoryRequest) -> Self {
        Self {
            name: value.name,
            visible: value.visible,
            parent_id: value.parent_id,
            description: value.description,
            order: value.order,
        }
    }
}

/// Reorder payload: the target position and (optionally) a new parent.
/// An absent `parentId` moves the category to the top level.
#[derive(Debug, Deserialize, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct ReorderRequest {
    pub order: i32,
    #[serde(default)]
    pub parent_id: Option<CategoryId>,
}

/// List every category in display order.
#[utoipa::path(
    get,
    path = "/api/v1/categories",
    responses(
        (status = 200, description = "All categories", body = [Category])
    ),
    tags = ["categories"],
    operation_id = "listCategories"
)]
#[get("/categories")]
pub async fn list_categories(state: web::Data<HttpState>) -> web::Json<Vec<Category>> {
    web::Json(state.categories_query.list().await)
}

/// Fetch one category.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "The category", body = Category),
        (status = 404, description = "No such category", body = Error)
    ),
    tags = ["categories"],
    operation_id = "getCategory"
)]
#[get("/categories/{id}")]
pub async fn get_category(
    state: web::Data<HttpState>,
    id: web::Path<CategoryId>,
) -> ApiResult<web::Json<Category>> {
    let id = id.into_inner();
    state
        .categories_query
        .get(id)
        .await
        .map(web::Json)
        .ok_or_else(|| Error::not_found(format!("category {id} does not exist")))
}

/// The category and its whole subtree, breadth first.
#[utoipa::path(
    get,
    path = "/api/v1/categories/{id}/descendants",
    params(("id" = i64, Path, description = "Category identifier")),
    responses(
        (status = 200, description = "The category and its descendants", body = [Category])
    ),
    tags = ["categories"],
    operation_id = "getCategoryDescendants"
)]
#[get("/categories/{id}/descendants")]
pub async fn category_descendants(
    state: web::Data<HttpState>,
    id: web::Path<CategoryId>,
) -> web::Json<Vec<Category>> {
    web::Json(state.categories_query.descendants(id.into_inner()).await)
}

/// Create a category.
#[utoipa::path(
    post,
    path = "/api/v1/categories",
    request_body = NewCategory,
    responses(
        (status = 201, description = "Created category", body = Category),
        (status = 400, description = "Invalid request", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["categories"],
    operation_id = "createCategory"
)]
#[post("/categories")]
pub async fn create_category(
    state: web::Data<HttpState>,
    payload: web::Json<NewCategory>,
) -> ApiResult<HttpResponse> {
    let created = state.categories.create(payload.into_inner()).await?;
    Ok(HttpResponse::Created().json(created))
}

/// Patch a category.
#[utoipa::path(
    patch,
    path = "/api/v1/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    request_body = UpdateCategoryRequest,
    responses(
        (status = 200, description = "Updated category", body = Category),
        (status = 400, description = "Invalid request", body = Error),
        (status = 403, description = "The default category is protected", body = Error),
        (status = 404, description = "No such category", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["categories"],
    operation_id = "updateCategory"
)]
#[patch("/categories/{id}")]
pub async fn update_category(
    state: web::Data<HttpState>,
    id: web::Path<CategoryId>,
    payload: web::Json<UpdateCategoryRequest>,
) -> ApiResult<web::Json<Category>> {
    let updated = state
        .categories
        .update(id.into_inner(), payload.into_inner().into())
        .await?;
    Ok(web::Json(updated))
}

/// Delete a category, re-parenting its children and reassigning its
/// products to the default category.
#[utoipa::path(
    delete,
    path = "/api/v1/categories/{id}",
    params(("id" = i64, Path, description = "Category identifier")),
    responses(
        (status = 204, description = "Category deleted"),
        (status = 403, description = "The default category is protected", body = Error),
        (status = 404, description = "No such category", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["categories"],
    operation_id = "deleteCategory"
)]
#[delete("/categories/{id}")]
pub async fn delete_category(
    state: web::Data<HttpState>,
    id: web::Path<CategoryId>,
) -> ApiResult<HttpResponse> {
    let id = id.into_inner();
    if state.categories.delete(id).await? {
        Ok(HttpResponse::NoContent().finish())
    } else {
        Err(Error::not_found(format!("category {id} does not exist")))
    }
}

/// Move a category to a new position and, optionally, a new parent.
#[utoipa::path(
    post,
    path = "/api/v1/categories/{id}/reorder",
    params(("id" = i64, Path, description = "Category identifier")),
    request_body = ReorderRequest,
    responses(
        (status = 204, description = "Category moved"),
        (status = 403, description = "The default category is protected", body = Error),
        (status = 404, description = "No such category", body = Error),
        (status = 503, description = "Backend unavailable", body = Error)
    ),
    tags = ["categories"],
    operation_id = "reorderCategory"
)]
#[post("/categories/{id}/reorder")]
pub async fn reorder_category(
    state: web::Data<HttpState>,
    id: web::Path<CategoryId>,
    payload: web::Json<ReorderRequest>,
) -> ApiResult<HttpResponse> {
    let ReorderRequest { order, parent_id } = payload.into_inner();
    state
        .categories
        .reorder(id.into_inner(), order, parent_id)
        .await?;
    Ok(HttpResponse::NoContent().finish())
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use crate::domain::ports::{
        MockCategoriesCommand, MockCategoriesQuery, MockCityAutocomplete, MockProductsCommand,
        MockProductsQuery,
    };
    use crate::inbound::http::api_scope;
    use actix_web::http::StatusCode;
    use actix_web::{App, test};
    use serde_json::json;
    use std::sync::Arc;

    pub(crate) fn state_with(
        categories_query: MockCategoriesQuery,
        categories: MockCategoriesCommand,
    ) -> HttpState {
        HttpState {
            categories_query: Arc::new(categories_query),
            categories: Arc::new(categories),
            products_query: Arc::new(MockProductsQuery::new()),
            products: Arc::new(MockProductsCommand::new()),
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
        let cleared: UpdateCategoryRequest =
            serde_json::from_value(json!({ "parentId": null })).expect("valid payload");
        assert_eq!(cleared.parent_id, Some(None));
        assert!(cleared.description.is_none());

        let set: UpdateCategoryRequest =
            serde_json::from_value(json!({ "parentId": 3, "description": "x" }))
                .expect("valid payload");
        assert_eq!(set.parent_id, Some(Some(3)));
        assert_eq!(set.description, Some(Some("x".into())));
    }

    #[actix_web::test]
    async fn get_category_maps_missing_to_not_found() {
        let mut query = MockCategoriesQuery::new();
        query.expect_get().return_once(|_| None);

        let res = call(
            state_with(query, MockCategoriesCommand::new()),
            test::TestRequest::get().uri("/api/v1/categories/99"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NOT_FOUND);
    }

    #[actix_web::test]
    async fn create_category_returns_created() {
        let mut command = MockCategoriesCommand::new();
        command.expect_create().return_once(|draft| {
            Ok(Category {
                id: 5,
                name: draft.name,
                visible: draft.visible,
                parent_id: draft.parent_id,
                slug: "camisetas".into(),
                description: draft.description,
                order: 0,
            })
        });

        let res = call(
            state_with(MockCategoriesQuery::new(), command),
            test::TestRequest::post()
                .uri("/api/v1/categories")
                .set_json(json!({ "name": "Camisetas" })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::CREATED);
        let body: Category = test::read_body_json(res).await;
        assert_eq!(body.slug, "camisetas");
    }

    #[actix_web::test]
    async fn delete_category_propagates_forbidden() {
        let mut command = MockCategoriesCommand::new();
        command
            .expect_delete()
            .return_once(|_| Err(Error::forbidden("the default category cannot be deleted")));

        let res = call(
            state_with(MockCategoriesQuery::new(), command),
            test::TestRequest::delete().uri("/api/v1/categories/1"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::FORBIDDEN);
    }

    #[actix_web::test]
    async fn delete_category_returns_no_content() {
        let mut command = MockCategoriesCommand::new();
        command.expect_delete().return_once(|_| Ok(true));

        let res = call(
            state_with(MockCategoriesQuery::new(), command),
            test::TestRequest::delete().uri("/api/v1/categories/7"),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }

    #[actix_web::test]
    async fn reorder_passes_target_position_through() {
        let mut command = MockCategoriesCommand::new();
        command
            .expect_reorder()
            .withf(|id, order, parent| *id == 3 && *order == 0 && *parent == Some(8))
            .return_once(|_, _, _| Ok(()));

        let res = call(
            state_with(MockCategoriesQuery::new(), command),
            test::TestRequest::post()
                .uri("/api/v1/categories/3/reorder")
                .set_json(json!({ "order": 0, "parentId": 8 })),
        )
        .await;
        assert_eq!(res.status(), StatusCode::NO_CONTENT);
    }
}
