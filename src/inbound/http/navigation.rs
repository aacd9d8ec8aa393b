//! Storefront navigation handler.

use actix_web::{get, web};

use crate::domain::ports::CategoryNode;
use crate::inbound::http::state::HttpState;

/// The storefront navigation tree: visible top-level categories with their
/// visible children.
#[utoipa::path(
    get,
    path = "/api/v1/navigation",
    responses(
        (status = 200, description = "Navigation tree", body = [CategoryNode])
    ),
    tags = ["storefront"],
    operation_id = "getNavigation"
)]
#[get("/navigation")]
pub async fn get_navigation(state: web::Data<HttpState>) -> web::Json<Vec<CategoryNode>> {
    web::Json(state.categories_query.navigation().await)
}
