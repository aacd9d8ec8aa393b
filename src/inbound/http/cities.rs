//! City autocomplete handler.

use actix_web::{get, web};
use serde::Deserialize;

use crate::domain::City;
use crate::inbound::http::state::HttpState;

/// Search term for the autocomplete. An absent or blank term yields no
/// results.
#[derive(Debug, Deserialize)]
pub struct CitySearch {
    #[serde(default)]
    pub q: String,
}

/// Search municipality names for the address form autocomplete.
#[utoipa::path(
    get,
    path = "/api/v1/cities",
    params(("q" = String, Query, description = "Case-insensitive substring to match")),
    responses(
        (status = 200, description = "Matching cities", body = [City])
    ),
    tags = ["cities"],
    operation_id = "searchCities"
)]
#[get("/cities")]
pub async fn search_cities(
    state: web::Data<HttpState>,
    search: web::Query<CitySearch>,
) -> web::Json<Vec<City>> {
    web::Json(state.cities.search(&search.q).await)
}
