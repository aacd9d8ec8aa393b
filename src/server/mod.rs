//! Server construction and middleware wiring.

mod config;

pub use config::{DataApiConfig, ServerConfig};

use std::sync::Arc;

use actix_web::dev::{Server, ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::{App, HttpServer, web};
use tracing::warn;
#[cfg(debug_assertions)]
use utoipa::OpenApi;
#[cfg(debug_assertions)]
use utoipa_swagger_ui::SwaggerUi;

#[cfg(debug_assertions)]
use crate::doc::ApiDoc;
use crate::domain::ports::FixtureMunicipalitySource;
use crate::domain::{CategoriesService, CityLookupService, ProductsService};
use crate::inbound::http::api_scope;
use crate::inbound::http::health::{HealthState, live, ready};
use crate::inbound::http::state::HttpState;
use crate::middleware::Trace;
use crate::outbound::data_api::{DataApiCategoryStore, DataApiClient, DataApiProductStore};
use crate::outbound::memory::{InMemoryCategoryStore, InMemoryProductStore};
use crate::outbound::municipalities::MunicipalityHttpSource;

fn wire_services<C, P>(categories: Arc<C>, products: Arc<P>, cities: Arc<dyn crate::domain::ports::CityAutocomplete>) -> HttpState
where
    C: crate::domain::ports::CategoryStore + 'static,
    P: crate::domain::ports::ProductStore + 'static,
{
    let categories_service = Arc::new(CategoriesService::new(
        Arc::clone(&categories),
        Arc::clone(&products),
    ));
    let products_service = Arc::new(ProductsService::new(products, categories));
    HttpState {
        categories_query: Arc::clone(&categories_service) as _,
        categories: categories_service,
        products_query: Arc::clone(&products_service) as _,
        products: products_service,
        cities,
    }
}

fn build_city_lookup(config: &ServerConfig) -> Arc<dyn crate::domain::ports::CityAutocomplete> {
    match MunicipalityHttpSource::new(config.municipalities_url.clone(), config.request_timeout) {
        Ok(source) => Arc::new(CityLookupService::new(Arc::new(source))),
        Err(error) => {
            warn!(%error, "municipality client construction failed; autocomplete disabled");
            Arc::new(CityLookupService::new(Arc::new(FixtureMunicipalitySource)))
        }
    }
}

fn build_http_state(config: &ServerConfig) -> std::io::Result<HttpState> {
    let cities = build_city_lookup(config);
    match &config.data_api {
        Some(data_api) => {
            let client = Arc::new(
                DataApiClient::new(
                    data_api.url.clone(),
                    data_api.api_key.clone(),
                    config.request_timeout,
                )
                .map_err(|error| {
                    std::io::Error::other(format!("data API client construction failed: {error}"))
                })?,
            );
            let categories = Arc::new(DataApiCategoryStore::new(Arc::clone(&client)));
            let products = Arc::new(DataApiProductStore::new(client));
            Ok(wire_services(categories, products, cities))
        }
        None => {
            warn!("no data API configured; serving from in-memory stores");
            let categories = Arc::new(InMemoryCategoryStore::with_default_category());
            let products = Arc::new(InMemoryProductStore::new());
            Ok(wire_services(categories, products, cities))
        }
    }
}

fn build_app(
    health_state: web::Data<HealthState>,
    http_state: web::Data<HttpState>,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let app = App::new()
        .app_data(health_state)
        .app_data(http_state)
        .wrap(Trace)
        .service(api_scope())
        .service(ready)
        .service(live);

    #[cfg(debug_assertions)]
    let app = app.service(SwaggerUi::new("/docs").url("/api-docs/openapi.json", ApiDoc::openapi()));
    #[cfg(not(debug_assertions))]
    let app = app;

    app
}

/// Construct an Actix HTTP server using the provided health state and
/// configuration.
///
/// # Errors
/// Propagates [`std::io::Error`] when dependency construction or socket
/// binding fails.
pub fn create_server(
    health_state: web::Data<HealthState>,
    config: ServerConfig,
) -> std::io::Result<Server> {
    let http_state = web::Data::new(build_http_state(&config)?);
    let server_health_state = health_state.clone();

    let server = HttpServer::new(move || {
        build_app(server_health_state.clone(), http_state.clone())
    })
    .bind(config.bind_addr)?
    .run();

    health_state.mark_ready();
    Ok(server)
}
