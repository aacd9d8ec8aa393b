//! Domain ports defining the edges of the hexagon.
//!
//! Driven ports describe how the domain reaches the hosted data API and the
//! public municipality directory; driving ports are the use-cases inbound
//! adapters call. Each driven trait exposes strongly typed errors so adapters
//! map their failures into predictable variants instead of returning
//! `anyhow::Result`.

mod categories;
mod category_store;
mod city_autocomplete;
mod municipality_source;
mod product_store;
mod products;
mod store_error;

pub use categories::{CategoriesCommand, CategoriesQuery, CategoryNode};
pub use category_store::{CategoryPatch, CategoryStore, NewCategoryRow};
pub use city_autocomplete::CityAutocomplete;
pub use municipality_source::{
    FixtureMunicipalitySource, MunicipalitySource, MunicipalitySourceError,
};
pub use product_store::ProductStore;
pub use products::{ProductsCommand, ProductsQuery};
pub use store_error::StoreError;

#[cfg(test)]
pub use categories::{MockCategoriesCommand, MockCategoriesQuery};
#[cfg(test)]
pub use category_store::MockCategoryStore;
#[cfg(test)]
pub use city_autocomplete::MockCityAutocomplete;
#[cfg(test)]
pub use municipality_source::MockMunicipalitySource;
#[cfg(test)]
pub use product_store::MockProductStore;
#[cfg(test)]
pub use products::{MockProductsCommand, MockProductsQuery};
