//! Domain entities and services for the storefront catalogue.
//!
//! Purpose: keep the category tree and product catalogue semantics free of
//! transport concerns. Inbound adapters call the driving ports implemented by
//! the services here; the services call driven ports (stores, sources) that
//! outbound adapters implement.

pub mod categories_service;
pub mod category;
pub mod city;
pub mod city_lookup;
pub mod error;
pub mod ports;
pub mod product;
pub mod products_service;
pub mod slug;
pub mod trace_id;

pub use self::categories_service::CategoriesService;
pub use self::category::{
    Category, CategoryChanges, CategoryId, DEFAULT_CATEGORY_ID, NewCategory, collect_descendants,
};
pub use self::city::City;
pub use self::city_lookup::CityLookupService;
pub use self::error::{Error, ErrorCode};
pub use self::product::{
    Discount, DiscountKind, NewProduct, Product, ProductChanges, ProductColor, ProductId,
    ProductVariant, SizeKind,
};
pub use self::products_service::ProductsService;
pub use self::trace_id::{TRACE_ID_HEADER, TraceId};

/// Convenient result alias for operations returning a domain error.
pub type ApiResult<T> = Result<T, Error>;
