//! Adapter for the public municipality directory.

mod dto;
mod http_source;

pub use http_source::{DEFAULT_MUNICIPALITIES_URL, MunicipalityHttpSource};
