//! Adapters for the hosted REST data API.
//!
//! The backend is a PostgREST-style service: one URL per table, filters and
//! ordering as query parameters, `Prefer: return=representation` on writes.
//! These adapters own transport details only; tree maintenance and business
//! rules stay in the domain services.

mod dto;
mod http_store;

pub use http_store::{DataApiCategoryStore, DataApiClient, DataApiProductStore};
