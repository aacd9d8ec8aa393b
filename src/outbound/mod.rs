//! Outbound adapters.

pub mod data_api;
pub mod memory;
pub mod municipalities;
