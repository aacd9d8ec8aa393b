//! Driving port for the city autocomplete.

use async_trait::async_trait;

use crate::domain::city::City;

/// City name search backing the autocomplete input.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait CityAutocomplete: Send + Sync {
    /// Case-insensitive substring search over the municipality directory.
    ///
    /// A blank term yields no results; a directory fetch failure is logged
    /// and also yields no results.
    async fn search(&self, term: &str) -> Vec<City>;
}
