//! City autocomplete over the public municipality directory.

use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Mutex;
use tracing::warn;

use crate::domain::city::City;
use crate::domain::ports::{CityAutocomplete, MunicipalitySource};

/// Upper bound on autocomplete results per search.
pub const MAX_RESULTS: usize = 100;

/// City search backed by a lazily fetched, process-lifetime directory cache.
///
/// The directory is a few thousand rows and changes on a census timescale,
/// so one successful fetch serves every subsequent search. A failed fetch is
/// not cached; the next search retries.
pub struct CityLookupService<M> {
    source: Arc<M>,
    directory: Mutex<Option<Arc<Vec<City>>>>,
}

impl<M> CityLookupService<M> {
    /// Create a new lookup over the given directory source.
    pub fn new(source: Arc<M>) -> Self {
        Self {
            source,
            directory: Mutex::new(None),
        }
    }
}

impl<M> CityLookupService<M>
where
    M: MunicipalitySource,
{
    async fn directory(&self) -> Option<Arc<Vec<City>>> {
        let mut cached = self.directory.lock().await;
        if let Some(directory) = cached.as_ref() {
            return Some(Arc::clone(directory));
        }
        match self.source.fetch_all().await {
            Ok(mut cities) => {
                cities.sort_by(|a, b| a.name.to_lowercase().cmp(&b.name.to_lowercase()));
                let directory = Arc::new(cities);
                *cached = Some(Arc::clone(&directory));
                Some(directory)
            }
            Err(error) => {
                warn!(%error, "municipality directory fetch failed; serving no results");
                None
            }
        }
    }
}

#[async_trait]
impl<M> CityAutocomplete for CityLookupService<M>
where
    M: MunicipalitySource,
{
    async fn search(&self, term: &str) -> Vec<City> {
        let needle = term.trim().to_lowercase();
        if needle.is_empty() {
            return Vec::new();
        }
        let Some(directory) = self.directory().await else {
            return Vec::new();
        };
        directory
            .iter()
            .filter(|city| city.name.to_lowercase().contains(&needle))
            .take(MAX_RESULTS)
            .cloned()
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::ports::{MockMunicipalitySource, MunicipalitySourceError};

    fn city(id: i64, name: &str) -> City {
        City {
            id,
            name: name.into(),
        }
    }

    #[tokio::test]
    async fn search_matches_case_insensitively_in_sorted_order() {
        let mut source = MockMunicipalitySource::new();
        source.expect_fetch_all().times(1).return_once(|| {
            Ok(vec![
                city(3, "São Paulo"),
                city(1, "Santos"),
                city(2, "Santa Maria"),
            ])
        });

        let lookup = CityLookupService::new(Arc::new(source));
        let names: Vec<_> = lookup
            .search("san")
            .await
            .into_iter()
            .map(|c| c.name)
            .collect();
        assert_eq!(names, vec!["Santa Maria", "Santos"]);
    }

    #[tokio::test]
    async fn search_ignores_blank_terms_without_fetching() {
        let source = MockMunicipalitySource::new();
        let lookup = CityLookupService::new(Arc::new(source));
        assert!(lookup.search("   ").await.is_empty());
    }

    #[tokio::test]
    async fn directory_is_fetched_once() {
        let mut source = MockMunicipalitySource::new();
        source
            .expect_fetch_all()
            .times(1)
            .return_once(|| Ok(vec![city(1, "Recife")]));

        let lookup = CityLookupService::new(Arc::new(source));
        assert_eq!(lookup.search("rec").await.len(), 1);
        assert_eq!(lookup.search("rec").await.len(), 1);
    }

    #[tokio::test]
    async fn failed_fetch_serves_empty_and_retries_later() {
        let mut source = MockMunicipalitySource::new();
        let mut sequence = mockall::Sequence::new();
        source
            .expect_fetch_all()
            .times(1)
            .in_sequence(&mut sequence)
            .return_once(|| Err(MunicipalitySourceError::timeout("deadline exceeded")));
        source
            .expect_fetch_all()
            .times(1)
            .in_sequence(&mut sequence)
            .return_once(|| Ok(vec![city(1, "Recife")]));

        let lookup = CityLookupService::new(Arc::new(source));
        assert!(lookup.search("rec").await.is_empty());
        assert_eq!(lookup.search("rec").await.len(), 1);
    }

    #[tokio::test]
    async fn results_are_capped() {
        let mut source = MockMunicipalitySource::new();
        source.expect_fetch_all().times(1).return_once(|| {
            Ok((0..250)
                .map(|id| city(id, &format!("Cidade {id}")))
                .collect())
        });

        let lookup = CityLookupService::new(Arc::new(source));
        assert_eq!(lookup.search("cidade").await.len(), MAX_RESULTS);
    }
}
