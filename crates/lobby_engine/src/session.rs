use std::collections::BTreeMap;
use std::sync::Arc;

use lobby_core::MovieEntry;
use lobby_logging::lobby_debug;

use crate::Aggregator;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GalleryLoad {
    pub year: i32,
    pub entries: Arc<[MovieEntry]>,
    pub cache_hit: bool,
}

/// Per-session gallery state: the aggregator and every decade loaded so far.
///
/// A year is aggregated at most once until [`GallerySession::reset`]; loads
/// take `&mut self`, so two loads of the same year cannot overlap.
pub struct GallerySession {
    aggregator: Aggregator,
    limit: usize,
    cache: BTreeMap<i32, Arc<[MovieEntry]>>,
}

impl GallerySession {
    pub fn new(aggregator: Aggregator, limit: usize) -> Self {
        Self {
            aggregator,
            limit,
            cache: BTreeMap::new(),
        }
    }

    pub fn limit(&self) -> usize {
        self.limit
    }

    pub async fn load_year(&mut self, year: i32) -> GalleryLoad {
        if let Some(entries) = self.cache.get(&year) {
            lobby_debug!("Gallery {} served from session cache", year);
            return GalleryLoad {
                year,
                entries: Arc::clone(entries),
                cache_hit: true,
            };
        }

        let entries: Arc<[MovieEntry]> = self.aggregator.aggregate(year, self.limit).await.into();
        self.cache.insert(year, Arc::clone(&entries));
        GalleryLoad {
            year,
            entries,
            cache_hit: false,
        }
    }

    pub fn cached(&self, year: i32) -> Option<Arc<[MovieEntry]>> {
        self.cache.get(&year).cloned()
    }

    pub fn cached_years(&self) -> Vec<i32> {
        self.cache.keys().copied().collect()
    }

    /// Drops every cached gallery; the next load of any year fetches again.
    pub fn reset(&mut self) {
        self.cache.clear();
    }
}
