use std::sync::Arc;

use crate::view_model::{AnimationDirection, AppViewModel, CardView};
use crate::{MovieEntry, Timeline};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppState {
    timeline: Timeline,
    active_year: Option<i32>,
    previous_year: Option<i32>,
    loading: bool,
    entries: Arc<[MovieEntry]>,
    dirty: bool,
}

impl Default for AppState {
    fn default() -> Self {
        Self::with_timeline(Timeline::default())
    }
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_timeline(timeline: Timeline) -> Self {
        Self {
            timeline,
            active_year: None,
            previous_year: None,
            loading: false,
            entries: Arc::from(Vec::new()),
            dirty: false,
        }
    }

    pub fn timeline(&self) -> &Timeline {
        &self.timeline
    }

    pub fn active_year(&self) -> Option<i32> {
        self.active_year
    }

    pub fn is_loading(&self) -> bool {
        self.loading
    }

    pub fn entries(&self) -> &[MovieEntry] {
        &self.entries
    }

    pub fn view(&self) -> AppViewModel {
        AppViewModel {
            title: self.active_year.map(Timeline::gallery_title),
            decades: self.timeline.decades().collect(),
            active_year: self.active_year,
            previous_year: self.previous_year,
            loading: self.loading,
            animation: self
                .active_year
                .map(|year| AnimationDirection::between(self.previous_year, year))
                .unwrap_or_default(),
            cards: self
                .entries
                .iter()
                .map(|entry| CardView {
                    title: entry.title().to_string(),
                    image_url: entry.image_url().to_string(),
                    summary: entry.summary().to_string(),
                    year: entry.year(),
                    provenance: entry.provenance(),
                })
                .collect(),
            dirty: self.dirty,
        }
    }

    /// Returns whether the view changed since the last call, and resets the flag.
    pub fn consume_dirty(&mut self) -> bool {
        std::mem::take(&mut self.dirty)
    }

    pub(crate) fn activate_year(&mut self, year: i32) {
        self.previous_year = self.active_year;
        self.active_year = Some(year);
        self.entries = Arc::from(Vec::new());
        self.loading = true;
        self.dirty = true;
    }

    pub(crate) fn apply_loaded(&mut self, entries: Arc<[MovieEntry]>) {
        self.entries = entries;
        self.loading = false;
        self.dirty = true;
    }
}
