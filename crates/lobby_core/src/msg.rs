use std::sync::Arc;

use crate::MovieEntry;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Msg {
    /// User picked a decade on the timeline or in the menu.
    YearSelected(i32),
    /// Engine finished loading the gallery for a decade.
    GalleryLoaded {
        year: i32,
        entries: Arc<[MovieEntry]>,
    },
    /// Fallback for placeholder wiring.
    NoOp,
}
