#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Effect {
    /// Fetch (or recall) the gallery anchored at `year`.
    LoadGallery { year: i32 },
    /// Bring the gallery heading into view after a user-driven change.
    ScrollToGallery,
}
