use crate::{Provenance, ReleaseYear};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AnimationDirection {
    /// Moving forward in time, or first render.
    #[default]
    FadeInRight,
    /// Moving back in time.
    FadeInLeft,
}

impl AnimationDirection {
    pub fn between(previous: Option<i32>, current: i32) -> Self {
        match previous {
            Some(prev) if prev >= current => AnimationDirection::FadeInLeft,
            _ => AnimationDirection::FadeInRight,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppViewModel {
    pub title: Option<String>,
    pub decades: Vec<i32>,
    pub active_year: Option<i32>,
    pub previous_year: Option<i32>,
    pub loading: bool,
    pub animation: AnimationDirection,
    pub cards: Vec<CardView>,
    pub dirty: bool,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CardView {
    pub title: String,
    pub image_url: String,
    pub summary: String,
    pub year: ReleaseYear,
    pub provenance: Provenance,
}
