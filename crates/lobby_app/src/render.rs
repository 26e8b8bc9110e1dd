use std::fmt::Write;

use lobby_core::{AppViewModel, Provenance, ReleaseYear, Timeline, TimelineMark};
use serde::Serialize;

const SUMMARY_WIDTH: usize = 160;

#[derive(Debug, Serialize)]
pub struct GalleryJson<'a> {
    pub year: i32,
    pub title: &'a str,
    pub cards: Vec<CardJson<'a>>,
}

#[derive(Debug, Serialize)]
pub struct CardJson<'a> {
    pub title: &'a str,
    pub image_url: &'a str,
    pub summary: &'a str,
    pub year: ReleaseYear,
    pub provenance: Provenance,
}

impl<'a> GalleryJson<'a> {
    /// `None` until a decade has been selected.
    pub fn from_view(view: &'a AppViewModel) -> Option<Self> {
        Some(Self {
            year: view.active_year?,
            title: view.title.as_deref()?,
            cards: view
                .cards
                .iter()
                .map(|card| CardJson {
                    title: &card.title,
                    image_url: &card.image_url,
                    summary: &card.summary,
                    year: card.year,
                    provenance: card.provenance,
                })
                .collect(),
        })
    }
}

pub fn render_gallery(view: &AppViewModel) -> String {
    let mut out = String::new();
    let Some(title) = view.title.as_deref() else {
        return out;
    };
    let _ = writeln!(out, "{title}");
    let _ = writeln!(out, "{}", "=".repeat(title.chars().count()));
    if view.cards.is_empty() {
        let _ = writeln!(out, "(no lobby cards found)");
    }
    for (i, card) in view.cards.iter().enumerate() {
        let source = match card.provenance {
            Provenance::Primary => "archive",
            Provenance::Fallback => "poster",
        };
        let _ = writeln!(out, "{:>2}. {} ({}) [{}]", i + 1, card.title, card.year, source);
        let _ = writeln!(out, "    {}", card.image_url);
        let _ = writeln!(out, "    {}", shorten(&card.summary, SUMMARY_WIDTH));
    }
    out
}

pub fn render_timeline(timeline: &Timeline) -> String {
    let mut bar = String::new();
    for mark in timeline.marks() {
        match mark {
            TimelineMark::Decade(year) => {
                let _ = write!(bar, " {year} ");
            }
            TimelineMark::Tick { hidden: true } => bar.push('.'),
            TimelineMark::Tick { hidden: false } => bar.push('|'),
        }
    }
    let mut out = format!("{}\n", bar.trim());
    for year in timeline.decades() {
        let _ = writeln!(out, "{year}: {}", Timeline::gallery_title(year));
    }
    out
}

fn shorten(text: &str, width: usize) -> String {
    if text.chars().count() <= width {
        return text.to_string();
    }
    let cut: String = text.chars().take(width.saturating_sub(3)).collect();
    format!("{}...", cut.trim_end())
}
