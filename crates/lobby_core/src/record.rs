use std::fmt;

use serde::{Deserialize, Serialize, Serializer};

/// Summary shown when the archive record has none.
pub const NO_DESCRIPTION: &str = "No description available.";

/// Archive identifier; the collection API serves numbers but older records carry strings.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RecordId {
    Number(u64),
    Text(String),
}

impl fmt::Display for RecordId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            RecordId::Number(id) => write!(f, "{id}"),
            RecordId::Text(id) => f.write_str(id),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct PreviewEntry {
    #[serde(rename = "filePath", default, skip_serializing_if = "Option::is_none")]
    pub file_path: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ProductionDate {
    #[serde(rename = "fromYear", default, skip_serializing_if = "Option::is_none")]
    pub from_year: Option<i32>,
}

/// One search result from the archive. Unknown fields are ignored.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default)]
    pub production_dates: Vec<ProductionDate>,
    #[serde(default)]
    pub preview: Vec<PreviewEntry>,
}

impl RawRecord {
    /// Year of the first production date, when the archive lists one.
    pub fn production_year(&self) -> Option<i32> {
        self.production_dates.first().and_then(|date| date.from_year)
    }

    /// Length of the summary in characters; absent summaries count as zero.
    pub fn summary_len(&self) -> usize {
        self.summary
            .as_deref()
            .map(|s| s.chars().count())
            .unwrap_or(0)
    }

    /// Preview file paths in archive order, skipping entries without one.
    pub fn preview_paths(&self) -> impl Iterator<Item = &str> {
        self.preview
            .iter()
            .filter_map(|entry| entry.file_path.as_deref())
            .filter(|path| !path.is_empty())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Provenance {
    /// Image served by the archive's own media host.
    Primary,
    /// Record without native media, image found through the enrichment source.
    Fallback,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ReleaseYear {
    Known(i32),
    Unknown,
}

impl From<Option<i32>> for ReleaseYear {
    fn from(year: Option<i32>) -> Self {
        year.map_or(ReleaseYear::Unknown, ReleaseYear::Known)
    }
}

impl fmt::Display for ReleaseYear {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReleaseYear::Known(year) => write!(f, "{year}"),
            ReleaseYear::Unknown => f.write_str("unknown"),
        }
    }
}

impl Serialize for ReleaseYear {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            ReleaseYear::Known(year) => serializer.serialize_i32(*year),
            ReleaseYear::Unknown => serializer.serialize_str("unknown"),
        }
    }
}

/// A gallery card. Always carries a non-empty image URL.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovieEntry {
    title: String,
    #[serde(rename = "item")]
    source: RawRecord,
    image_url: String,
    summary: String,
    year: ReleaseYear,
    provenance: Provenance,
}

impl MovieEntry {
    /// Builds an entry from a group representative.
    ///
    /// Returns `None` when `image_url` is blank; entries are never emitted
    /// with a placeholder image.
    pub fn new(
        title: impl Into<String>,
        source: RawRecord,
        image_url: impl Into<String>,
        provenance: Provenance,
    ) -> Option<Self> {
        let image_url = image_url.into();
        if image_url.trim().is_empty() {
            return None;
        }
        let summary = source
            .summary
            .as_deref()
            .filter(|s| !s.trim().is_empty())
            .unwrap_or(NO_DESCRIPTION)
            .to_string();
        let year = ReleaseYear::from(source.production_year());
        Some(Self {
            title: title.into(),
            source,
            image_url,
            summary,
            year,
            provenance,
        })
    }

    /// Uses `summary` when the archive record had no description of its own.
    pub fn with_fallback_summary(mut self, summary: Option<String>) -> Self {
        if self.summary == NO_DESCRIPTION {
            if let Some(summary) = summary.filter(|s| !s.trim().is_empty()) {
                self.summary = summary;
            }
        }
        self
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn source(&self) -> &RawRecord {
        &self.source
    }

    pub fn image_url(&self) -> &str {
        &self.image_url
    }

    pub fn summary(&self) -> &str {
        &self.summary
    }

    pub fn year(&self) -> ReleaseYear {
        self.year
    }

    pub fn provenance(&self) -> Provenance {
        self.provenance
    }
}
