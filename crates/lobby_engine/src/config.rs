use std::time::Duration;

pub const DEFAULT_ARCHIVE_ENDPOINT: &str = "https://api.collection.nfsa.gov.au/search";
pub const DEFAULT_MEDIA_BASE_URL: &str = "https://media.nfsacollection.net/";
pub const DEFAULT_OMDB_ENDPOINT: &str = "http://www.omdbapi.com/";

/// HTTP transport settings shared by every client the engine builds.
#[derive(Debug, Clone)]
pub struct FetchSettings {
    pub connect_timeout: Duration,
    pub request_timeout: Duration,
    pub user_agent: String,
}

impl Default for FetchSettings {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            request_timeout: Duration::from_secs(30),
            user_agent: concat!("lobby-gallery/", env!("CARGO_PKG_VERSION")).to_string(),
        }
    }
}

/// Archive search endpoint and pagination bounds.
#[derive(Debug, Clone)]
pub struct ArchiveSettings {
    pub endpoint: String,
    pub media_base_url: String,
    pub page_size: u32,
    /// Pagination stops once this many records have been accumulated.
    pub max_records: usize,
    /// Years before the anchor covered by one gallery.
    pub lookback_years: u32,
}

impl Default for ArchiveSettings {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ARCHIVE_ENDPOINT.to_string(),
            media_base_url: DEFAULT_MEDIA_BASE_URL.to_string(),
            page_size: 25,
            max_records: 150,
            lookback_years: 10,
        }
    }
}

#[derive(Debug, Clone)]
pub struct OmdbSettings {
    pub endpoint: String,
    pub api_key: String,
}

impl OmdbSettings {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            endpoint: DEFAULT_OMDB_ENDPOINT.to_string(),
            api_key: api_key.into(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct EngineConfig {
    pub fetch: FetchSettings,
    pub archive: ArchiveSettings,
    /// Poster lookup for the fallback pass; `None` keeps archive previews only.
    pub omdb: Option<OmdbSettings>,
    /// Maximum cards per gallery.
    pub gallery_limit: usize,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            fetch: FetchSettings::default(),
            archive: ArchiveSettings::default(),
            omdb: None,
            gallery_limit: 8,
        }
    }
}
