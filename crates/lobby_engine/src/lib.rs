//! Lobby engine: archive fetching, poster backfill, and per-session gallery loading.
mod aggregate;
mod archive;
mod config;
mod engine;
mod enrich;
mod http;
mod paginate;
mod probe;
mod session;
mod types;

pub use aggregate::{preview_image_url, AggregateReport, Aggregation, Aggregator, SkipReason};
pub use archive::{ArchiveSource, NfsaArchive};
pub use config::{
    ArchiveSettings, EngineConfig, FetchSettings, OmdbSettings, DEFAULT_ARCHIVE_ENDPOINT,
    DEFAULT_MEDIA_BASE_URL, DEFAULT_OMDB_ENDPOINT,
};
pub use engine::{EngineEvent, EngineHandle};
pub use enrich::{Enrichment, EnrichmentSource, OmdbClient};
pub use paginate::{Fetcher, PageRun, PageState};
pub use probe::{HttpImageProbe, ImageProbe, ProbeOutcome};
pub use session::{GalleryLoad, GallerySession};
pub use types::{FailureKind, FetchError};
