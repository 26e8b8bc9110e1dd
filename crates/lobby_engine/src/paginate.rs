use std::sync::Arc;

use lobby_core::{RawRecord, SearchQuery, YearRange};
use lobby_logging::{lobby_debug, lobby_warn};

use crate::{ArchiveSettings, ArchiveSource};

/// Pagination progress. `Done` and `Aborted` are terminal and both keep
/// whatever was accumulated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageState {
    Requesting { page: u32 },
    Accumulating { page: u32, received: usize },
    Done,
    Aborted,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRun {
    pub records: Vec<RawRecord>,
    pub pages_requested: u32,
    pub terminal: PageState,
}

/// Best-effort lobby card fetcher over a paginated archive.
///
/// Errors never reach the caller: a failed page ends pagination and the
/// records gathered so far are returned.
#[derive(Clone)]
pub struct Fetcher {
    source: Arc<dyn ArchiveSource>,
    settings: ArchiveSettings,
}

impl Fetcher {
    pub fn new(source: Arc<dyn ArchiveSource>, settings: ArchiveSettings) -> Self {
        Self { source, settings }
    }

    pub fn settings(&self) -> &ArchiveSettings {
        &self.settings
    }

    pub async fn fetch_records(&self, year_anchor: i32, require_media: bool) -> Vec<RawRecord> {
        self.fetch_records_traced(year_anchor, require_media)
            .await
            .records
    }

    pub async fn fetch_records_traced(&self, year_anchor: i32, require_media: bool) -> PageRun {
        let window = YearRange::lookback(year_anchor, self.settings.lookback_years);
        let query = SearchQuery::lobby_cards(window, require_media, self.settings.page_size);
        let run = self.paginate(query).await;
        lobby_debug!(
            "Fetched {} records for {} (media={}) in {} pages, ended {:?}",
            run.records.len(),
            window,
            require_media,
            run.pages_requested,
            run.terminal
        );
        run
    }

    async fn paginate(&self, query: SearchQuery) -> PageRun {
        let page_size = query.page_size as usize;
        let mut records = Vec::new();
        let mut pages_requested = 0;
        let mut state = PageState::Requesting { page: 1 };

        loop {
            state = match state {
                PageState::Requesting { page } => {
                    if records.len() >= self.settings.max_records {
                        PageState::Done
                    } else {
                        pages_requested += 1;
                        match self.source.search(&query.with_page(page)).await {
                            Ok(batch) => {
                                let received = batch.len();
                                records.extend(batch);
                                PageState::Accumulating { page, received }
                            }
                            Err(err) => {
                                lobby_warn!(
                                    "Archive page {} for {} failed, keeping {} records: {}",
                                    page,
                                    query.year_range,
                                    records.len(),
                                    err
                                );
                                PageState::Aborted
                            }
                        }
                    }
                }
                PageState::Accumulating { page, received } => {
                    if received < page_size {
                        PageState::Done
                    } else {
                        PageState::Requesting { page: page + 1 }
                    }
                }
                PageState::Done | PageState::Aborted => break,
            };
        }

        PageRun {
            records,
            pages_requested,
            terminal: state,
        }
    }
}
