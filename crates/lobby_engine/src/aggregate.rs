use std::collections::HashSet;
use std::sync::Arc;

use lobby_core::{MovieEntry, Provenance, RawRecord, TitleGroups};
use lobby_logging::{lobby_debug, lobby_info};

use crate::{
    ArchiveSettings, EngineConfig, EnrichmentSource, FailureKind, FetchError, Fetcher,
    HttpImageProbe, ImageProbe, NfsaArchive, OmdbClient, ProbeOutcome,
};

/// Why a group produced no card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    /// Title already emitted earlier in this aggregation.
    Duplicate,
    /// Neither a preview file nor a poster was available.
    NoImage,
    /// The chosen image URL answered 404.
    ImageNotFound,
    /// The image probe could not reach the host.
    ProbeFailed(FailureKind),
}

enum Resolution {
    Accept {
        image_url: String,
        plot: Option<String>,
    },
    Skip(SkipReason),
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AggregateReport {
    pub groups_seen: usize,
    pub duplicates: usize,
    pub missing_image: usize,
    pub rejected_image: usize,
    pub fallback_ran: bool,
}

impl AggregateReport {
    fn record_skip(&mut self, reason: &SkipReason) {
        match reason {
            SkipReason::Duplicate => self.duplicates += 1,
            SkipReason::NoImage => self.missing_image += 1,
            SkipReason::ImageNotFound | SkipReason::ProbeFailed(_) => self.rejected_image += 1,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Aggregation {
    pub entries: Vec<MovieEntry>,
    pub report: AggregateReport,
}

/// Builds one decade's gallery from the archive, backfilling from the
/// enrichment source when the archive's own media runs short.
///
/// Never fails: every per-item problem becomes a skipped group.
#[derive(Clone)]
pub struct Aggregator {
    fetcher: Fetcher,
    probe: Arc<dyn ImageProbe>,
    enrichment: Option<Arc<dyn EnrichmentSource>>,
}

impl Aggregator {
    pub fn new(fetcher: Fetcher, probe: Arc<dyn ImageProbe>) -> Self {
        Self {
            fetcher,
            probe,
            enrichment: None,
        }
    }

    pub fn with_enrichment(mut self, source: Arc<dyn EnrichmentSource>) -> Self {
        self.enrichment = Some(source);
        self
    }

    /// Wires the HTTP-backed archive, probe and (when configured) OMDb client.
    pub fn from_config(config: &EngineConfig) -> Result<Self, FetchError> {
        let archive = NfsaArchive::new(config.archive.endpoint.clone(), &config.fetch)?;
        let fetcher = Fetcher::new(Arc::new(archive), config.archive.clone());
        let probe = HttpImageProbe::new(&config.fetch)?;
        let mut aggregator = Self::new(fetcher, Arc::new(probe));
        if let Some(omdb) = &config.omdb {
            aggregator = aggregator.with_enrichment(Arc::new(OmdbClient::new(
                omdb.clone(),
                &config.fetch,
            )?));
        }
        Ok(aggregator)
    }

    pub async fn aggregate(&self, year_anchor: i32, limit: usize) -> Vec<MovieEntry> {
        self.aggregate_with_report(year_anchor, limit).await.entries
    }

    pub async fn aggregate_with_report(&self, year_anchor: i32, limit: usize) -> Aggregation {
        let mut entries = Vec::with_capacity(limit);
        let mut emitted = HashSet::new();
        let mut report = AggregateReport::default();
        if limit == 0 {
            return Aggregation { entries, report };
        }

        let primary: TitleGroups = self
            .fetcher
            .fetch_records(year_anchor, true)
            .await
            .into_iter()
            .collect();
        lobby_debug!("Primary pass: {} title groups", primary.len());
        self.collect(
            &primary,
            Provenance::Primary,
            limit,
            &mut entries,
            &mut emitted,
            &mut report,
        )
        .await;

        if entries.len() < limit {
            lobby_debug!(
                "Primary pass gave {} of {} cards, running fallback pass",
                entries.len(),
                limit
            );
            report.fallback_ran = true;
            let fallback: TitleGroups = self
                .fetcher
                .fetch_records(year_anchor, false)
                .await
                .into_iter()
                .collect();
            self.collect(
                &fallback,
                Provenance::Fallback,
                limit,
                &mut entries,
                &mut emitted,
                &mut report,
            )
            .await;
        }

        lobby_info!(
            "Gallery {} has {} cards ({} groups seen, {} without image, {} rejected, {} duplicate)",
            year_anchor,
            entries.len(),
            report.groups_seen,
            report.missing_image,
            report.rejected_image,
            report.duplicates
        );
        Aggregation { entries, report }
    }

    async fn collect(
        &self,
        groups: &TitleGroups,
        provenance: Provenance,
        limit: usize,
        entries: &mut Vec<MovieEntry>,
        emitted: &mut HashSet<String>,
        report: &mut AggregateReport,
    ) {
        for (title, representative) in groups.representatives() {
            if entries.len() >= limit {
                break;
            }
            report.groups_seen += 1;

            let resolution = if emitted.contains(title) {
                Resolution::Skip(SkipReason::Duplicate)
            } else {
                match provenance {
                    Provenance::Primary => self.resolve_primary(representative),
                    Provenance::Fallback => self.resolve_fallback(title, representative).await,
                }
            };

            match resolution {
                Resolution::Accept { image_url, plot } => {
                    let entry = MovieEntry::new(title, representative.clone(), image_url, provenance)
                        .map(|entry| entry.with_fallback_summary(plot));
                    match entry {
                        Some(entry) => {
                            emitted.insert(title.to_string());
                            entries.push(entry);
                        }
                        None => report.record_skip(&SkipReason::NoImage),
                    }
                }
                Resolution::Skip(reason) => {
                    lobby_debug!("Skipping '{}' ({:?}): {:?}", title, provenance, reason);
                    report.record_skip(&reason);
                }
            }
        }
    }

    fn resolve_primary(&self, record: &RawRecord) -> Resolution {
        match preview_image_url(self.fetcher.settings(), record) {
            Some(image_url) => Resolution::Accept {
                image_url,
                plot: None,
            },
            None => Resolution::Skip(SkipReason::NoImage),
        }
    }

    async fn resolve_fallback(&self, title: &str, record: &RawRecord) -> Resolution {
        let mut plot = None;
        let mut poster = None;
        if let Some(source) = &self.enrichment {
            match source.lookup(title, record.production_year()).await {
                Ok(found) => {
                    poster = found.poster;
                    plot = found.plot;
                }
                Err(err) => lobby_debug!("Enrichment lookup for '{}' failed: {}", title, err),
            }
        }

        let Some(image_url) =
            poster.or_else(|| preview_image_url(self.fetcher.settings(), record))
        else {
            return Resolution::Skip(SkipReason::NoImage);
        };

        match self.probe.probe(&image_url).await {
            ProbeOutcome::Reachable => Resolution::Accept { image_url, plot },
            ProbeOutcome::NotFound => Resolution::Skip(SkipReason::ImageNotFound),
            ProbeOutcome::Failed(kind) => Resolution::Skip(SkipReason::ProbeFailed(kind)),
        }
    }
}

/// Media host URL for the record's first preview that names a file.
pub fn preview_image_url(settings: &ArchiveSettings, record: &RawRecord) -> Option<String> {
    let path = record.preview_paths().next()?;
    let base = settings.media_base_url.trim_end_matches('/');
    Some(format!("{}/{}", base, path.trim_start_matches('/')))
}
