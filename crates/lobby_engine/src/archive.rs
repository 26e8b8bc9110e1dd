use lobby_core::{RawRecord, SearchQuery};
use serde::Deserialize;

use crate::http::{build_client, get_json};
use crate::{FailureKind, FetchError, FetchSettings};

/// One page of archive search results.
#[async_trait::async_trait]
pub trait ArchiveSource: Send + Sync {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawRecord>, FetchError>;
}

#[derive(Debug, Deserialize)]
struct SearchResponse {
    #[serde(default)]
    results: Option<Vec<RawRecord>>,
}

/// Collection search API client.
#[derive(Debug, Clone)]
pub struct NfsaArchive {
    client: reqwest::Client,
    endpoint: String,
}

impl NfsaArchive {
    pub fn new(endpoint: impl Into<String>, settings: &FetchSettings) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(settings)?,
            endpoint: endpoint.into(),
        })
    }
}

#[async_trait::async_trait]
impl ArchiveSource for NfsaArchive {
    async fn search(&self, query: &SearchQuery) -> Result<Vec<RawRecord>, FetchError> {
        let url = query
            .to_url(&self.endpoint)
            .map_err(|err| FetchError::new(FailureKind::InvalidUrl, err.to_string()))?;
        let response: SearchResponse = get_json(&self.client, url).await?;
        Ok(response.results.unwrap_or_default())
    }
}
