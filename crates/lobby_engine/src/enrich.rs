use serde::Deserialize;

use crate::http::{build_client, get_json, parse_url};
use crate::{FetchError, FetchSettings, OmdbSettings};

/// OMDb's marker for a field it has no value for.
const NOT_AVAILABLE: &str = "N/A";

/// What the secondary source knows about a title.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Enrichment {
    pub poster: Option<String>,
    pub plot: Option<String>,
}

/// Title/year lookup used to backfill artwork for records without media.
#[async_trait::async_trait]
pub trait EnrichmentSource: Send + Sync {
    async fn lookup(&self, title: &str, year: Option<i32>) -> Result<Enrichment, FetchError>;
}

#[derive(Debug, Deserialize)]
struct OmdbResponse {
    #[serde(rename = "Poster", default)]
    poster: Option<String>,
    #[serde(rename = "Plot", default)]
    plot: Option<String>,
}

#[derive(Debug, Clone)]
pub struct OmdbClient {
    client: reqwest::Client,
    settings: OmdbSettings,
}

impl OmdbClient {
    pub fn new(settings: OmdbSettings, fetch: &FetchSettings) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(fetch)?,
            settings,
        })
    }
}

#[async_trait::async_trait]
impl EnrichmentSource for OmdbClient {
    async fn lookup(&self, title: &str, year: Option<i32>) -> Result<Enrichment, FetchError> {
        let mut url = parse_url(&self.settings.endpoint)?;
        {
            let mut pairs = url.query_pairs_mut();
            pairs.append_pair("apikey", &self.settings.api_key);
            pairs.append_pair("t", title);
            if let Some(year) = year {
                pairs.append_pair("y", &year.to_string());
            }
            pairs.append_pair("plot", "full");
        }

        // Unknown titles come back as {"Response":"False","Error":...},
        // which simply carries no poster.
        let response: OmdbResponse = get_json(&self.client, url).await?;
        Ok(Enrichment {
            poster: present(response.poster),
            plot: present(response.plot),
        })
    }
}

fn present(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty() && v != NOT_AVAILABLE)
}
