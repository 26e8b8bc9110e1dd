use reqwest::StatusCode;

use crate::http::{build_client, map_reqwest_error, parse_url};
use crate::{FailureKind, FetchError, FetchSettings};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ProbeOutcome {
    Reachable,
    NotFound,
    Failed(FailureKind),
}

/// Checks that an image URL can be served before it is shown.
#[async_trait::async_trait]
pub trait ImageProbe: Send + Sync {
    async fn probe(&self, url: &str) -> ProbeOutcome;
}

/// GET probe that inspects only the status line; the body is dropped unread.
/// Only 404 counts as missing.
#[derive(Debug, Clone)]
pub struct HttpImageProbe {
    client: reqwest::Client,
}

impl HttpImageProbe {
    pub fn new(settings: &FetchSettings) -> Result<Self, FetchError> {
        Ok(Self {
            client: build_client(settings)?,
        })
    }
}

#[async_trait::async_trait]
impl ImageProbe for HttpImageProbe {
    async fn probe(&self, url: &str) -> ProbeOutcome {
        let parsed = match parse_url(url) {
            Ok(parsed) => parsed,
            Err(err) => return ProbeOutcome::Failed(err.kind),
        };
        match self.client.get(parsed).send().await {
            Ok(response) if response.status() == StatusCode::NOT_FOUND => ProbeOutcome::NotFound,
            Ok(_) => ProbeOutcome::Reachable,
            Err(err) => ProbeOutcome::Failed(map_reqwest_error(err).kind),
        }
    }
}
