use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use lobby_core::Timeline;
use lobby_engine::{EngineConfig, OmdbSettings};
use lobby_logging::lobby_info;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {}: {source}", path.display())]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("failed to parse config {}: {message}", path.display())]
    Parse { path: PathBuf, message: String },
}

/// On-disk settings. Every field is optional; absent ones keep engine defaults.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct GalleryConfigFile {
    pub archive_endpoint: Option<String>,
    pub media_base_url: Option<String>,
    pub page_size: Option<u32>,
    pub max_records: Option<usize>,
    pub lookback_years: Option<u32>,
    pub gallery_limit: Option<usize>,
    pub omdb_endpoint: Option<String>,
    pub omdb_api_key: Option<String>,
    pub connect_timeout_secs: Option<u64>,
    pub request_timeout_secs: Option<u64>,
    pub timeline_start: Option<i32>,
    pub timeline_end: Option<i32>,
    pub timeline_step: Option<i32>,
}

pub fn load_config(path: Option<&Path>) -> Result<GalleryConfigFile, ConfigError> {
    let Some(path) = path else {
        return Ok(GalleryConfigFile::default());
    };
    let content = fs::read_to_string(path).map_err(|source| ConfigError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    let config = ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path: path.to_path_buf(),
        message: err.to_string(),
    })?;
    lobby_info!("Loaded config from {:?}", path);
    Ok(config)
}

impl GalleryConfigFile {
    /// Builds the engine config; `omdb_key` (from the command line or
    /// environment) takes precedence over the file's key.
    pub fn engine_config(&self, omdb_key: Option<String>, limit: Option<usize>) -> EngineConfig {
        let mut config = EngineConfig::default();
        let archive = &mut config.archive;
        if let Some(endpoint) = &self.archive_endpoint {
            archive.endpoint = endpoint.clone();
        }
        if let Some(base) = &self.media_base_url {
            archive.media_base_url = base.clone();
        }
        if let Some(page_size) = self.page_size {
            archive.page_size = page_size.max(1);
        }
        if let Some(max_records) = self.max_records {
            archive.max_records = max_records;
        }
        if let Some(lookback) = self.lookback_years {
            archive.lookback_years = lookback;
        }
        if let Some(secs) = self.connect_timeout_secs {
            config.fetch.connect_timeout = Duration::from_secs(secs);
        }
        if let Some(secs) = self.request_timeout_secs {
            config.fetch.request_timeout = Duration::from_secs(secs);
        }
        if let Some(gallery_limit) = limit.or(self.gallery_limit) {
            config.gallery_limit = gallery_limit;
        }

        let key = omdb_key
            .or_else(|| self.omdb_api_key.clone())
            .filter(|key| !key.trim().is_empty());
        config.omdb = key.map(|key| {
            let mut omdb = OmdbSettings::new(key);
            if let Some(endpoint) = &self.omdb_endpoint {
                omdb.endpoint = endpoint.clone();
            }
            omdb
        });
        config
    }

    pub fn timeline(&self) -> Timeline {
        let default = Timeline::default();
        Timeline::new(
            self.timeline_start.unwrap_or(default.start()),
            self.timeline_end.unwrap_or(default.end()),
            self.timeline_step.unwrap_or(default.step()),
        )
    }
}
