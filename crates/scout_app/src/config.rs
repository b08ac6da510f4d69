use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use engine_logging::engine_info;
use scout_core::Priority;
use scout_engine::{FetchSettings, ProbeSettings, ScrapeConfig};
use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("could not read config {path:?}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("could not parse config {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: ron::error::SpannedError,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DeclaredImages {
    /// Declared images take the front slots.
    First,
    /// Declared images back-fill behind probed ones.
    Last,
}

/// On-disk tuning. Every field is optional in the file; missing ones keep
/// the engine defaults.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub user_agent: String,
    pub page_connect_timeout_ms: u64,
    pub page_request_timeout_ms: u64,
    pub max_page_bytes: u64,
    pub workers: usize,
    pub probe_connect_timeout_ms: u64,
    pub probe_read_timeout_ms: u64,
    pub probe_deadline_ms: u64,
    pub min_image_bytes: u64,
    pub max_image_bytes: u64,
    pub declared_images: DeclaredImages,
}

impl Default for AppConfig {
    fn default() -> Self {
        let defaults = ScrapeConfig::default();
        Self {
            user_agent: defaults.user_agent,
            page_connect_timeout_ms: millis(defaults.fetch.connect_timeout),
            page_request_timeout_ms: millis(defaults.fetch.request_timeout),
            max_page_bytes: defaults.fetch.max_bytes,
            workers: defaults.probe.workers,
            probe_connect_timeout_ms: millis(defaults.probe.connect_timeout),
            probe_read_timeout_ms: millis(defaults.probe.read_timeout),
            probe_deadline_ms: millis(defaults.probe.deadline),
            min_image_bytes: defaults.probe.min_bytes,
            max_image_bytes: defaults.probe.max_bytes,
            declared_images: match defaults.declared_image_priority {
                Priority::High => DeclaredImages::First,
                Priority::Low => DeclaredImages::Last,
            },
        }
    }
}

impl AppConfig {
    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let content = fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        let config = ron::from_str(&content).map_err(|source| ConfigError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
        engine_info!("Loaded config from {:?}", path);
        Ok(config)
    }

    pub fn into_scrape_config(self) -> ScrapeConfig {
        ScrapeConfig {
            fetch: FetchSettings {
                connect_timeout: Duration::from_millis(self.page_connect_timeout_ms),
                request_timeout: Duration::from_millis(self.page_request_timeout_ms),
                max_bytes: self.max_page_bytes,
                ..FetchSettings::default()
            },
            probe: ProbeSettings {
                workers: self.workers.max(1),
                connect_timeout: Duration::from_millis(self.probe_connect_timeout_ms),
                read_timeout: Duration::from_millis(self.probe_read_timeout_ms),
                deadline: Duration::from_millis(self.probe_deadline_ms),
                min_bytes: self.min_image_bytes,
                max_bytes: self.max_image_bytes,
                ..ProbeSettings::default()
            },
            user_agent: self.user_agent,
            declared_image_priority: match self.declared_images {
                DeclaredImages::First => Priority::High,
                DeclaredImages::Last => Priority::Low,
            },
        }
    }
}

fn millis(duration: Duration) -> u64 {
    u64::try_from(duration.as_millis()).unwrap_or(u64::MAX)
}
