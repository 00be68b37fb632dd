use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::Duration;

use feed_core::OverlapPolicy;
use feed_engine::{CatalogSettings, FeedSettings};
use serde::{Deserialize, Serialize};

use super::cli::Args;
use super::logging::LogDestination;

const DEFAULT_CONFIG_FILE: &str = "feed.ron";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OverlapSetting {
    /// One batch at a time; a callback refused mid-batch runs once it ends.
    #[default]
    Guarded,
    /// Every visibility event starts a batch, even mid-batch.
    Interleave,
}

impl From<OverlapSetting> for OverlapPolicy {
    fn from(value: OverlapSetting) -> Self {
        match value {
            OverlapSetting::Guarded => OverlapPolicy::Guarded,
            OverlapSetting::Interleave => OverlapPolicy::Interleave,
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("failed to read config {path:?}: {source}")]
    Read { path: PathBuf, source: io::Error },
    #[error("failed to parse config {path:?}: {message}")]
    Parse { path: PathBuf, message: String },
    #[error("batch size must be at least 1")]
    ZeroBatchSize,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub base_url: String,
    pub list_path: String,
    pub media_path: String,
    pub batch_size: usize,
    pub overlap: OverlapSetting,
    pub connect_timeout_secs: u64,
    pub request_timeout_secs: u64,
    pub max_bytes: u64,
    pub log: LogDestination,
    pub state_dir: PathBuf,
}

impl Default for AppConfig {
    fn default() -> Self {
        let catalog = CatalogSettings::default();
        let feed = FeedSettings::default();
        Self {
            base_url: catalog.base_url,
            list_path: catalog.list_path,
            media_path: catalog.media_path,
            batch_size: feed.batch_size,
            overlap: OverlapSetting::default(),
            connect_timeout_secs: catalog.connect_timeout.as_secs(),
            request_timeout_secs: catalog.request_timeout.as_secs(),
            max_bytes: catalog.max_bytes,
            log: LogDestination::default(),
            state_dir: PathBuf::from("."),
        }
    }
}

impl AppConfig {
    /// Command-line flags win over the file.
    pub fn apply_args(&mut self, args: &Args) {
        if let Some(base_url) = &args.base_url {
            self.base_url = base_url.clone();
        }
        if let Some(batch_size) = args.batch_size {
            self.batch_size = batch_size;
        }
        if let Some(overlap) = args.overlap {
            self.overlap = overlap;
        }
        if let Some(log) = args.log {
            self.log = log;
        }
        if let Some(state_dir) = &args.state_dir {
            self.state_dir = state_dir.clone();
        }
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.batch_size == 0 {
            return Err(ConfigError::ZeroBatchSize);
        }
        Ok(())
    }

    pub fn catalog_settings(&self) -> CatalogSettings {
        CatalogSettings {
            base_url: self.base_url.clone(),
            list_path: self.list_path.clone(),
            media_path: self.media_path.clone(),
            connect_timeout: Duration::from_secs(self.connect_timeout_secs),
            request_timeout: Duration::from_secs(self.request_timeout_secs),
            max_bytes: self.max_bytes,
            ..CatalogSettings::default()
        }
    }

    pub fn feed_settings(&self) -> FeedSettings {
        FeedSettings {
            batch_size: self.batch_size,
            overlap: self.overlap.into(),
        }
    }
}

/// Loads `path`, or `./feed.ron` if no path was given. Only the implicit
/// default file may be absent.
pub fn load(path: Option<&Path>) -> Result<AppConfig, ConfigError> {
    let (path, required) = match path {
        Some(path) => (path.to_path_buf(), true),
        None => (PathBuf::from(DEFAULT_CONFIG_FILE), false),
    };
    let content = match fs::read_to_string(&path) {
        Ok(text) => text,
        Err(err) if err.kind() == io::ErrorKind::NotFound && !required => {
            return Ok(AppConfig::default());
        }
        Err(source) => return Err(ConfigError::Read { path, source }),
    };
    ron::from_str(&content).map_err(|err| ConfigError::Parse {
        path,
        message: err.to_string(),
    })
}
