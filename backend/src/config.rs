//! # Application Config
//!
//! Settings stored as a single YAML file, usually `config.yaml` in the data
//! directory.
//!
//! ```yaml
//! data_directory: /home/me/.local/share/Bucket List
//! storage_key: bucket-list-goals
//! observability: tracing
//! log_level: info
//! ```
//!
//! Missing keys fall back to their defaults. A missing file is created with
//! the defaults on first load.

use anyhow::{Context, Result};
use log::{debug, info};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::domain::{GoalStore, LogSink, NoopSink, ObservabilitySink, TracingSink, DEFAULT_STORAGE_KEY};
use crate::storage::FileStorage;

/// Which instrumentation the store reports through
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ObservabilityKind {
    None,
    #[default]
    Log,
    Tracing,
}

impl ObservabilityKind {
    pub fn build_sink(self) -> Box<dyn ObservabilitySink> {
        match self {
            ObservabilityKind::None => Box::new(NoopSink),
            ObservabilityKind::Log => Box::new(LogSink),
            ObservabilityKind::Tracing => Box::new(TracingSink),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Where goal snapshots are written
    pub data_directory: PathBuf,
    /// Key (file stem) of the goal snapshot
    pub storage_key: String,
    pub observability: ObservabilityKind,
    /// Default log filter; `RUST_LOG` takes precedence
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            data_directory: Self::default_data_directory(),
            storage_key: DEFAULT_STORAGE_KEY.to_string(),
            observability: ObservabilityKind::default(),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Platform data directory, or `./data` when there is none
    pub fn default_data_directory() -> PathBuf {
        dirs::data_dir()
            .map(|dir| dir.join("Bucket List"))
            .unwrap_or_else(|| PathBuf::from("data"))
    }

    /// Read the config at `path`, writing the defaults there if it is missing
    pub fn load_or_create(path: &Path) -> Result<Self> {
        if path.exists() {
            let yaml = fs::read_to_string(path)
                .with_context(|| format!("Failed to read config {}", path.display()))?;
            let config: AppConfig = serde_yaml::from_str(&yaml)
                .with_context(|| format!("Invalid config {}", path.display()))?;
            debug!("Loaded config from {:?}", path);
            Ok(config)
        } else {
            let config = AppConfig::default();
            config.save(path)?;
            info!("Created default config at {:?}", path);
            Ok(config)
        }
    }

    /// Write the config atomically (temp file, then rename)
    pub fn save(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create {}", parent.display()))?;
        }

        let yaml = serde_yaml::to_string(self)?;
        let temp_path = path.with_extension("yaml.tmp");
        fs::write(&temp_path, yaml)?;
        fs::rename(&temp_path, path)?;

        debug!("Saved config to {:?}", path);
        Ok(())
    }
}

/// Build a file-backed store from `config` and load the previous session.
///
/// An unreadable snapshot is logged and the store starts empty.
pub fn initialize_store(config: &AppConfig) -> Result<GoalStore<FileStorage>> {
    info!("Setting up goal storage in {}", config.data_directory.display());
    let storage = FileStorage::new(&config.data_directory)
        .with_context(|| format!("Failed to open {}", config.data_directory.display()))?;

    let mut store = GoalStore::with_key(storage, config.storage_key.clone())
        .with_sink(config.observability.build_sink());

    match store.load() {
        Ok(count) => info!("Goal store ready with {} goals", count),
        Err(e) => log::warn!("Goal store starting empty: {}", e),
    }

    Ok(store)
}
