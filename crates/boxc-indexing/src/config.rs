use std::path::{Path, PathBuf};

use boxc_acl::AclCacheConfig;
use serde::{Deserialize, Serialize};

use crate::error::{IndexingError, IndexingResult};

/// Worker pool settings for bulk and incremental reindexing.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct WorkerConfig {
    /// Number of objects indexed concurrently.
    pub count: usize,
    /// Append-only progress file for resumable bulk jobs.
    pub progress_path: Option<PathBuf>,
}

impl Default for WorkerConfig {
    fn default() -> Self {
        Self {
            count: 4,
            progress_path: None,
        }
    }
}

/// Top-level indexer configuration, usually read from a TOML file:
///
/// ```toml
/// log_level = "debug"
///
/// [acl_cache]
/// max_entries = 10000
/// ttl_secs = 60
///
/// [workers]
/// count = 8
/// ```
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct IndexerConfig {
    pub acl_cache: AclCacheConfig,
    pub workers: WorkerConfig,
    /// Default `tracing` level when none is given on the command line.
    pub log_level: String,
}

impl Default for IndexerConfig {
    fn default() -> Self {
        Self {
            acl_cache: AclCacheConfig::default(),
            workers: WorkerConfig::default(),
            log_level: "info".to_string(),
        }
    }
}

impl IndexerConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(text: &str) -> IndexingResult<Self> {
        let config: Self = toml::from_str(text).map_err(|e| IndexingError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> IndexingResult<Self> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path)
            .map_err(|e| IndexingError::Config(format!("{}: {e}", path.display())))?;
        Self::from_toml_str(&text)
    }

    pub fn validate(&self) -> IndexingResult<()> {
        if self.acl_cache.max_entries == 0 {
            return Err(IndexingError::Config("acl_cache.max_entries must be non-zero".into()));
        }
        if self.workers.count == 0 {
            return Err(IndexingError::Config("workers.count must be non-zero".into()));
        }
        Ok(())
    }
}
