// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Record of the exclusions applied by the last successful run.
//!
//! `<cache dir>/cache.json` holds the paths this tool excluded, so the
//! next run only applies the delta and `reset` knows what to undo:
//!
//! ```json
//! { "paths": ["/path/to/exclusion1", "/path/to/exclusion2"], "updated": "..." }
//! ```

use std::path::{Path, PathBuf};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::exclusion::ExclusionSet;

/// Directory name under the user cache directory.
pub const CACHE_DIR_NAME: &str = "tmignore";

/// File name of the record inside the cache directory.
pub const CACHE_FILE_NAME: &str = "cache.json";

/// Persisted cache record.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct CacheRecord {
    /// Excluded paths.
    pub paths: ExclusionSet,

    /// Last write timestamp (absent in records from older versions).
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated: Option<DateTime<Utc>>,
}

/// File-backed state store.
#[derive(Debug, Clone)]
pub struct Cache {
    dir: PathBuf,
}

impl Cache {
    /// Cache rooted at `dir` (the directory is created on first write).
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Default location: `<user cache dir>/tmignore`.
    pub fn default_dir() -> Option<PathBuf> {
        dirs::cache_dir().map(|dir| dir.join(CACHE_DIR_NAME))
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    pub fn file_path(&self) -> PathBuf {
        self.dir.join(CACHE_FILE_NAME)
    }

    /// Load the full record, `None` if absent or unreadable.
    pub fn load(&self) -> Option<CacheRecord> {
        let path = self.file_path();
        let content = match std::fs::read_to_string(&path) {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("no cache file found at {}", path.display());
                return None;
            }
            Err(e) => {
                tracing::error!("could not read cache file {}: {}", path.display(), e);
                return None;
            }
        };
        match serde_json::from_str::<CacheRecord>(&content) {
            Ok(record) => {
                tracing::debug!("found cache file at {}", path.display());
                Some(CacheRecord {
                    paths: record.paths.into_iter().map(normalize_path).collect(),
                    updated: record.updated,
                })
            }
            Err(e) => {
                tracing::error!("could not parse cache file {}: {}", path.display(), e);
                None
            }
        }
    }

    /// Previously applied exclusions; empty when there is no usable record.
    pub fn read(&self) -> ExclusionSet {
        self.load().map(|record| record.paths).unwrap_or_default()
    }

    /// Replace the record with `paths`.
    ///
    /// Writes a sibling temp file and renames it over the record, so the
    /// previous content is superseded in full or not at all.
    pub fn write(&self, paths: &ExclusionSet) -> Result<()> {
        std::fs::create_dir_all(&self.dir).map_err(|source| Error::Cache {
            path: self.dir.clone(),
            source,
        })?;

        let record = CacheRecord {
            paths: paths.clone(),
            updated: Some(Utc::now()),
        };
        let content = serde_json::to_string_pretty(&record)?;

        let path = self.file_path();
        let tmp = self.dir.join(format!("{CACHE_FILE_NAME}.tmp"));
        std::fs::write(&tmp, content).map_err(|source| Error::Cache {
            path: tmp.clone(),
            source,
        })?;
        std::fs::rename(&tmp, &path).map_err(|source| Error::Cache {
            path: path.clone(),
            source,
        })?;

        tracing::debug!("wrote {} paths to cache file {}", paths.len(), path.display());
        Ok(())
    }

    /// Delete the record and its directory. Absent is not an error.
    pub fn clear(&self) -> Result<()> {
        match std::fs::remove_dir_all(&self.dir) {
            Ok(()) => {
                tracing::debug!("deleted cache directory {}", self.dir.display());
                Ok(())
            }
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(Error::Cache {
                path: self.dir.clone(),
                source,
            }),
        }
    }
}

/// Records from older versions keep git's trailing `/` on directories.
fn normalize_path(path: String) -> String {
    let trimmed = path.trim_end_matches('/');
    if trimmed.is_empty() || trimmed.len() == path.len() {
        path
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
#[path = "cache_tests.rs"]
mod tests;
