// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Repository discovery.
//!
//! Walks a search root in parallel looking for `.git` directories,
//! skipping pruned directories. Found repositories fan in through a
//! channel and are returned sorted.

use std::path::{Path, PathBuf};

use crossbeam_channel::unbounded;
use ignore::{WalkBuilder, WalkState};

use crate::error::{ToolError, ToolErrorKind};
use crate::glob::GlobList;

/// Name of the directory that marks a repository root.
const GIT_DIR: &str = ".git";

/// Finds version-control repositories beneath a root.
pub trait RepositoryScanner: Sync {
    /// Repository root paths beneath `root`, never descending into
    /// directories matched by `prune`.
    fn find_repositories(&self, root: &Path, prune: &GlobList) -> Result<Vec<PathBuf>, ToolError>;
}

/// Configuration for the walk-based scanner.
#[derive(Debug, Clone, Default)]
pub struct ScannerConfig {
    /// Walker threads (0 = automatic).
    pub threads: usize,
    /// Maximum directory depth below the root.
    pub max_depth: Option<usize>,
}

/// Scanner backed by the `ignore` crate's parallel directory walker.
#[derive(Debug, Clone, Default)]
pub struct WalkScanner {
    config: ScannerConfig,
}

impl WalkScanner {
    pub fn new(config: ScannerConfig) -> Self {
        Self { config }
    }
}

impl RepositoryScanner for WalkScanner {
    fn find_repositories(&self, root: &Path, prune: &GlobList) -> Result<Vec<PathBuf>, ToolError> {
        let metadata = std::fs::metadata(root).map_err(|e| {
            let err = ToolError::from_io(&e);
            ToolError::new(err.kind, format!("{}: {}", root.display(), err.message))
        })?;
        if !metadata.is_dir() {
            return Err(ToolError::new(
                ToolErrorKind::NotFound,
                format!("{} is not a directory", root.display()),
            ));
        }

        if root.to_str().is_some_and(|p| prune.is_match(p)) {
            tracing::debug!("search path {} is pruned", root.display());
            return Ok(Vec::new());
        }

        let (tx, rx) = unbounded::<PathBuf>();
        let prune_filter = prune.clone();

        let walker = WalkBuilder::new(root)
            .hidden(false)
            .ignore(false)
            .git_ignore(false)
            .git_global(false)
            .git_exclude(false)
            .parents(false)
            .follow_links(false)
            .threads(self.config.threads)
            .max_depth(self.config.max_depth)
            .filter_entry(move |entry| {
                if entry.depth() == 0 || !entry.file_type().is_some_and(|ft| ft.is_dir()) {
                    return true;
                }
                match entry.path().to_str() {
                    Some(path) if prune_filter.is_match(path) => {
                        tracing::debug!("pruned {}", path);
                        false
                    }
                    _ => true,
                }
            })
            .build_parallel();

        walker.run(|| {
            let tx = tx.clone();
            Box::new(move |result| match result {
                Ok(entry) => {
                    let is_git_dir = entry.file_name() == GIT_DIR
                        && entry.file_type().is_some_and(|ft| ft.is_dir());
                    if !is_git_dir {
                        return WalkState::Continue;
                    }
                    if let Some(repository) = entry.path().parent() {
                        if tx.send(repository.to_path_buf()).is_err() {
                            return WalkState::Quit;
                        }
                    }
                    // Repository internals never contain working trees of interest.
                    WalkState::Skip
                }
                Err(err) => {
                    log_walk_error(&err);
                    WalkState::Continue
                }
            })
        });
        drop(tx);

        let mut repositories: Vec<PathBuf> = rx.into_iter().collect();
        repositories.sort();
        repositories.dedup();
        Ok(repositories)
    }
}

/// Permission errors are expected when walking a home directory and are
/// kept out of user-visible output.
fn log_walk_error(err: &ignore::Error) {
    let permission_denied = err
        .io_error()
        .is_some_and(|e| e.kind() == std::io::ErrorKind::PermissionDenied);
    if permission_denied {
        tracing::debug!("skipping unreadable entry: {}", err);
    } else {
        tracing::warn!("error searching for repositories: {}", err);
    }
}

#[cfg(test)]
#[path = "scanner_tests.rs"]
mod tests;
