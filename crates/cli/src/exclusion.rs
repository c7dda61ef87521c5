// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! The exclusion set and how it is built.
//!
//! Build pipeline: scan each search root for repositories, ask git
//! for each repository's ignored paths, drop whitelisted paths, union
//! the rest. One unreadable root or broken repository never aborts the
//! build; it just contributes nothing.

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};
use crate::git::IgnoredFileCollector;
use crate::glob::GlobList;
use crate::scanner::RepositoryScanner;

/// Set of absolute paths that should be excluded from backups.
///
/// Paths are opaque, case-sensitive strings compared by equality.
/// Iteration order is sorted, which keeps cache files and listings stable.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExclusionSet(BTreeSet<String>);

impl ExclusionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn insert(&mut self, path: impl Into<String>) -> bool {
        self.0.insert(path.into())
    }

    pub fn contains(&self, path: &str) -> bool {
        self.0.contains(path)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.0.iter().map(String::as_str)
    }

    /// Members of `self` that are not in `other`, in sorted order.
    pub fn difference<'a>(&'a self, other: &'a ExclusionSet) -> impl Iterator<Item = &'a str> {
        self.0.difference(&other.0).map(String::as_str)
    }

    /// Add every member of `other`.
    pub fn union_with(&mut self, other: ExclusionSet) {
        self.0.extend(other.0);
    }
}

impl FromIterator<String> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> FromIterator<&'a str> for ExclusionSet {
    fn from_iter<I: IntoIterator<Item = &'a str>>(iter: I) -> Self {
        Self(iter.into_iter().map(str::to_string).collect())
    }
}

impl Extend<String> for ExclusionSet {
    fn extend<I: IntoIterator<Item = String>>(&mut self, iter: I) {
        self.0.extend(iter);
    }
}

impl IntoIterator for ExclusionSet {
    type Item = String;
    type IntoIter = std::collections::btree_set::IntoIter<String>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.into_iter()
    }
}

/// Counters describing one build.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct BuildStats {
    pub roots_scanned: usize,
    pub roots_failed: usize,
    pub repositories: usize,
    pub repositories_failed: usize,
    pub ignored: usize,
    pub whitelisted: usize,
}

/// Result of building the current exclusion set.
#[derive(Debug, Clone, Default)]
pub struct BuildOutput {
    pub exclusions: ExclusionSet,
    pub stats: BuildStats,
}

/// Combines repository scanning, ignored-file collection and whitelist
/// filtering into the current exclusion set.
pub struct ExclusionSetBuilder<'a> {
    scanner: &'a dyn RepositoryScanner,
    collector: &'a dyn IgnoredFileCollector,
}

impl<'a> ExclusionSetBuilder<'a> {
    pub fn new(scanner: &'a dyn RepositoryScanner, collector: &'a dyn IgnoredFileCollector) -> Self {
        Self { scanner, collector }
    }

    /// Build the exclusion set for `roots`.
    ///
    /// Fails only when there was at least one root and none of them
    /// could be scanned; an empty result in that case would undo every
    /// existing exclusion.
    pub fn build(
        &self,
        roots: &[PathBuf],
        prune: &GlobList,
        whitelist: &GlobList,
    ) -> Result<BuildOutput> {
        let mut stats = BuildStats::default();

        tracing::info!("searching for git repositories");
        let mut repositories: Vec<PathBuf> = Vec::new();
        for root in roots {
            match self.scanner.find_repositories(root, prune) {
                Ok(found) => {
                    stats.roots_scanned += 1;
                    tracing::debug!("found {} repositories under {}", found.len(), root.display());
                    repositories.extend(found);
                }
                Err(e) => {
                    stats.roots_failed += 1;
                    tracing::error!("failed to search {}: {}", root.display(), e);
                }
            }
        }
        if !roots.is_empty() && stats.roots_scanned == 0 {
            return Err(Error::ScanUnavailable {
                failed: stats.roots_failed,
            });
        }
        repositories.sort();
        repositories.dedup();
        stats.repositories = repositories.len();
        tracing::info!("found {} git repositories", repositories.len());

        // Collection is independent per repository; results are unioned
        // below on this thread.
        let collected: Vec<(&Path, _)> = repositories
            .par_iter()
            .map(|repo| (repo.as_path(), self.collector.ignored_paths(repo)))
            .collect();

        let mut exclusions = ExclusionSet::new();
        for (repo, result) in collected {
            let paths = match result {
                Ok(paths) => paths,
                Err(e) => {
                    stats.repositories_failed += 1;
                    tracing::error!(
                        "failed to list ignored files for repository {}: {}",
                        repo.display(),
                        e
                    );
                    continue;
                }
            };
            tracing::debug!("{} ignored paths in {}", paths.len(), repo.display());
            for path in paths {
                stats.ignored += 1;
                if let Some(pattern) = whitelist.first_match(&path) {
                    stats.whitelisted += 1;
                    tracing::debug!("skipping whitelisted path {} (matches {:?})", path, pattern);
                    continue;
                }
                exclusions.insert(path);
            }
        }

        tracing::info!("identified {} paths to exclude from backups", exclusions.len());
        Ok(BuildOutput { exclusions, stats })
    }
}

#[cfg(test)]
#[path = "exclusion_tests.rs"]
mod tests;
