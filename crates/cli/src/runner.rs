// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Command sequencing for `run`, `list` and `reset`.
//!
//! Every invocation is a complete pass: build the current exclusion set,
//! diff it against the cached one, apply the diff, record the result.
//! Partial failures inside build and apply are logged and the pass still
//! completes, so repeated runs converge.

use serde::Serialize;

use crate::applier::{Applier, ApplyReport, CHUNK_SIZE};
use crate::cache::{Cache, CacheRecord};
use crate::config::ResolvedConfig;
use crate::error::{Error, Result};
use crate::exclusion::{BuildStats, ExclusionSetBuilder};
use crate::reconcile::{self, Diff};
use crate::tmutil::ExclusionToggle;

/// Options shared by all commands.
#[derive(Debug, Clone, Copy)]
pub struct RunnerConfig {
    /// Leave the cache untouched.
    pub dry_run: bool,
    /// Paths per toggle invocation.
    pub chunk_size: usize,
}

impl Default for RunnerConfig {
    fn default() -> Self {
        Self {
            dry_run: false,
            chunk_size: CHUNK_SIZE,
        }
    }
}

/// What a `run` did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct RunSummary {
    pub build: BuildStats,
    pub exclusions: usize,
    pub diff: Diff,
    pub apply: ApplyReport,
}

/// What a `reset` did.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ResetSummary {
    /// Paths the cache said were excluded.
    pub previous: usize,
    pub apply: ApplyReport,
    /// Whether the cache record was deleted.
    pub cleared: bool,
}

/// Sequences the reconciliation steps against a cache and a toggle.
pub struct Runner<'a> {
    cache: &'a Cache,
    toggle: &'a dyn ExclusionToggle,
    config: RunnerConfig,
}

impl<'a> Runner<'a> {
    pub fn new(cache: &'a Cache, toggle: &'a dyn ExclusionToggle, config: RunnerConfig) -> Self {
        Self {
            cache,
            toggle,
            config,
        }
    }

    fn applier(&self) -> Applier<'a> {
        Applier::new(self.toggle).with_chunk_size(self.config.chunk_size)
    }

    /// Bring backup exclusions in line with what git currently ignores.
    ///
    /// Only a build that could not scan anything or a failed cache write
    /// is returned as an error; the latter happens after the diff was
    /// applied and does not undo it.
    pub fn run(&self, builder: &ExclusionSetBuilder<'_>, config: &ResolvedConfig) -> Result<RunSummary> {
        let build = builder.build(&config.roots, &config.prune, &config.whitelist)?;
        let current = build.exclusions;

        let previous = self.cache.read();
        let diff = reconcile::diff(&previous, &current);
        tracing::info!(
            "{} exclusions to add, {} to remove",
            diff.added.len(),
            diff.removed.len()
        );

        let apply = self.applier().apply(&diff.added, &diff.removed);
        if apply.has_failures() {
            tracing::warn!(
                "{} paths in {} chunks could not be updated; they stay unapplied until the set changes, run `tmignore reset` to rebuild",
                apply.failed_paths,
                apply.failed_chunks
            );
        }

        if self.config.dry_run {
            tracing::info!("dry run, cache not updated");
        } else {
            self.cache.write(&current)?;
            tracing::info!("finished update");
        }

        Ok(RunSummary {
            build: build.stats,
            exclusions: current.len(),
            diff,
            apply,
        })
    }

    /// The record of the last successful run.
    pub fn list(&self) -> CacheRecord {
        self.cache.load().unwrap_or_default()
    }

    /// Undo every exclusion recorded in the cache, then delete the cache.
    ///
    /// If some exclusions could not be removed the cache is kept so the
    /// reset can be retried, unless `force` is set.
    pub fn reset(&self, force: bool) -> Result<ResetSummary> {
        let previous = self.cache.read();
        let remove: Vec<String> = previous.into_iter().collect();
        let apply = self.applier().apply(&[], &remove);

        let mut summary = ResetSummary {
            previous: remove.len(),
            apply,
            cleared: false,
        };

        if summary.apply.has_failures() && !force {
            return Err(Error::ResetIncomplete {
                failed: summary.apply.failed_paths,
            });
        }
        if self.config.dry_run {
            tracing::info!("dry run, cache not deleted");
            return Ok(summary);
        }

        self.cache.clear()?;
        summary.cleared = true;
        tracing::info!("removed {} backup exclusions and deleted the cache", summary.previous);
        Ok(summary)
    }
}

#[cfg(test)]
#[path = "runner_tests.rs"]
mod tests;
