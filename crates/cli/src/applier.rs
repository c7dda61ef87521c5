// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Chunked application of a diff to the backup system.
//!
//! Paths are handed to the toggle in fixed-size chunks to stay under
//! command-length limits. A failed chunk is logged and the remaining
//! chunks are still attempted.

use serde::Serialize;

use crate::error::ToolErrorKind;
use crate::tmutil::ExclusionToggle;

/// Paths per toggle invocation.
pub const CHUNK_SIZE: usize = 200;

/// Outcome of applying a diff.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ApplyReport {
    /// Paths in chunks that were added successfully.
    pub added: usize,
    /// Paths in chunks that were removed successfully (or already absent).
    pub removed: usize,
    /// Chunks that failed.
    pub failed_chunks: usize,
    /// Paths in failed chunks.
    pub failed_paths: usize,
}

impl ApplyReport {
    pub fn has_failures(&self) -> bool {
        self.failed_chunks > 0
    }
}

/// Applies add/remove lists through an [`ExclusionToggle`].
pub struct Applier<'a> {
    toggle: &'a dyn ExclusionToggle,
    chunk_size: usize,
}

impl<'a> Applier<'a> {
    pub fn new(toggle: &'a dyn ExclusionToggle) -> Self {
        Self {
            toggle,
            chunk_size: CHUNK_SIZE,
        }
    }

    pub fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size.max(1);
        self
    }

    /// Stop excluding `remove`, then exclude `add`.
    ///
    /// Removals go first so a removal can never undo an addition that
    /// names the same location.
    pub fn apply(&self, add: &[String], remove: &[String]) -> ApplyReport {
        let mut report = ApplyReport::default();
        self.remove(remove, &mut report);
        self.add(add, &mut report);
        report
    }

    fn add(&self, paths: &[String], report: &mut ApplyReport) {
        if paths.is_empty() {
            tracing::info!("no exclusions to add");
            return;
        }
        tracing::info!("adding backup exclusions for {} paths", paths.len());
        for (i, chunk) in paths.chunks(self.chunk_size).enumerate() {
            match self.toggle.add(chunk) {
                Ok(()) => report.added += chunk.len(),
                Err(e) => {
                    report.failed_chunks += 1;
                    report.failed_paths += chunk.len();
                    tracing::error!(
                        "failed to add backup exclusions (chunk {}, first path {}): {}",
                        i + 1,
                        chunk[0],
                        e
                    );
                }
            }
        }
        tracing::info!("added backup exclusions for {} paths", report.added);
    }

    fn remove(&self, paths: &[String], report: &mut ApplyReport) {
        if paths.is_empty() {
            tracing::info!("no exclusions to remove");
            return;
        }
        tracing::info!("removing backup exclusions for {} paths", paths.len());
        for (i, chunk) in paths.chunks(self.chunk_size).enumerate() {
            match self.toggle.remove(chunk) {
                Ok(()) => report.removed += chunk.len(),
                Err(e) if e.kind == ToolErrorKind::AlreadyAbsent => {
                    tracing::debug!("chunk {} contained paths that were not excluded", i + 1);
                    report.removed += chunk.len();
                }
                Err(e) => {
                    report.failed_chunks += 1;
                    report.failed_paths += chunk.len();
                    tracing::error!(
                        "failed to remove backup exclusions (chunk {}, first path {}): {}",
                        i + 1,
                        chunk[0],
                        e
                    );
                }
            }
        }
        tracing::info!("removed backup exclusions for {} paths", report.removed);
    }
}

#[cfg(test)]
#[path = "applier_tests.rs"]
mod tests;
