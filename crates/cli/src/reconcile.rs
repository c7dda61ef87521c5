// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Reconciliation between the previously applied and the current
//! exclusion set.

use serde::Serialize;

use crate::exclusion::ExclusionSet;

/// Mutations needed to move the backup system from one exclusion set to
/// another. Both lists are sorted and disjoint.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct Diff {
    /// Paths to start excluding (`current - previous`).
    pub added: Vec<String>,
    /// Paths to stop excluding (`previous - current`).
    pub removed: Vec<String>,
}

impl Diff {
    pub fn is_empty(&self) -> bool {
        self.added.is_empty() && self.removed.is_empty()
    }
}

/// Compute the diff between `previous` and `current`.
pub fn diff(previous: &ExclusionSet, current: &ExclusionSet) -> Diff {
    Diff {
        added: current.difference(previous).map(str::to_string).collect(),
        removed: previous.difference(current).map(str::to_string).collect(),
    }
}

#[cfg(test)]
#[path = "reconcile_tests.rs"]
mod tests;
