// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Shell-glob matching against full absolute paths.
//!
//! Matching is a flat string match: `*` and `?` also match `/`, so
//! `*.env` matches `/home/u/project/secrets.env`. Malformed patterns
//! never fail a run; they match nothing.

use std::borrow::Cow;

use globset::{Glob, GlobBuilder, GlobSet, GlobSetBuilder};

/// Compile a single pattern with fnmatch-like (flags = 0) semantics.
fn compile(pattern: &str) -> Result<Glob, globset::Error> {
    GlobBuilder::new(&collapse_stars(pattern))
        .literal_separator(false)
        .backslash_escape(true)
        .build()
}

/// Collapse runs of unescaped `*` into one, so `**` has no recursive
/// meaning and matches exactly what `*` matches.
fn collapse_stars(pattern: &str) -> Cow<'_, str> {
    if !pattern.contains("**") {
        return Cow::Borrowed(pattern);
    }
    let mut out = String::with_capacity(pattern.len());
    let mut chars = pattern.chars();
    let mut after_star = false;
    while let Some(c) = chars.next() {
        match c {
            '\\' => {
                out.push(c);
                if let Some(escaped) = chars.next() {
                    out.push(escaped);
                }
                after_star = false;
            }
            '*' if after_star => {}
            '*' => {
                out.push(c);
                after_star = true;
            }
            _ => {
                out.push(c);
                after_star = false;
            }
        }
    }
    Cow::Owned(out)
}

/// Test `path` against a single glob `pattern`.
pub fn matches(pattern: &str, path: &str) -> bool {
    match compile(pattern) {
        Ok(glob) => glob.compile_matcher().is_match(path),
        Err(_) => false,
    }
}

/// A compiled list of patterns with "any pattern matches" semantics.
#[derive(Debug, Clone)]
pub struct GlobList {
    patterns: Vec<String>,
    set: GlobSet,
}

impl GlobList {
    /// Compile `patterns`, skipping (and logging) invalid ones.
    pub fn new(patterns: &[String]) -> Self {
        let mut builder = GlobSetBuilder::new();
        let mut kept = Vec::with_capacity(patterns.len());
        for pattern in patterns {
            match compile(pattern) {
                Ok(glob) => {
                    builder.add(glob);
                    kept.push(pattern.clone());
                }
                Err(e) => tracing::warn!("invalid glob pattern {:?}: {}", pattern, e),
            }
        }
        match builder.build() {
            Ok(set) => Self {
                patterns: kept,
                set,
            },
            Err(e) => {
                tracing::warn!("failed to compile glob patterns: {}", e);
                Self::empty()
            }
        }
    }

    pub fn empty() -> Self {
        Self {
            patterns: Vec::new(),
            set: GlobSet::empty(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.patterns.is_empty()
    }

    /// Whether any pattern matches `path`.
    pub fn is_match(&self, path: &str) -> bool {
        !self.is_empty() && self.set.is_match(path)
    }

    /// First pattern (in configured order) matching `path`.
    pub fn first_match(&self, path: &str) -> Option<&str> {
        if self.is_empty() {
            return None;
        }
        self.set
            .matches(path)
            .into_iter()
            .min()
            .and_then(|i| self.patterns.get(i))
            .map(String::as_str)
    }
}

impl Default for GlobList {
    fn default() -> Self {
        Self::empty()
    }
}

#[cfg(test)]
#[path = "glob_tests.rs"]
mod tests;
