// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Backup exclusion toggles.
//!
//! [`Tmutil`] drives macOS Time Machine through `tmutil addexclusion` /
//! `tmutil removeexclusion`. Implementations only classify failures;
//! deciding which ones matter is up to the applier.

use std::path::PathBuf;
use std::process::Command;

use crate::error::{ToolError, ToolErrorKind};

/// Default location of the Time Machine utility.
pub const DEFAULT_TMUTIL: &str = "/usr/bin/tmutil";

/// `tmutil` status for a path that does not exist or is not excluded.
const STATUS_PATH_NOT_FOUND: i32 = 213;

/// Marks and unmarks paths as excluded from backups.
pub trait ExclusionToggle {
    /// Exclude `paths` from future backups.
    fn add(&self, paths: &[String]) -> Result<(), ToolError>;

    /// Include `paths` in future backups again.
    ///
    /// Returns [`ToolErrorKind::AlreadyAbsent`] when a path was not excluded.
    fn remove(&self, paths: &[String]) -> Result<(), ToolError>;
}

/// Toggle backed by the `tmutil` binary.
#[derive(Debug, Clone)]
pub struct Tmutil {
    program: PathBuf,
}

impl Tmutil {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }

    fn exec(&self, action: Action, paths: &[String]) -> Result<(), ToolError> {
        let output = Command::new(&self.program)
            .arg(action.subcommand())
            .args(paths)
            .output()
            .map_err(|e| ToolError::from_io(&e))?;

        if output.status.success() {
            return Ok(());
        }
        let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
        Err(classify_status(action, output.status.code(), stderr))
    }
}

impl Default for Tmutil {
    fn default() -> Self {
        Self::new(DEFAULT_TMUTIL)
    }
}

impl ExclusionToggle for Tmutil {
    fn add(&self, paths: &[String]) -> Result<(), ToolError> {
        self.exec(Action::Add, paths)
    }

    fn remove(&self, paths: &[String]) -> Result<(), ToolError> {
        self.exec(Action::Remove, paths)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Action {
    Add,
    Remove,
}

impl Action {
    fn subcommand(self) -> &'static str {
        match self {
            Action::Add => "addexclusion",
            Action::Remove => "removeexclusion",
        }
    }
}

fn classify_status(action: Action, code: Option<i32>, stderr: String) -> ToolError {
    let kind = match (action, code) {
        // Cached exclusions whose files were since deleted land here.
        (Action::Remove, Some(STATUS_PATH_NOT_FOUND)) => ToolErrorKind::AlreadyAbsent,
        (Action::Add, Some(STATUS_PATH_NOT_FOUND)) => ToolErrorKind::NotFound,
        _ if stderr.contains("Operation not permitted") || stderr.contains("Permission denied") => {
            ToolErrorKind::PermissionDenied
        }
        _ => ToolErrorKind::Unknown,
    };
    let message = match code {
        Some(code) if stderr.is_empty() => format!("exit status {code}"),
        Some(code) => format!("exit status {code}: {stderr}"),
        None => format!("terminated by signal: {stderr}"),
    };
    ToolError::new(kind, message)
}

/// Toggle that only logs what it would do.
#[derive(Debug, Clone, Copy, Default)]
pub struct DryRun;

impl ExclusionToggle for DryRun {
    fn add(&self, paths: &[String]) -> Result<(), ToolError> {
        for path in paths {
            tracing::debug!("would exclude {}", path);
        }
        Ok(())
    }

    fn remove(&self, paths: &[String]) -> Result<(), ToolError> {
        for path in paths {
            tracing::debug!("would stop excluding {}", path);
        }
        Ok(())
    }
}

#[cfg(test)]
#[path = "tmutil_tests.rs"]
mod tests;
