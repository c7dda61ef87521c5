// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Git utilities for listing ignored files.
//!
//! Ignore-file syntax is never interpreted here; git is the source of
//! truth for what is ignored (local `.gitignore`, `.git/info/exclude`
//! and the global excludes file).

use std::path::{Path, PathBuf};
use std::process::Command;

use crate::error::{ToolError, ToolErrorKind};

/// Lists the paths inside a repository that version control ignores.
pub trait IgnoredFileCollector: Sync {
    /// Absolute paths of ignored files and directories in `repository`.
    fn ignored_paths(&self, repository: &Path) -> Result<Vec<String>, ToolError>;
}

/// Collector that shells out to the `git` binary.
#[derive(Debug, Clone)]
pub struct GitCli {
    program: PathBuf,
}

impl GitCli {
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
        }
    }
}

impl Default for GitCli {
    fn default() -> Self {
        Self::new("git")
    }
}

impl IgnoredFileCollector for GitCli {
    fn ignored_paths(&self, repository: &Path) -> Result<Vec<String>, ToolError> {
        let repo = repository.to_str().ok_or_else(|| {
            ToolError::unknown(format!(
                "repository path is not valid UTF-8: {}",
                repository.display()
            ))
        })?;

        // --directory: list a wholly ignored directory, not its contents
        // --exclude-standard: also honor info/exclude and the global excludes file
        // -z: NUL separated, no quoting of unusual characters
        let output = Command::new(&self.program)
            .arg("-C")
            .arg(repository)
            .args([
                "ls-files",
                "--directory",
                "--exclude-standard",
                "--ignored",
                "--others",
                "-z",
            ])
            .output()
            .map_err(|e| ToolError::from_io(&e))?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr);
            return Err(classify_stderr(stderr.trim()));
        }

        Ok(parse_ls_files(repo, &output.stdout))
    }
}

/// Parse NUL-separated `git ls-files -z` output into absolute paths.
///
/// Trailing slashes on directory entries are dropped. Entries that are
/// not valid UTF-8 are skipped.
pub fn parse_ls_files(repository: &str, stdout: &[u8]) -> Vec<String> {
    let base = repository.trim_end_matches('/');
    let mut paths = Vec::new();
    for raw in stdout.split(|&b| b == 0) {
        if raw.is_empty() {
            continue;
        }
        match std::str::from_utf8(raw) {
            Ok(relative) => {
                let relative = relative.trim_end_matches('/');
                if !relative.is_empty() {
                    paths.push(format!("{base}/{relative}"));
                }
            }
            Err(_) => tracing::warn!(
                "skipping non UTF-8 ignored path in {}: {}",
                repository,
                String::from_utf8_lossy(raw)
            ),
        }
    }
    paths
}

fn classify_stderr(stderr: &str) -> ToolError {
    let lower = stderr.to_ascii_lowercase();
    let kind = if lower.contains("permission denied") || lower.contains("operation not permitted")
    {
        ToolErrorKind::PermissionDenied
    } else if lower.contains("not a git repository") || lower.contains("cannot change to") {
        ToolErrorKind::NotFound
    } else {
        ToolErrorKind::Unknown
    };
    ToolError::new(kind, stderr)
}

#[cfg(test)]
#[path = "git_tests.rs"]
mod tests;
