// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Error types and exit codes.

use std::fmt;
use std::path::PathBuf;

/// Exit codes for the tmignore binary.
///
/// Partial failures (one repository, one chunk) still exit with `Success`;
/// the tool converges over repeated runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum ExitCode {
    /// Run completed, possibly with logged partial failures.
    Success = 0,
    /// Bookkeeping failed: cache not written, or reset left exclusions behind.
    StateError = 1,
    /// Configuration could not be loaded.
    ConfigError = 2,
    /// Nothing could be scanned or an unexpected failure occurred.
    InternalError = 3,
}

impl From<ExitCode> for std::process::ExitCode {
    fn from(code: ExitCode) -> Self {
        std::process::ExitCode::from(code as u8)
    }
}

/// Crate-level error.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("failed to read config {}: {source}", path.display())]
    ConfigRead {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("invalid config {}: {message}", path.display())]
    ConfigParse { path: PathBuf, message: String },

    #[error("could not determine home directory")]
    NoHomeDirectory,

    #[error("cache {}: {source}", path.display())]
    Cache {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to encode cache record: {0}")]
    CacheEncode(#[from] serde_json::Error),

    #[error("no search path could be scanned ({failed} failed)")]
    ScanUnavailable { failed: usize },

    #[error("reset incomplete: {failed} exclusion(s) could not be removed, cache kept")]
    ResetIncomplete { failed: usize },
}

impl Error {
    /// Exit code this error maps to when it reaches `main`.
    pub fn exit_code(&self) -> ExitCode {
        match self {
            Error::ConfigRead { .. } | Error::ConfigParse { .. } | Error::NoHomeDirectory => {
                ExitCode::ConfigError
            }
            Error::Cache { .. } | Error::CacheEncode(_) | Error::ResetIncomplete { .. } => {
                ExitCode::StateError
            }
            Error::ScanUnavailable { .. } => ExitCode::InternalError,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;

/// Classification of a collaborator failure.
///
/// Transport code (subprocess wrappers) only classifies; policy code
/// decides which kinds to swallow.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ToolErrorKind {
    NotFound,
    PermissionDenied,
    /// Removal of a path that is not currently excluded.
    AlreadyAbsent,
    Unknown,
}

/// Failure reported by an external collaborator (git, tmutil, the walker).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ToolError {
    pub kind: ToolErrorKind,
    pub message: String,
}

impl ToolError {
    pub fn new(kind: ToolErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }

    pub fn unknown(message: impl Into<String>) -> Self {
        Self::new(ToolErrorKind::Unknown, message)
    }

    /// Classify a spawn or filesystem error.
    pub fn from_io(err: &std::io::Error) -> Self {
        let kind = match err.kind() {
            std::io::ErrorKind::NotFound => ToolErrorKind::NotFound,
            std::io::ErrorKind::PermissionDenied => ToolErrorKind::PermissionDenied,
            _ => ToolErrorKind::Unknown,
        };
        Self::new(kind, err.to_string())
    }
}

impl fmt::Display for ToolError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let kind = match self.kind {
            ToolErrorKind::NotFound => "not found",
            ToolErrorKind::PermissionDenied => "permission denied",
            ToolErrorKind::AlreadyAbsent => "already absent",
            ToolErrorKind::Unknown => "failed",
        };
        if self.message.is_empty() {
            write!(f, "{kind}")
        } else {
            write!(f, "{kind}: {}", self.message)
        }
    }
}

impl std::error::Error for ToolError {}

#[cfg(test)]
#[path = "error_tests.rs"]
mod tests;
