// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! tmignore - exclude version-control ignored files from backups.
//!
//! Finds git repositories, asks git which paths it ignores, and keeps
//! the backup system's exclusion list in sync with that set. The set
//! applied by the previous run is cached so each run only applies the
//! difference.

pub mod applier;
pub mod cache;
pub mod cli;
pub mod config;
pub mod discovery;
pub mod error;
pub mod exclusion;
pub mod git;
pub mod glob;
pub mod reconcile;
pub mod runner;
pub mod scanner;
pub mod tmutil;


pub use error::{Error, ExitCode, Result};
