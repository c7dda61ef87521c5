//! Test helpers for behavioral specifications.
//!
//! Every command runs against an isolated home directory, cache
//! directory and config file so the real user environment is never
//! touched.

#![allow(clippy::unwrap_used, clippy::expect_used, clippy::panic)]

pub use assert_cmd::prelude::*;
pub use predicates;
pub use predicates::prelude::PredicateBooleanExt;
use std::fs;
use std::path::{Path, PathBuf};
use std::process::Command;
use tempfile::TempDir;

/// Returns a Command configured to run the tmignore binary
pub fn tmignore_cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("tmignore"))
}

/// Isolated environment: fake home, cache dir and config file.
pub struct Sandbox {
    pub home: TempDir,
    pub state: TempDir,
}

#[allow(dead_code)] // KEEP UNTIL: every helper has a non-unix caller
impl Sandbox {
    pub fn new() -> Self {
        Self {
            home: TempDir::new().unwrap(),
            state: TempDir::new().unwrap(),
        }
    }

    pub fn home(&self) -> &Path {
        self.home.path()
    }

    pub fn cache_dir(&self) -> PathBuf {
        self.state.path().join("cache")
    }

    pub fn cache_file(&self) -> PathBuf {
        self.cache_dir().join("cache.json")
    }

    pub fn config_path(&self) -> PathBuf {
        self.state.path().join("config.toml")
    }

    pub fn write_config(&self, content: &str) {
        fs::write(self.config_path(), content).unwrap();
    }

    pub fn write_cache(&self, content: &str) {
        fs::create_dir_all(self.cache_dir()).unwrap();
        fs::write(self.cache_file(), content).unwrap();
    }

    /// A tmignore command wired to this sandbox.
    pub fn cmd(&self) -> Command {
        let mut cmd = tmignore_cmd();
        cmd.env("HOME", self.home())
            .env("TMIGNORE_CACHE_DIR", self.cache_dir())
            .env("TMIGNORE_CONFIG", self.config_path())
            .env_remove("TMIGNORE_LOG");
        cmd
    }
}
