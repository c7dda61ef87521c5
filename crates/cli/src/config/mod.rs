// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Configuration loading and resolution.
//!
//! `config.toml` is the primary format. `config.json` files written for
//! earlier versions (`ignoredPaths`, `whitelist`) are still accepted.

pub mod defaults;

use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::error::{Error, Result};
use crate::glob::GlobList;
use crate::tmutil::DEFAULT_TMUTIL;

/// User configuration as written in the config file.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Roots searched for repositories.
    #[serde(alias = "searchPaths")]
    pub search_paths: Vec<String>,

    /// Directories not descended into while searching (glob patterns).
    #[serde(alias = "ignoredPaths")]
    pub ignored_paths: Vec<String>,

    /// Paths that are never excluded, even when ignored by git.
    pub whitelist: Vec<String>,

    /// Path to the `tmutil` binary.
    pub tmutil: PathBuf,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            search_paths: defaults::search_paths(),
            ignored_paths: defaults::ignored_paths(),
            whitelist: defaults::whitelist(),
            tmutil: PathBuf::from(DEFAULT_TMUTIL),
        }
    }
}

/// Configuration with every path made absolute and patterns compiled.
#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub roots: Vec<PathBuf>,
    pub prune: GlobList,
    pub whitelist: GlobList,
    pub tmutil: PathBuf,
}

impl Config {
    /// Expand `~` and anchor relative search/prune paths at `home`.
    pub fn resolve(&self, home: &Path) -> ResolvedConfig {
        let roots = self
            .search_paths
            .iter()
            .map(|p| PathBuf::from(anchor(&expand_tilde(p, home), home)))
            .collect();
        let prune: Vec<String> = self
            .ignored_paths
            .iter()
            .map(|p| anchor(&expand_tilde(p, home), home))
            .collect();
        let whitelist: Vec<String> = self
            .whitelist
            .iter()
            .map(|p| expand_tilde(p, home))
            .collect();
        let tmutil = PathBuf::from(expand_tilde(&self.tmutil.to_string_lossy(), home));

        ResolvedConfig {
            roots,
            prune: GlobList::new(&prune),
            whitelist: GlobList::new(&whitelist),
            tmutil,
        }
    }
}

/// Keys understood in the config file (including legacy aliases).
const KNOWN_KEYS: &[&str] = &[
    "search_paths",
    "searchPaths",
    "ignored_paths",
    "ignoredPaths",
    "whitelist",
    "tmutil",
];

/// Parse config content. The format follows the file extension.
///
/// Unknown keys are reported as warnings rather than errors.
pub fn parse(content: &str, path: &Path) -> Result<Config> {
    let parse_error = |message: String| Error::ConfigParse {
        path: path.to_path_buf(),
        message,
    };
    let is_json = path.extension().is_some_and(|ext| ext == "json");

    let (config, keys): (Config, Vec<String>) = if is_json {
        let value: serde_json::Value =
            serde_json::from_str(content).map_err(|e| parse_error(e.to_string()))?;
        let keys: Vec<String> = value
            .as_object()
            .map(|obj| obj.keys().cloned().collect())
            .unwrap_or_default();
        let config: Config = serde_json::from_value(value).map_err(|e| parse_error(e.to_string()))?;
        (config, keys)
    } else {
        let table: toml::Table = toml::from_str(content).map_err(|e| parse_error(e.to_string()))?;
        let keys: Vec<String> = table.keys().cloned().collect();
        let config: Config = toml::Value::Table(table)
            .try_into()
            .map_err(|e: toml::de::Error| parse_error(e.to_string()))?;
        (config, keys)
    };

    for key in keys.iter().filter(|k| !KNOWN_KEYS.contains(&k.as_str())) {
        tracing::warn!("unknown config key {:?} in {}", key, path.display());
    }
    Ok(config)
}

/// Load and parse the config file at `path`.
pub fn load(path: &Path) -> Result<Config> {
    let content = std::fs::read_to_string(path).map_err(|source| Error::ConfigRead {
        path: path.to_path_buf(),
        source,
    })?;
    let config = parse(&content, path)?;
    tracing::debug!("loaded config from {}", path.display());
    Ok(config)
}

/// Load `path` if given, otherwise defaults.
pub fn load_or_default(path: Option<&Path>) -> Result<Config> {
    match path {
        Some(path) => load(path),
        None => {
            tracing::debug!("no config file found, using defaults");
            Ok(Config::default())
        }
    }
}

fn expand_tilde(path: &str, home: &Path) -> String {
    let home = home.to_string_lossy();
    let home = home.trim_end_matches('/');
    if path == "~" {
        home.to_string()
    } else if let Some(rest) = path.strip_prefix("~/") {
        format!("{home}/{rest}")
    } else {
        path.to_string()
    }
}

fn anchor(path: &str, home: &Path) -> String {
    if path.starts_with('/') {
        path.to_string()
    } else {
        format!("{}/{}", home.to_string_lossy().trim_end_matches('/'), path)
    }
}

#[cfg(test)]
#[path = "mod_tests.rs"]
mod tests;
