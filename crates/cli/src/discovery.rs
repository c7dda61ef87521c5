// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Config file discovery.
//!
//! Looks in `~/.config/tmignore/` for `config.toml`, then `config.json`.

use std::path::{Path, PathBuf};

use crate::config::defaults::{CONFIG_DIR, CONFIG_FILES};

/// Default config directory for `home`.
pub fn config_dir(home: &Path) -> PathBuf {
    home.join(CONFIG_DIR)
}

/// Find the config file for `home`, if one exists.
pub fn find_config(home: &Path) -> Option<PathBuf> {
    let dir = config_dir(home);
    CONFIG_FILES
        .iter()
        .map(|name| dir.join(name))
        .find(|path| path.is_file())
}

#[cfg(test)]
#[path = "discovery_tests.rs"]
mod tests;
