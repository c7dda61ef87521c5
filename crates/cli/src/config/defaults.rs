// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! Centralized default values for configuration.
//!
//! Paths starting with `~` are expanded against the home directory
//! when the config is resolved.

/// Default search roots.
pub fn search_paths() -> Vec<String> {
    vec!["~".to_string()]
}

/// Directories that are never searched for repositories.
///
/// Large or system-managed trees that hold no working copies.
pub fn ignored_paths() -> Vec<String> {
    [
        "~/.Trash",
        "~/Applications",
        "~/Downloads",
        "~/Library",
        "~/Music/iTunes",
        "~/Music/Music",
        "~/Pictures/Photos Library.photoslibrary",
    ]
    .into_iter()
    .map(str::to_string)
    .collect()
}

/// Paths that are always backed up. Empty by default.
pub fn whitelist() -> Vec<String> {
    Vec::new()
}

/// Default config directory, relative to the home directory.
pub const CONFIG_DIR: &str = ".config/tmignore";

/// Config file names, in lookup order.
pub const CONFIG_FILES: &[&str] = &["config.toml", "config.json"];
