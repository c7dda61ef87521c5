// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tmignore reset` command implementation.

use std::io::Write;

use tmignore::cli::{Cli, ResetArgs};
use tmignore::config::Config;
use tmignore::error::ExitCode;
use tmignore::runner::{Runner, RunnerConfig};
use tmignore::tmutil::{DryRun, ExclusionToggle, Tmutil};

/// Run the `tmignore reset` command.
pub fn run(cli: &Cli, args: &ResetArgs) -> anyhow::Result<ExitCode> {
    let home = crate::home_dir()?;
    // Only the tmutil location is needed here.
    let config = match crate::load_config(cli, &home) {
        Ok(config) => config,
        Err(e) => {
            tracing::warn!("{}; resetting with the default configuration", e);
            Config::default()
        }
    }
    .resolve(&home);
    let cache = crate::open_cache(cli)?;

    let tmutil = Tmutil::new(&config.tmutil);
    let toggle: &dyn ExclusionToggle = if args.dry_run { &DryRun } else { &tmutil };
    let runner = Runner::new(
        &cache,
        toggle,
        RunnerConfig {
            dry_run: args.dry_run,
            ..Default::default()
        },
    );

    if args.dry_run {
        let mut out = std::io::stdout().lock();
        for path in cache.read().iter() {
            writeln!(out, "- {path}")?;
        }
    }

    runner.reset(args.force)?;
    Ok(ExitCode::Success)
}
