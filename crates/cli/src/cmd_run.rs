// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tmignore run` command implementation.

use std::io::Write;

use tmignore::cli::{Cli, RunArgs};
use tmignore::error::ExitCode;
use tmignore::exclusion::ExclusionSetBuilder;
use tmignore::git::GitCli;
use tmignore::runner::{Runner, RunnerConfig};
use tmignore::scanner::WalkScanner;
use tmignore::tmutil::{DryRun, ExclusionToggle, Tmutil};

/// Run the `tmignore run` command.
pub fn run(cli: &Cli, args: &RunArgs) -> anyhow::Result<ExitCode> {
    let home = crate::home_dir()?;
    // Config errors are fatal before anything is touched.
    let config = crate::load_config(cli, &home)?.resolve(&home);
    let cache = crate::open_cache(cli)?;

    let scanner = WalkScanner::default();
    let collector = GitCli::default();
    let builder = ExclusionSetBuilder::new(&scanner, &collector);

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

    let summary = runner.run(&builder, &config)?;

    if args.dry_run {
        let mut out = std::io::stdout().lock();
        for path in &summary.diff.added {
            writeln!(out, "+ {path}")?;
        }
        for path in &summary.diff.removed {
            writeln!(out, "- {path}")?;
        }
    }

    Ok(ExitCode::Success)
}
