// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

//! `tmignore list` command implementation.

use std::io::Write;

use tmignore::cli::{Cli, ListArgs, OutputFormat};
use tmignore::error::ExitCode;
use tmignore::runner::{Runner, RunnerConfig};
use tmignore::tmutil::DryRun;

/// Run the `tmignore list` command.
pub fn run(cli: &Cli, args: &ListArgs) -> anyhow::Result<ExitCode> {
    let cache = crate::open_cache(cli)?;
    let record = Runner::new(&cache, &DryRun, RunnerConfig::default()).list();

    let mut out = std::io::stdout().lock();
    match args.output {
        OutputFormat::Text => {
            for path in record.paths.iter() {
                writeln!(out, "{path}")?;
            }
        }
        OutputFormat::Json => {
            serde_json::to_writer_pretty(&mut out, &record)?;
            writeln!(out)?;
        }
    }

    tracing::info!("{} paths excluded by tmignore", record.paths.len());
    Ok(ExitCode::Success)
}
