// SPDX-License-Identifier: MIT
// Copyright (c) 2026 Alfred Jean LLC

mod cmd_list;
mod cmd_reset;
mod cmd_run;

use std::path::PathBuf;

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use tmignore::cache::Cache;
use tmignore::cli::{Cli, Command, RunArgs};
use tmignore::config::{self, Config};
use tmignore::discovery;
use tmignore::error::{Error, ExitCode};

fn main() -> std::process::ExitCode {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match dispatch(&cli) {
        Ok(code) => code.into(),
        Err(e) => {
            let code = e
                .downcast_ref::<Error>()
                .map(Error::exit_code)
                .unwrap_or(ExitCode::InternalError);
            tracing::error!("{:#}", e);
            code.into()
        }
    }
}

fn dispatch(cli: &Cli) -> anyhow::Result<ExitCode> {
    match &cli.command {
        None => cmd_run::run(cli, &RunArgs::default()),
        Some(Command::Run(args)) => cmd_run::run(cli, args),
        Some(Command::List(args)) => cmd_list::run(cli, args),
        Some(Command::Reset(args)) => cmd_reset::run(cli, args),
        Some(Command::Completions(args)) => {
            clap_complete::generate(
                args.shell,
                &mut Cli::command(),
                "tmignore",
                &mut std::io::stdout(),
            );
            Ok(ExitCode::Success)
        }
    }
}

/// Logs go to stderr; `TMIGNORE_LOG` overrides the level chosen by `-v`.
fn init_logging(verbose: bool) {
    let default = if verbose { "debug" } else { "info" };
    let filter =
        EnvFilter::try_from_env("TMIGNORE_LOG").unwrap_or_else(|_| EnvFilter::new(default));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn home_dir() -> Result<PathBuf, Error> {
    dirs::home_dir().ok_or(Error::NoHomeDirectory)
}

/// Load the config named on the command line, or the discovered one.
fn load_config(cli: &Cli, home: &std::path::Path) -> Result<Config, Error> {
    let path = cli
        .config
        .clone()
        .or_else(|| discovery::find_config(home));
    config::load_or_default(path.as_deref())
}

fn open_cache(cli: &Cli) -> Result<Cache, Error> {
    cli.cache_dir
        .clone()
        .or_else(Cache::default_dir)
        .map(Cache::new)
        .ok_or(Error::NoHomeDirectory)
}
