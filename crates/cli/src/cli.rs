//! CLI argument parsing with clap derive.

use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// Exclude development files ignored by git from Time Machine backups
#[derive(Parser)]
#[command(name = "tmignore")]
#[command(version, about, long_about = None)]
#[command(propagate_version = true)]
pub struct Cli {
    /// Use specific config file
    #[arg(short = 'C', long = "config", global = true, env = "TMIGNORE_CONFIG")]
    pub config: Option<PathBuf>,

    /// Directory holding the exclusion cache
    #[arg(long, global = true, env = "TMIGNORE_CACHE_DIR", value_name = "DIR")]
    pub cache_dir: Option<PathBuf>,

    /// Enable verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Option<Command>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Update backup exclusions (default)
    Run(RunArgs),
    /// List paths currently excluded by tmignore
    List(ListArgs),
    /// Remove every exclusion added by tmignore and delete the cache
    Reset(ResetArgs),
    /// Print a shell completion script
    Completions(CompletionsArgs),
}

#[derive(clap::Args, Default)]
pub struct RunArgs {
    /// Print changes without applying them or updating the cache
    #[arg(long)]
    pub dry_run: bool,
}

#[derive(clap::Args)]
pub struct ListArgs {
    /// Output format
    #[arg(short, long, default_value = "text")]
    pub output: OutputFormat,
}

#[derive(clap::Args)]
pub struct ResetArgs {
    /// Print exclusions that would be removed without removing them
    #[arg(long)]
    pub dry_run: bool,

    /// Delete the cache even if some exclusions could not be removed
    #[arg(long)]
    pub force: bool,
}

#[derive(clap::Args)]
pub struct CompletionsArgs {
    /// Target shell
    #[arg(value_enum)]
    pub shell: clap_complete::Shell,
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[cfg(test)]
#[path = "cli_tests.rs"]
mod tests;
