//! CLI for nixfetch.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use nixfetch_core::{config, Prefetcher};
use std::path::PathBuf;

use commands::{run_completions, run_gem, run_git, run_man, run_to_base32, run_url};

/// Top-level CLI for nixfetch.
#[derive(Debug, Parser)]
#[command(name = "nixfetch")]
#[command(about = "Prefetch sources and print their sha256 in Nix base32", long_about = None)]
pub struct Cli {
    /// Read configuration from this file instead of ~/.config/nixfetch/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Prefetch a git repository at a revision (keeps .git).
    Git {
        /// Repository URL or path.
        repo: String,
        /// Commit, tag or branch.
        rev: String,
        /// Also fetch submodules.
        #[arg(long)]
        submodules: bool,
    },

    /// Look up the sha256 a package registry publishes for a version.
    Gem {
        /// Package name.
        name: String,
        /// Exact version string.
        version: String,
    },

    /// Prefetch arbitrary URL content.
    Url {
        /// URL to download and hash.
        url: String,
    },

    /// Convert a base16 sha256 to Nix base32.
    ToBase32 {
        /// 64 lowercase hex characters.
        hash: String,
    },

    /// Print shell completions.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },

    /// Print the man page (roff).
    Man,
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // These don't touch the config or any tool.
        match cli.command {
            CliCommand::Completions { shell } => return run_completions(shell),
            CliCommand::Man => return run_man(),
            _ => {}
        }

        let cfg = match &cli.config {
            Some(path) => config::load_from(path)?,
            None => config::load_or_init()?,
        };
        tracing::debug!("loaded config: {:?}", cfg);
        let prefetcher = Prefetcher::new(cfg);

        match cli.command {
            CliCommand::Git {
                repo,
                rev,
                submodules,
            } => run_git(&prefetcher, &repo, &rev, submodules)?,
            CliCommand::Gem { name, version } => run_gem(&prefetcher, &name, &version)?,
            CliCommand::Url { url } => run_url(&prefetcher, &url)?,
            CliCommand::ToBase32 { hash } => run_to_base32(&prefetcher, &hash)?,
            CliCommand::Completions { .. } | CliCommand::Man => {}
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
