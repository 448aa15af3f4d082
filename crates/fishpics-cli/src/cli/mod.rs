//! CLI for the fishpics collector and normalizer.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use clap_complete::Shell;
use fishpics_core::config;
use std::path::PathBuf;

use commands::{run_completions, run_fetch, run_normalize, run_pipeline};

/// Top-level CLI for the fishpics collector.
#[derive(Debug, Parser)]
#[command(name = "fishpics")]
#[command(about = "fishpics: FishBase photo collector and thumbnail normalizer", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Walk the family index pages and download every referenced photo.
    Fetch {
        /// Walk family codes 0..N instead of the configured bound.
        #[arg(long, value_name = "N")]
        max_page: Option<u32>,

        /// Directory for raw downloads (created if absent).
        #[arg(long, value_name = "DIR")]
        output_dir: Option<PathBuf>,
    },

    /// Square and resize downloaded photos whose names fall in the
    /// configured range.
    Normalize {
        /// Lower lexical filename bound.
        #[arg(long, value_name = "NAME")]
        min_fam: Option<String>,

        /// Upper lexical filename bound.
        #[arg(long, value_name = "NAME")]
        max_fam: Option<String>,

        /// Directory of raw downloads to read.
        #[arg(long, value_name = "DIR")]
        raw_dir: Option<PathBuf>,

        /// Directory for normalized copies (created if absent).
        #[arg(long, value_name = "DIR")]
        resized_dir: Option<PathBuf>,
    },

    /// Run both stages back to back with the configured settings.
    Run,

    /// Print a shell completion script to stdout.
    Completions {
        /// Target shell.
        #[arg(value_enum)]
        shell: Shell,
    },
}

impl CliCommand {
    pub fn run_from_args() -> Result<()> {
        let cli = Cli::parse();

        // Load global config early; flags below override individual values
        // for this invocation only.
        let cfg = config::load_or_init()?;
        tracing::debug!("loaded config: {:?}", cfg);

        match cli.command {
            CliCommand::Fetch {
                max_page,
                output_dir,
            } => {
                let mut fetch_cfg = cfg.fetch;
                if let Some(n) = max_page {
                    fetch_cfg.max_page = n;
                }
                if let Some(dir) = output_dir {
                    fetch_cfg.output_dir = dir;
                }
                run_fetch(&fetch_cfg)?;
            }
            CliCommand::Normalize {
                min_fam,
                max_fam,
                raw_dir,
                resized_dir,
            } => {
                let mut norm_cfg = cfg.normalize;
                if let Some(bound) = min_fam {
                    norm_cfg.min_fam = bound;
                }
                if let Some(bound) = max_fam {
                    norm_cfg.max_fam = bound;
                }
                if let Some(dir) = resized_dir {
                    norm_cfg.resized_dir = dir;
                }
                let raw = raw_dir.unwrap_or_else(|| cfg.fetch.output_dir.clone());
                run_normalize(&norm_cfg, &raw)?;
            }
            CliCommand::Run => run_pipeline(&cfg)?,
            CliCommand::Completions { shell } => run_completions(shell),
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
