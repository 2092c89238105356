//! CLI for the phishscan URL classifier.

mod commands;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use phishscan_core::classifier::LinearClassifier;
use phishscan_core::config::{self, ScanConfig};
use phishscan_core::scan::Scanner;
use std::path::PathBuf;

use commands::{run_features, run_scan};

/// Top-level CLI for phishscan.
#[derive(Debug, Parser)]
#[command(name = "phishscan")]
#[command(about = "Phishscan: heuristic phishing URL classifier", long_about = None)]
pub struct Cli {
    /// Read settings from this file instead of the XDG config.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Scan a URL and print the verdict.
    Scan {
        /// Full URL including a path, e.g. https://example.com/login.
        url: String,
        /// Print the full report as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Print the 30 feature signals for a URL without classifying it.
    Features {
        /// Full URL including a path.
        url: String,
        /// Print the vector as JSON.
        #[arg(long)]
        json: bool,
    },
}

fn load_config(path: Option<&PathBuf>) -> Result<ScanConfig> {
    match path {
        Some(p) => config::load_from(p),
        None => config::load_or_init(),
    }
}

/// The configured model, or the built-in uniform one.
fn load_classifier(cfg: &ScanConfig) -> Result<LinearClassifier> {
    match &cfg.model_path {
        Some(path) => LinearClassifier::from_path(path)
            .with_context(|| format!("load model {}", path.display())),
        None => Ok(LinearClassifier::uniform()),
    }
}

pub(crate) const BUILTIN_MODEL_NOTE: &str =
    "Note: no model_path configured; the verdict is a majority vote of the signals, not a trained prediction.";

/// Shown before a verdict from the built-in model. Goes to stderr so `--json` stays parseable.
fn model_note(cfg: &ScanConfig) -> Option<&'static str> {
    cfg.model_path.is_none().then_some(BUILTIN_MODEL_NOTE)
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = load_config(cli.config.as_ref())?;
        tracing::debug!("loaded config: {:?}", cfg);
        let scanner = Scanner::live(&cfg, load_classifier(&cfg)?);

        match cli.command {
            CliCommand::Scan { url, json } => {
                if let Some(note) = model_note(&cfg) {
                    eprintln!("{note}");
                }
                run_scan(&scanner, &url, json).await?;
            }
            CliCommand::Features { url, json } => run_features(&scanner, &url, json).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
