//! sui-replay-inspect: interpret Sui transaction replay results
//!
//! Reads the JSON a replayer emits after re-executing a transaction and
//! prints what happened: execution status, gas costs in SUI, gas meter
//! figures, inputs, commands and object changes.
//!
//! ## Example Usage
//!
//! ```bash
//! # Text report for one replay
//! sui-replay-inspect replay.json
//!
//! # JSON for a directory of replays, four worker threads
//! sui-replay-inspect --json --threads 4 replays/*.json
//!
//! # Amounts in MIST instead of SUI
//! sui-replay-inspect --decimals 0 --unit MIST replay.json
//! ```
//!
//! Defaults come from `SUI_REPLAY_DECIMALS`, `SUI_REPLAY_UNIT`,
//! `SUI_REPLAY_THREADS` and `SUI_REPLAY_JSON`; flags override them.

use std::io::IsTerminal;
use std::path::PathBuf;

use anyhow::{bail, Result};
use clap::Parser;
use tracing::debug;

mod inspect_cli;

use inspect_cli::output::{format_report, format_reports_json, FileReport};
use sui_replay_core::{inspect_documents, InspectConfig, TextOptions};

#[derive(Parser)]
#[command(
    name = "sui-replay-inspect",
    author,
    version,
    about = "Interpret Sui transaction replay results",
    long_about = "Decodes replayed transaction effects (V1 and V2), builds gas reports,\n\
                  and summarizes inputs and commands of Sui replay result JSON files."
)]
struct Cli {
    /// Replay result JSON files
    #[arg(required = true)]
    files: Vec<PathBuf>,

    /// Output as JSON instead of human-readable format
    #[arg(long)]
    json: bool,

    /// Worker threads for inspecting several files (default: one per core)
    #[arg(long)]
    threads: Option<usize>,

    /// Decimal places of the display unit (default: 9, MIST → SUI)
    #[arg(long)]
    decimals: Option<u32>,

    /// Unit label printed next to converted amounts (default: SUI)
    #[arg(long)]
    unit: Option<String>,

    /// Disable ANSI colors
    #[arg(long)]
    no_color: bool,

    /// Fail when any section of any replay could not be interpreted
    #[arg(long)]
    strict: bool,

    /// Verbose output (resolved argument values, shared objects, debug logs)
    #[arg(long, short)]
    verbose: bool,
}

impl Cli {
    fn config(&self) -> InspectConfig {
        let mut config = InspectConfig::from_env();
        if let Some(decimals) = self.decimals {
            config = config.with_decimal_places(decimals);
        }
        if let Some(unit) = &self.unit {
            config = config.with_unit(unit.clone());
        }
        if let Some(threads) = self.threads {
            config = config.with_threads(threads);
        }
        if self.json {
            config = config.with_json(true);
        }
        config
    }
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    inspect_cli::init_tracing(cli.verbose);

    let config = cli.config();
    debug!(?config, files = cli.files.len(), "starting inspection");

    let documents = inspect_cli::read_documents(&cli.files)?;
    let results = inspect_documents(&documents, &config);

    if config.json {
        let reports: Vec<FileReport<'_>> = cli
            .files
            .iter()
            .zip(&results)
            .map(|(path, result)| FileReport::new(path, result))
            .collect();
        println!("{}", format_reports_json(&reports));
    } else {
        let color = !cli.no_color && std::io::stdout().is_terminal();
        let options = TextOptions::from_config(&config)
            .with_color(color)
            .with_verbose(cli.verbose);
        let with_header = cli.files.len() > 1;
        for (path, result) in cli.files.iter().zip(&results) {
            print!("{}", format_report(path, result, &options, with_header));
        }
    }

    let failed = results.iter().filter(|r| r.is_err()).count();
    if failed > 0 {
        bail!(
            "{} of {} replay file(s) could not be interpreted",
            failed,
            results.len()
        );
    }
    if cli.strict {
        let incomplete = results
            .iter()
            .flatten()
            .filter(|overview| !overview.is_complete())
            .count();
        if incomplete > 0 {
            bail!(
                "{} replay(s) have sections that could not be interpreted",
                incomplete
            );
        }
    }
    Ok(())
}
