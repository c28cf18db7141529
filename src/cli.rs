use std::path::PathBuf;

use clap::{Parser, Subcommand};

/// wavematch reference-waveform detector.
#[derive(Parser)]
#[command(
    name = "wavematch",
    version,
    about = "Locate a reference waveform inside measured signals"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, global = true, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Subcommand to run.
    #[command(subcommand)]
    pub command: Command,
}

/// Available subcommands.
#[derive(Subcommand)]
pub enum Command {
    /// Scan every measured channel for the reference waveform.
    Detect(DetectArgs),
    /// List the supported wavelet families.
    Families,
}

/// Arguments for the `detect` subcommand.
#[derive(clap::Args)]
pub struct DetectArgs {
    /// Path to TOML configuration file.
    #[arg(short, long, default_value = "wavematch.toml")]
    pub config: PathBuf,

    /// Override the measurement CSV path from config.
    #[arg(short, long)]
    pub measurement: Option<PathBuf>,

    /// Override the reference CSV path from config.
    #[arg(short, long)]
    pub reference: Option<PathBuf>,

    /// Path for the JSON detection report.
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// Directory for per-channel score tables (one CSV per channel).
    #[arg(long)]
    pub scores: Option<PathBuf>,
}
