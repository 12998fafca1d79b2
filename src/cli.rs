use std::path::PathBuf;

use birthday_calendars::datasets::Dataset;
use clap::Parser;

/// Build birthday calendars from character tables.
#[derive(Parser)]
#[command(
    name = "birthday-calendars",
    version,
    about = "Generate recurring birthday .ics files from TSV character tables"
)]
pub struct Cli {
    /// Increase verbosity (-v info, -vv debug, -vvv trace).
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Path to TOML configuration file. Optional unless given explicitly.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Override the input directory from config.
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Override the output directory from config.
    #[arg(short, long)]
    pub out_dir: Option<PathBuf>,

    /// Only build these datasets (repeatable).
    #[arg(long = "only")]
    pub only: Vec<Dataset>,
}
