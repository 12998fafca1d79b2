mod cli;
mod logging;

use std::path::Path;
use std::process;

use anyhow::{Context, Result};
use birthday_calendars::config::Config;
use birthday_calendars::datasets;
use birthday_calendars::ingestion::LoadOptions;
use clap::Parser;

use crate::cli::Cli;

const DEFAULT_CONFIG: &str = "calendars.toml";

fn main() {
    let cli = Cli::parse();
    logging::init(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {e:#}");
        process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let (config_path, required) = match &cli.config {
        Some(path) => (path.as_path(), true),
        None => (Path::new(DEFAULT_CONFIG), false),
    };
    let mut config = Config::load(config_path, required)
        .with_context(|| format!("reading config {}", config_path.display()))?;

    if let Some(dir) = cli.data_dir {
        config.data_dir = dir;
    }
    if let Some(dir) = cli.out_dir {
        config.out_dir = dir;
    }
    if !cli.only.is_empty() {
        config.datasets = cli.only;
    }

    let written = datasets::generate_all(&config, &LoadOptions::traced())
        .with_context(|| format!("generating calendars from {}", config.data_dir.display()))?;
    for path in written {
        tracing::info!(path = %path.display(), "done");
    }
    Ok(())
}
