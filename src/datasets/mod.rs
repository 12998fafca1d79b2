//! Per-dataset calendar assemblers and the run over all configured datasets.

pub mod sanrio;
pub mod sylvanian;

use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use serde::Deserialize;

use crate::calendar::BirthdayCalendar;
use crate::config::Config;
use crate::error::CalendarResult;
use crate::ingestion::LoadOptions;

/// The datasets this crate knows how to turn into calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Dataset {
    Sanrio,
    Sylvanian,
}

impl Dataset {
    /// All datasets, in output order.
    pub fn all() -> [Dataset; 2] {
        [Dataset::Sanrio, Dataset::Sylvanian]
    }

    pub fn name(self) -> &'static str {
        match self {
            Dataset::Sanrio => "sanrio",
            Dataset::Sylvanian => "sylvanian",
        }
    }

    /// File name of the generated calendar inside the output directory.
    pub fn output_file_name(self) -> String {
        format!("{}.ics", self.name())
    }
}

impl fmt::Display for Dataset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Dataset {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Dataset::all()
            .into_iter()
            .find(|d| d.name().eq_ignore_ascii_case(s))
            .ok_or_else(|| format!("unknown dataset '{s}' (expected sanrio or sylvanian)"))
    }
}

/// Input tables of one dataset: the character table and the table it is joined with.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatasetPaths {
    pub characters: PathBuf,
    pub related: PathBuf,
}

impl DatasetPaths {
    /// Standard file names of `dataset` inside `dir`.
    pub fn in_dir(dataset: Dataset, dir: impl AsRef<Path>) -> Self {
        let dir = dir.as_ref();
        let (characters, related) = match dataset {
            Dataset::Sanrio => ("sanrio.tsv", "sanrioSeries.tsv"),
            Dataset::Sylvanian => ("sylvanian.tsv", "sylvanianFamilyName.tsv"),
        };
        Self {
            characters: dir.join(characters),
            related: dir.join(related),
        }
    }
}

/// Load the tables of `dataset` and build its calendar.
pub fn build_calendar(
    dataset: Dataset,
    paths: &DatasetPaths,
    options: &LoadOptions,
) -> CalendarResult<BirthdayCalendar> {
    match dataset {
        Dataset::Sanrio => sanrio::create_calendar(&paths.characters, &paths.related, options),
        Dataset::Sylvanian => sylvanian::create_calendar(&paths.characters, &paths.related, options),
    }
}

/// Build and write every configured dataset's calendar.
///
/// The output directory is created when missing. Returns the written paths in dataset order;
/// the first failure aborts the run.
pub fn generate_all(config: &Config, options: &LoadOptions) -> CalendarResult<Vec<PathBuf>> {
    fs::create_dir_all(&config.out_dir)?;

    let mut written = Vec::with_capacity(config.datasets.len());
    for &dataset in &config.datasets {
        let paths = DatasetPaths::in_dir(dataset, &config.data_dir);
        let calendar = build_calendar(dataset, &paths, options)?;
        let out = config.out_dir.join(dataset.output_file_name());
        calendar.write_file(&out)?;
        written.push(out);
    }
    Ok(written)
}
