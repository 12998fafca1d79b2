//! Run configuration, read from an optional TOML file.
//!
//! ```toml
//! data_dir = "data"
//! out_dir = "dist"
//! datasets = ["sanrio", "sylvanian"]
//! ```

use std::fs;
use std::path::{Path, PathBuf};

use serde::Deserialize;

use crate::datasets::Dataset;
use crate::error::CalendarResult;

/// Where to read tables, where to write calendars, and which datasets to build.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct Config {
    /// Directory holding the input TSV files.
    #[serde(default = "default_data_dir")]
    pub data_dir: PathBuf,

    /// Directory receiving the `.ics` files; created when missing.
    #[serde(default = "default_out_dir")]
    pub out_dir: PathBuf,

    /// Datasets to build, in output order.
    #[serde(default = "default_datasets")]
    pub datasets: Vec<Dataset>,
}

fn default_data_dir() -> PathBuf {
    PathBuf::from("data")
}
fn default_out_dir() -> PathBuf {
    PathBuf::from("dist")
}
fn default_datasets() -> Vec<Dataset> {
    Dataset::all().to_vec()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            data_dir: default_data_dir(),
            out_dir: default_out_dir(),
            datasets: default_datasets(),
        }
    }
}

impl Config {
    pub fn from_toml_str(text: &str) -> CalendarResult<Self> {
        Ok(toml::from_str(text)?)
    }

    /// Read `path`. A missing file yields the defaults unless `required` is set.
    pub fn load(path: impl AsRef<Path>, required: bool) -> CalendarResult<Self> {
        let path = path.as_ref();
        if !required && !path.exists() {
            tracing::debug!(path = %path.display(), "no config file, using defaults");
            return Ok(Self::default());
        }
        let text = fs::read_to_string(path)?;
        Self::from_toml_str(&text)
    }
}

#[cfg(test)]
mod tests {
    use std::path::PathBuf;

    use super::Config;
    use crate::datasets::Dataset;
    use crate::error::CalendarError;

    #[test]
    fn empty_file_gives_defaults() {
        assert_eq!(Config::from_toml_str("").unwrap(), Config::default());
    }

    #[test]
    fn fields_override_defaults() {
        let cfg = Config::from_toml_str("out_dir = \"public\"\ndatasets = [\"sylvanian\"]\n").unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("data"));
        assert_eq!(cfg.out_dir, PathBuf::from("public"));
        assert_eq!(cfg.datasets, vec![Dataset::Sylvanian]);
    }

    #[test]
    fn unknown_fields_and_datasets_are_rejected() {
        assert!(matches!(
            Config::from_toml_str("outdir = \"x\"").unwrap_err(),
            CalendarError::Config(_)
        ));
        assert!(matches!(
            Config::from_toml_str("datasets = [\"mofusand\"]").unwrap_err(),
            CalendarError::Config(_)
        ));
    }

    #[test]
    fn missing_optional_file_uses_defaults() {
        let cfg = Config::load("definitely/not/here.toml", false).unwrap();
        assert_eq!(cfg, Config::default());
        assert!(matches!(
            Config::load("definitely/not/here.toml", true).unwrap_err(),
            CalendarError::Io(_)
        ));
    }
}
