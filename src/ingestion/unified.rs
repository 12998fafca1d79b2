//! Table loading entrypoint.
//!
//! Most callers should use [`load_table`], which loads a TSV file into typed rows, checks the
//! header for the columns the transform relies on, and reports the outcome to an optional
//! [`super::observability::LoadObserver`].

use std::error::Error as StdError;
use std::fmt;
use std::path::Path;
use std::sync::Arc;

use crate::error::{CalendarError, CalendarResult};
use crate::types::Record;

use super::observability::{LoadContext, LoadObserver, LoadSeverity, LoadStats, TracingObserver};
use super::tsv;

/// Options controlling [`load_table`].
///
/// Use [`Default`] for common cases.
#[derive(Clone)]
pub struct LoadOptions {
    /// Columns that must appear in the header row.
    pub required_columns: Vec<String>,
    /// Optional observer for logging/alerts.
    pub observer: Option<Arc<dyn LoadObserver>>,
    /// Severity threshold at which `on_alert` is invoked.
    pub alert_at_or_above: LoadSeverity,
}

impl fmt::Debug for LoadOptions {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoadOptions")
            .field("required_columns", &self.required_columns)
            .field("observer_set", &self.observer.is_some())
            .field("alert_at_or_above", &self.alert_at_or_above)
            .finish()
    }
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            required_columns: Vec::new(),
            observer: None,
            alert_at_or_above: LoadSeverity::Critical,
        }
    }
}

impl LoadOptions {
    /// Options that report through [`TracingObserver`].
    pub fn traced() -> Self {
        Self {
            observer: Some(Arc::new(TracingObserver)),
            ..Default::default()
        }
    }

    /// Copy of these options requiring `columns` in the header.
    pub fn requiring(&self, columns: &[&str]) -> Self {
        Self {
            required_columns: columns.iter().map(|c| (*c).to_owned()).collect(),
            ..self.clone()
        }
    }
}

/// Load a TSV table at `path`, mapping each row through `transform`.
///
/// When an observer is configured, this function reports:
///
/// - `on_success` on success, with row count stats
/// - `on_failure` on failure, with a computed severity
/// - `on_alert` on failure when the computed severity is >= `options.alert_at_or_above`
///
/// ```no_run
/// use birthday_calendars::ingestion::{load_table, LoadOptions};
/// use birthday_calendars::types::parse_optional;
///
/// # fn main() -> Result<(), birthday_calendars::CalendarError> {
/// let opts = LoadOptions::traced().requiring(&["Name", "BirthMonth"]);
/// let rows = load_table("data/people.tsv", &opts, |r| {
///     Ok((r.string("Name"), parse_optional::<u32>(r, "BirthMonth")?))
/// })?;
/// println!("rows={}", rows.len());
/// # Ok(())
/// # }
/// ```
pub fn load_table<T, F>(path: impl AsRef<Path>, options: &LoadOptions, transform: F) -> CalendarResult<Vec<T>>
where
    F: FnMut(&Record) -> CalendarResult<T>,
{
    let path = path.as_ref();
    let ctx = LoadContext {
        path: path.to_path_buf(),
    };

    let result = load_checked(path, &options.required_columns, transform);

    if let Some(obs) = options.observer.as_ref() {
        match &result {
            Ok(rows) => obs.on_success(&ctx, LoadStats { rows: rows.len() }),
            Err(e) => {
                let sev = severity_for_error(e);
                obs.on_failure(&ctx, sev, e);
                if sev >= options.alert_at_or_above {
                    obs.on_alert(&ctx, sev, e);
                }
            }
        }
    }

    result
}

fn load_checked<T, F>(path: &Path, required: &[String], transform: F) -> CalendarResult<Vec<T>>
where
    F: FnMut(&Record) -> CalendarResult<T>,
{
    let mut rdr = tsv::tsv_reader_builder().from_path(path)?;
    let headers = rdr.headers()?.clone();
    for column in required {
        if !headers.iter().any(|h| h == column) {
            return Err(CalendarError::SchemaMismatch {
                message: format!(
                    "missing required column '{column}' in {}. headers={:?}",
                    path.display(),
                    headers.iter().collect::<Vec<_>>()
                ),
            });
        }
    }
    tsv::load_tsv_from_reader(&mut rdr, transform)
}

fn severity_for_error(e: &CalendarError) -> LoadSeverity {
    match e {
        CalendarError::Io(_) => LoadSeverity::Critical,
        CalendarError::Csv(err) => match err.kind() {
            ::csv::ErrorKind::Io(_) => LoadSeverity::Critical,
            _ if error_chain_contains_io(err) => LoadSeverity::Critical,
            _ => LoadSeverity::Error,
        },
        CalendarError::Config(_)
        | CalendarError::SchemaMismatch { .. }
        | CalendarError::ParseError { .. }
        | CalendarError::InvalidDate { .. } => LoadSeverity::Error,
    }
}

fn error_chain_contains_io(e: &(dyn StdError + 'static)) -> bool {
    let mut cur: Option<&(dyn StdError + 'static)> = Some(e);
    while let Some(err) = cur {
        if err.is::<std::io::Error>() {
            return true;
        }
        cur = err.source();
    }
    false
}
