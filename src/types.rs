//! Core data model types for loading.
//!
//! A TSV line is read into a [`Record`] (column name → raw string) and handed to a caller
//! transform, which turns it into whatever typed row the dataset needs. The `parse_*` helpers
//! cover the common "empty cell means absent" convention of the input tables.

use std::fmt;
use std::str::FromStr;

use crate::error::{CalendarError, CalendarResult};

/// One raw table row: ordered `(column, value)` pairs.
///
/// Blank cells are stored as empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record {
    row: usize,
    cells: Vec<(String, String)>,
}

impl Record {
    /// Create a record. `row` is the 1-based line number in the source file (header = 1).
    pub fn new(row: usize, cells: Vec<(String, String)>) -> Self {
        Self { row, cells }
    }

    /// Line number used in error messages.
    pub fn row(&self) -> usize {
        self.row
    }

    /// Returns the raw value of `column`, if the table has that column.
    pub fn get(&self, column: &str) -> Option<&str> {
        self.cells
            .iter()
            .find(|(name, _)| name == column)
            .map(|(_, value)| value.as_str())
    }

    /// Returns the raw value of `column`, or `""` when the column is absent.
    pub fn value(&self, column: &str) -> &str {
        self.get(column).unwrap_or("")
    }

    /// Owned copy of [`Self::value`].
    pub fn string(&self, column: &str) -> String {
        self.value(column).to_owned()
    }

    /// Iterate column names in header order.
    pub fn columns(&self) -> impl Iterator<Item = &str> {
        self.cells.iter().map(|(name, _)| name.as_str())
    }

    /// Number of cells.
    pub fn len(&self) -> usize {
        self.cells.len()
    }

    /// Returns `true` if the record has no cells.
    pub fn is_empty(&self) -> bool {
        self.cells.is_empty()
    }
}

/// Parse `column` into `T`, treating an empty (or whitespace-only) cell as `None`.
///
/// A non-empty cell that does not parse is a [`CalendarError::ParseError`].
pub fn parse_optional<T>(record: &Record, column: &str) -> CalendarResult<Option<T>>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = record.value(column);
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return Ok(None);
    }
    trimmed
        .parse::<T>()
        .map(Some)
        .map_err(|e| CalendarError::ParseError {
            row: record.row(),
            column: column.to_owned(),
            raw: raw.to_owned(),
            message: e.to_string(),
        })
}

/// Parse `column` into `T`; an empty cell is an error.
pub fn parse_required<T>(record: &Record, column: &str) -> CalendarResult<T>
where
    T: FromStr,
    T::Err: fmt::Display,
{
    parse_optional(record, column)?.ok_or_else(|| CalendarError::ParseError {
        row: record.row(),
        column: column.to_owned(),
        raw: String::new(),
        message: "value is required".to_string(),
    })
}

/// A month/day pair, known only when both parts are present.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct BirthDate {
    /// Month, 1..=12.
    pub month: u32,
    /// Day of month, 1..=31.
    pub day: u32,
}

impl BirthDate {
    /// Combine optional parts; `None` unless both are present.
    pub fn from_parts(month: Option<u32>, day: Option<u32>) -> Option<Self> {
        Some(Self {
            month: month?,
            day: day?,
        })
    }
}

/// Render a possibly-incomplete birthday as `M/D`, using `?` for unknown parts.
pub fn format_month_day(month: Option<u32>, day: Option<u32>) -> String {
    fn part(v: Option<u32>) -> String {
        v.map(|v| v.to_string()).unwrap_or_else(|| "?".to_string())
    }
    format!("{}/{}", part(month), part(day))
}
