use thiserror::Error;

/// Convenience result type for loading, assembling and writing calendars.
pub type CalendarResult<T> = Result<T, CalendarError>;

/// Error type returned across the crate.
///
/// Loading, configuration and serialization failures all funnel into this one enum so callers
/// can abort a run with a single `?`.
#[derive(Debug, Error)]
pub enum CalendarError {
    /// Underlying I/O error (e.g. file not found, permission denied).
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// TSV read error.
    #[error("tsv error: {0}")]
    Csv(#[from] csv::Error),

    /// The configuration file could not be parsed.
    #[error("config error: {0}")]
    Config(#[from] toml::de::Error),

    /// The table does not have the expected shape (missing or duplicated columns, etc.).
    #[error("schema mismatch: {message}")]
    SchemaMismatch { message: String },

    /// A cell could not be parsed into the type the row transform asked for.
    #[error("failed to parse value at row {row} column '{column}': {message} (raw='{raw}')")]
    ParseError {
        row: usize,
        column: String,
        raw: String,
        message: String,
    },

    /// A birthday entry does not name a real calendar date.
    #[error("invalid date {year:04}-{month:02}-{day:02} for '{summary}'")]
    InvalidDate {
        summary: String,
        year: i32,
        month: u32,
        day: u32,
    },
}

#[cfg(test)]
mod tests {
    use super::CalendarError;

    #[test]
    fn invalid_date_message_is_zero_padded() {
        let err = CalendarError::InvalidDate {
            summary: "KT".to_string(),
            year: 1974,
            month: 4,
            day: 31,
        };
        assert_eq!(err.to_string(), "invalid date 1974-04-31 for 'KT'");
    }

    #[test]
    fn parse_error_names_row_and_column() {
        let err = CalendarError::ParseError {
            row: 3,
            column: "BirthMonth".to_string(),
            raw: "x".to_string(),
            message: "invalid digit found in string".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("row 3"));
        assert!(msg.contains("column 'BirthMonth'"));
        assert!(msg.contains("raw='x'"));
    }
}
