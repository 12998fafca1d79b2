//! TSV loading implementation.

use std::collections::HashSet;
use std::path::Path;

use crate::error::{CalendarError, CalendarResult};
use crate::types::Record;

/// Reader settings shared by every table: tab-delimited, header row, no quoting.
///
/// Quoting is off because free-text cells (notes, favorites) may contain `"` literally.
/// Every row must have as many cells as the header; `csv` rejects any other length.
pub fn tsv_reader_builder() -> csv::ReaderBuilder {
    let mut builder = csv::ReaderBuilder::new();
    builder.delimiter(b'\t').has_headers(true).quoting(false);
    builder
}

/// Load a TSV file, applying `transform` to every row.
///
/// Rules:
///
/// - the first line holds the column names, and they must be unique;
/// - rows come back in file order;
/// - a row with more or fewer cells than the header is a [`CalendarError::Csv`] error;
/// - the first error (I/O, tokenizing, or from `transform`) aborts the load.
pub fn load_tsv_from_path<T, F>(path: impl AsRef<Path>, transform: F) -> CalendarResult<Vec<T>>
where
    F: FnMut(&Record) -> CalendarResult<T>,
{
    let mut rdr = tsv_reader_builder().from_path(path)?;
    load_tsv_from_reader(&mut rdr, transform)
}

/// Load TSV data from an existing reader.
pub fn load_tsv_from_reader<R, T, F>(rdr: &mut csv::Reader<R>, mut transform: F) -> CalendarResult<Vec<T>>
where
    R: std::io::Read,
    F: FnMut(&Record) -> CalendarResult<T>,
{
    let headers: Vec<String> = rdr.headers()?.iter().map(str::to_owned).collect();

    let mut seen = HashSet::with_capacity(headers.len());
    for name in &headers {
        if !seen.insert(name.as_str()) {
            return Err(CalendarError::SchemaMismatch {
                message: format!("duplicate column '{name}'. headers={headers:?}"),
            });
        }
    }

    let mut rows = Vec::new();
    for (row_idx0, result) in rdr.records().enumerate() {
        // 1-based for users, and the header is line 1.
        let user_row = row_idx0 + 2;
        let raw = result?;

        let cells = headers
            .iter()
            .zip(raw.iter())
            .map(|(name, value)| (name.clone(), value.to_owned()))
            .collect();
        let record = Record::new(user_row, cells);
        rows.push(transform(&record)?);
    }

    Ok(rows)
}

#[cfg(test)]
mod tests {
    use super::{load_tsv_from_reader, tsv_reader_builder};
    use crate::error::CalendarError;
    use crate::types::parse_optional;

    #[test]
    fn short_rows_are_rejected() {
        // BirthdayNote left out entirely: the month would otherwise shift into its column.
        let input = "SeriesKey\tCharaName\tSpecies\tBirthdayNote\tBirthMonth\tBirthDay\n\
                     KT\tキティ\tネコ\t11\t1\n";
        let mut rdr = tsv_reader_builder().from_reader(input.as_bytes());
        let err = load_tsv_from_reader(&mut rdr, |r| parse_optional::<u32>(r, "BirthMonth")).unwrap_err();

        match err {
            CalendarError::Csv(e) => assert!(matches!(e.kind(), csv::ErrorKind::UnequalLengths { .. })),
            other => panic!("expected csv error, got {other:?}"),
        }
    }

    #[test]
    fn long_rows_are_rejected() {
        let input = "Name\tBirthMonth\nKitty\t11\textra\n";
        let mut rdr = tsv_reader_builder().from_reader(input.as_bytes());
        let err = load_tsv_from_reader(&mut rdr, |r| Ok(r.string("Name"))).unwrap_err();
        assert!(matches!(err, CalendarError::Csv(_)));
    }

    #[test]
    fn blank_cells_are_kept_as_empty_strings() {
        let input = "Name\tBirthMonth\tBirthDay\nMimmy\t\t\n";
        let mut rdr = tsv_reader_builder().from_reader(input.as_bytes());
        let rows = load_tsv_from_reader(&mut rdr, |r| {
            Ok((r.string("Name"), r.string("BirthDay"), parse_optional::<u32>(r, "BirthMonth")?))
        })
        .unwrap();

        assert_eq!(rows, vec![("Mimmy".to_string(), String::new(), None)]);
    }

    #[test]
    fn double_quotes_are_literal() {
        let input = "Note\n\"quoted\" text\n";
        let mut rdr = tsv_reader_builder().from_reader(input.as_bytes());
        let rows = load_tsv_from_reader(&mut rdr, |r| Ok(r.string("Note"))).unwrap();
        assert_eq!(rows, vec!["\"quoted\" text".to_string()]);
    }

    #[test]
    fn record_row_numbers_count_the_header() {
        let input = "A\nx\ny\n";
        let mut rdr = tsv_reader_builder().from_reader(input.as_bytes());
        let rows = load_tsv_from_reader(&mut rdr, |r| Ok(r.row())).unwrap();
        assert_eq!(rows, vec![2, 3]);
    }
}
