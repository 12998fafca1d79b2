//! Sanrio characters, grouped by series.
//!
//! Every series contributes one event per distinct birthday; characters of a series that share a
//! birthday (e.g. twins) share the event. Events start in the series' release year.

use std::path::Path;

use crate::calendar::{BirthdayCalendar, BirthdayOptions};
use crate::error::CalendarResult;
use crate::ingestion::{LoadOptions, load_table};
use crate::processing::{Joined, group_by, left_join};
use crate::types::{BirthDate, Record, format_month_day, parse_optional};

pub const CALENDAR_NAME: &str = "Sanrio Birthdays";

/// Founding year of the company, used when a series has no release year.
pub const DEFAULT_YEAR: i32 = 1960;

pub const CHARACTER_COLUMNS: &[&str] = &["SeriesKey", "CharaName", "BirthMonth", "BirthDay"];
pub const SERIES_COLUMNS: &[&str] = &["SeriesKey", "SeriesNameJa", "ReleaseYear"];

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanrioCharacter {
    pub series_key: String,
    pub chara_name: String,
    pub species: String,
    pub birthday_note: String,
    pub birth_month: Option<u32>,
    pub birth_day: Option<u32>,
}

impl SanrioCharacter {
    pub fn from_record(r: &Record) -> CalendarResult<Self> {
        Ok(Self {
            series_key: r.string("SeriesKey"),
            chara_name: r.string("CharaName"),
            species: r.string("Species"),
            birthday_note: r.string("BirthdayNote"),
            birth_month: parse_optional(r, "BirthMonth")?,
            birth_day: parse_optional(r, "BirthDay")?,
        })
    }

    pub fn birth_date(&self) -> Option<BirthDate> {
        BirthDate::from_parts(self.birth_month, self.birth_day)
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SanrioSeries {
    pub series_key: String,
    pub name_ja: String,
    pub name_en: String,
    pub release_year: Option<i32>,
    pub release_year_note: String,
    pub parent_series_key: String,
}

impl SanrioSeries {
    pub fn from_record(r: &Record) -> CalendarResult<Self> {
        Ok(Self {
            series_key: r.string("SeriesKey"),
            name_ja: r.string("SeriesNameJa"),
            name_en: r.string("SeriesNameEn"),
            release_year: parse_optional(r, "ReleaseYear")?,
            release_year_note: r.string("ReleaseYearNote"),
            parent_series_key: r.string("ParentSeriesKey"),
        })
    }
}

type Row = Joined<SanrioCharacter, SanrioSeries>;

pub fn load_characters(path: impl AsRef<Path>, options: &LoadOptions) -> CalendarResult<Vec<SanrioCharacter>> {
    load_table(path, &options.requiring(CHARACTER_COLUMNS), SanrioCharacter::from_record)
}

pub fn load_series(path: impl AsRef<Path>, options: &LoadOptions) -> CalendarResult<Vec<SanrioSeries>> {
    load_table(path, &options.requiring(SERIES_COLUMNS), SanrioSeries::from_record)
}

/// Load both tables and build the calendar.
pub fn create_calendar(
    characters_path: impl AsRef<Path>,
    series_path: impl AsRef<Path>,
    options: &LoadOptions,
) -> CalendarResult<BirthdayCalendar> {
    let characters = load_characters(characters_path, options)?;
    let series = load_series(series_path, options)?;
    Ok(assemble(characters, &series))
}

/// Build the calendar from already-loaded rows.
pub fn assemble(characters: Vec<SanrioCharacter>, series: &[SanrioSeries]) -> BirthdayCalendar {
    let joined = left_join(
        characters,
        series,
        |c| c.series_key.clone(),
        |s| s.series_key.clone(),
    );
    let by_series = group_by(joined, |row| row.left.series_key.clone());
    tracing::debug!(series = by_series.len(), characters = by_series.total_rows(), "grouped sanrio characters");

    let mut bc = BirthdayCalendar::new(CALENDAR_NAME, DEFAULT_YEAR);
    for (_, members) in &by_series {
        add_series(&mut bc, members);
    }
    bc
}

fn add_series(bc: &mut BirthdayCalendar, members: &[Row]) {
    let Some(first) = members.first() else {
        return;
    };
    let header = series_header(first);
    let table = series_table(members);

    let dated: Vec<(BirthDate, &Row)> = members
        .iter()
        .filter_map(|row| row.left.birth_date().map(|date| (date, row)))
        .collect();
    let by_birthday = group_by(dated, |(date, _)| format!("{}-{}", date.month, date.day));

    for (_, same_day) in by_birthday {
        let Some(&(date, head)) = same_day.first() else {
            continue;
        };
        let rows: Vec<&Row> = same_day.iter().map(|(_, row)| *row).collect();

        let mut blocks: Vec<String> = Vec::new();
        let notes = rows
            .iter()
            .map(|row| row.left.birthday_note.as_str())
            .filter(|note| !note.is_empty())
            .collect::<Vec<_>>()
            .join("\n");
        if !notes.is_empty() {
            blocks.push(notes);
        }
        blocks.push(header.clone());
        if let Some(table) = &table {
            blocks.push(table.clone());
        }

        bc.add_birthday(
            entry_summary(&head.left.series_key, &rows),
            date.month,
            date.day,
            BirthdayOptions {
                anchor_year: head.right.as_ref().and_then(|s| s.release_year),
                description: Some(blocks.join("\n\n")),
            },
        );
    }
}

/// `"{key} {names}"`, or just the key when the only name is the key itself.
fn entry_summary(series_key: &str, rows: &[&Row]) -> String {
    let names = rows
        .iter()
        .map(|row| row.left.chara_name.as_str())
        .collect::<Vec<_>>()
        .join("/");
    if names == series_key {
        names
    } else {
        format!("{series_key} {names}")
    }
}

/// e.g. `ハローキティ / Hello Kitty [1974(発売)]`.
fn series_header(row: &Row) -> String {
    let series = row.right.as_ref();
    let name_ja = series
        .map(|s| s.name_ja.as_str())
        .filter(|name| !name.is_empty())
        .unwrap_or(row.left.series_key.as_str());

    let mut parts = vec![name_ja.to_owned()];
    if let Some(en) = series.map(|s| s.name_en.as_str()).filter(|en| !en.is_empty()) {
        parts.push("/".to_string());
        parts.push(en.to_owned());
    }

    let year = series
        .and_then(|s| s.release_year)
        .map(|y| y.to_string())
        .unwrap_or_else(|| "?".to_string());
    let note = series
        .map(|s| s.release_year_note.as_str())
        .filter(|note| !note.is_empty())
        .map(|note| format!("({note})"))
        .unwrap_or_default();
    parts.push(format!("[{year}{note}]"));

    parts.join(" ")
}

/// Member list with birthdays, only for series with more than one character.
fn series_table(members: &[Row]) -> Option<String> {
    if members.len() < 2 {
        return None;
    }
    Some(
        members
            .iter()
            .map(|row| {
                let c = &row.left;
                format!("{} {}", c.chara_name, format_month_day(c.birth_month, c.birth_day))
            })
            .collect::<Vec<_>>()
            .join("\n"),
    )
}
