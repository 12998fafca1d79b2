//! Birthday calendar accumulation and iCalendar output.

use std::fs;
use std::path::Path;

use chrono::NaiveDate;
use icalendar::{Calendar, Component, Event, EventLike, EventStatus};

use crate::calendar::birth_year::infer_birth_year;
use crate::error::{CalendarError, CalendarResult};

/// Optional parts of a birthday entry.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BirthdayOptions {
    /// Year the first occurrence is anchored to; the calendar default applies when `None`.
    pub anchor_year: Option<i32>,
    /// Free text, paragraphs separated by blank lines.
    pub description: Option<String>,
}

/// One recurring birthday, as added to a [`BirthdayCalendar`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayEntry {
    pub summary: String,
    pub month: u32,
    pub day: u32,
    pub anchor_year: Option<i32>,
    pub description: Option<String>,
}

/// A named collection of yearly, all-day, non-blocking birthday events.
///
/// Entries are only turned into iCalendar events when the calendar is rendered, so an impossible
/// date (e.g. April 31) is reported by [`Self::to_calendar`] and nothing gets written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BirthdayCalendar {
    name: String,
    default_year: i32,
    entries: Vec<BirthdayEntry>,
}

impl BirthdayCalendar {
    /// Create an empty calendar. `default_year` anchors entries added without a year.
    pub fn new(name: impl Into<String>, default_year: i32) -> Self {
        Self {
            name: name.into(),
            default_year,
            entries: Vec::new(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn default_year(&self) -> i32 {
        self.default_year
    }

    pub fn entries(&self) -> &[BirthdayEntry] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Append a birthday. `month` is 1-based.
    pub fn add_birthday(&mut self, summary: impl Into<String>, month: u32, day: u32, options: BirthdayOptions) {
        self.entries.push(BirthdayEntry {
            summary: summary.into(),
            month,
            day,
            anchor_year: options.anchor_year,
            description: options.description,
        });
    }

    /// Year of the first occurrence of `entry`.
    pub fn start_year(&self, entry: &BirthdayEntry) -> i32 {
        let reference = entry.anchor_year.unwrap_or(self.default_year);
        let year = infer_birth_year(entry.month, entry.day, reference);
        if year != reference {
            tracing::trace!(summary = %entry.summary, reference, year, "moved leap-day birthday");
        }
        year
    }

    /// Build the iCalendar representation of every entry, in insertion order.
    pub fn to_calendar(&self) -> CalendarResult<Calendar> {
        let mut calendar = Calendar::new();
        calendar.name(&self.name);
        for entry in &self.entries {
            calendar.push(self.to_event(entry)?);
        }
        Ok(calendar.done())
    }

    /// Render the whole calendar as iCalendar text.
    pub fn to_ics_string(&self) -> CalendarResult<String> {
        Ok(self.to_calendar()?.to_string())
    }

    /// Write the calendar to `path`, replacing any existing file.
    pub fn write_file(&self, path: impl AsRef<Path>) -> CalendarResult<()> {
        let text = self.to_ics_string()?;
        fs::write(path.as_ref(), text)?;
        tracing::info!(
            calendar = %self.name,
            events = self.entries.len(),
            path = %path.as_ref().display(),
            "wrote calendar"
        );
        Ok(())
    }

    fn to_event(&self, entry: &BirthdayEntry) -> CalendarResult<Event> {
        let year = self.start_year(entry);
        let invalid = || CalendarError::InvalidDate {
            summary: entry.summary.clone(),
            year,
            month: entry.month,
            day: entry.day,
        };
        let start = NaiveDate::from_ymd_opt(year, entry.month, entry.day).ok_or_else(invalid)?;
        let end = start.succ_opt().ok_or_else(invalid)?;

        let mut event = Event::new();
        event
            .summary(&entry.summary)
            .starts(start)
            .ends(end)
            .add_property("RRULE", "FREQ=YEARLY")
            .add_property("TRANSP", "TRANSPARENT")
            .status(EventStatus::Confirmed);
        if let Some(description) = entry.description.as_deref().filter(|d| !d.is_empty()) {
            event.description(description);
        }
        Ok(event.done())
    }
}

#[cfg(test)]
mod tests {
    use super::{BirthdayCalendar, BirthdayOptions};
    use crate::error::CalendarError;

    #[test]
    fn entries_keep_insertion_order() {
        let mut bc = BirthdayCalendar::new("Test", 1960);
        bc.add_birthday("b", 12, 24, BirthdayOptions::default());
        bc.add_birthday("a", 1, 18, BirthdayOptions::default());

        let summaries: Vec<_> = bc.entries().iter().map(|e| e.summary.as_str()).collect();
        assert_eq!(summaries, vec!["b", "a"]);
        assert_eq!(bc.len(), 2);
    }

    #[test]
    fn start_year_falls_back_to_default_and_fixes_leap_day() {
        let mut bc = BirthdayCalendar::new("Test", 1983);
        bc.add_birthday("leap", 2, 29, BirthdayOptions::default());
        bc.add_birthday(
            "anchored",
            2,
            29,
            BirthdayOptions {
                anchor_year: Some(1901),
                description: None,
            },
        );
        bc.add_birthday("plain", 11, 1, BirthdayOptions::default());

        let years: Vec<_> = bc.entries().iter().map(|e| bc.start_year(e)).collect();
        assert_eq!(years, vec![1980, 1896, 1983]);
    }

    #[test]
    fn impossible_dates_fail_at_render_time() {
        let mut bc = BirthdayCalendar::new("Test", 1974);
        bc.add_birthday("ok", 11, 1, BirthdayOptions::default());
        bc.add_birthday("bad", 4, 31, BirthdayOptions::default());
        assert_eq!(bc.len(), 2);

        match bc.to_ics_string().unwrap_err() {
            CalendarError::InvalidDate { summary, year, month, day } => {
                assert_eq!((summary.as_str(), year, month, day), ("bad", 1974, 4, 31));
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn event_properties_are_all_day_yearly_and_transparent() {
        let mut bc = BirthdayCalendar::new("Test", 1974);
        bc.add_birthday(
            "Kitty",
            12,
            31,
            BirthdayOptions {
                anchor_year: None,
                description: Some("note".to_string()),
            },
        );
        let ics = bc.to_ics_string().unwrap();

        assert!(ics.contains("BEGIN:VCALENDAR"));
        assert!(ics.contains("SUMMARY:Kitty"));
        assert!(ics.contains("DTSTART;VALUE=DATE:19741231"));
        assert!(ics.contains("DTEND;VALUE=DATE:19750101"));
        assert!(ics.contains("RRULE:FREQ=YEARLY"));
        assert!(ics.contains("TRANSP:TRANSPARENT"));
        assert!(ics.contains("STATUS:CONFIRMED"));
        assert!(ics.contains("DESCRIPTION:note"));
    }

    #[test]
    fn empty_description_is_omitted() {
        let mut bc = BirthdayCalendar::new("Test", 1974);
        bc.add_birthday(
            "Kitty",
            11,
            1,
            BirthdayOptions {
                anchor_year: None,
                description: Some(String::new()),
            },
        );
        let ics = bc.to_ics_string().unwrap();
        assert!(!ics.contains("DESCRIPTION"));
    }
}
