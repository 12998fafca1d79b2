//! `birthday-calendars` turns tab-separated character tables into iCalendar files with one
//! yearly, all-day birthday event per character (or per set of twins).
//!
//! The pipeline for every dataset is the same:
//!
//! 1. [`ingestion::load_table`] reads the character table and its related table into typed rows
//! 2. [`processing::left_join`] attaches related data, [`processing::group_by`] buckets rows
//! 3. a [`datasets`] assembler derives summaries and descriptions
//! 4. [`calendar::BirthdayCalendar`] collects entries and writes the `.ics` file
//!
//! A February 29 birthday must first occur in a leap year; [`calendar::infer_birth_year`] moves
//! the anchor year back to the nearest one when needed.
//!
//! ## Example
//!
//! ```rust
//! use birthday_calendars::calendar::{BirthdayCalendar, BirthdayOptions};
//! use birthday_calendars::processing::{group_by, left_join};
//!
//! let characters = vec![("Kiki", "LTS", 12, 24), ("Lala", "LTS", 12, 24)];
//! let series = vec![("LTS", 1975)];
//!
//! let joined = left_join(characters, &series, |c| c.1, |s| s.0);
//! let by_day = group_by(joined, |j| format!("{}-{}", j.left.2, j.left.3));
//!
//! let mut bc = BirthdayCalendar::new("Birthdays", 1960);
//! for (_, rows) in &by_day {
//!     let names: Vec<_> = rows.iter().map(|j| j.left.0).collect();
//!     let first = &rows[0];
//!     bc.add_birthday(
//!         names.join("/"),
//!         first.left.2,
//!         first.left.3,
//!         BirthdayOptions {
//!             anchor_year: first.right.map(|s| s.1),
//!             description: None,
//!         },
//!     );
//! }
//! assert_eq!(bc.entries()[0].summary, "Kiki/Lala");
//! assert!(bc.to_ics_string().unwrap().contains("DTSTART;VALUE=DATE:19751224"));
//! ```
//!
//! ## Modules
//!
//! - [`ingestion`]: TSV loading with observer reporting
//! - [`types`]: raw [`types::Record`] rows and cell parsing helpers
//! - [`processing`]: left join and group-by
//! - [`calendar`]: anchor-year inference and the calendar builder
//! - [`datasets`]: Sanrio and Sylvanian Families assemblers
//! - [`config`]: TOML run configuration
//! - [`error`]: the shared error type

pub mod calendar;
pub mod config;
pub mod datasets;
pub mod error;
pub mod ingestion;
pub mod processing;
pub mod types;

pub use error::{CalendarError, CalendarResult};
