//! Birthday calendars.
//!
//! - [`birth_year`]: leap-year aware anchor-year inference
//! - [`builder`]: [`BirthdayCalendar`], which collects entries and renders them as iCalendar
//!
//! ```rust
//! use birthday_calendars::calendar::{BirthdayCalendar, BirthdayOptions};
//!
//! let mut bc = BirthdayCalendar::new("Birthdays", 1983);
//! bc.add_birthday("Leap", 2, 29, BirthdayOptions::default());
//!
//! let ics = bc.to_ics_string().unwrap();
//! assert!(ics.contains("DTSTART;VALUE=DATE:19800229"));
//! ```

pub mod birth_year;
pub mod builder;

pub use birth_year::{infer_birth_year, is_leap_year};
pub use builder::{BirthdayCalendar, BirthdayEntry, BirthdayOptions};
