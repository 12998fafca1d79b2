//! Anchor-year inference for recurring birthdays.
//!
//! A yearly event needs a first occurrence. Most birthdays can start in any year, so the
//! reference year (usually a product's release year) is used as is. A February 29 birthday must
//! start in a leap year; when the reference year is not one, the nearest earlier leap year is
//! used instead.

/// Proleptic Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    year % 4 == 0 && (year % 100 != 0 || year % 400 == 0)
}

/// Returns a year in which `month`/`day` is a real date, as close as possible to
/// `reference_year` without going past it.
///
/// Only February 29 ever moves: `1995 -> 1992`, `1901 -> 1896`, `1900 -> 1896`.
pub fn infer_birth_year(month: u32, day: u32, reference_year: i32) -> i32 {
    if (month, day) != (2, 29) {
        return reference_year;
    }

    // Step back to the previous multiple of four, then by whole cycles; century years that
    // are not divisible by 400 get skipped by the re-check.
    let mut year = reference_year;
    while !is_leap_year(year) {
        let offset = year.rem_euclid(4);
        year -= if offset == 0 { 4 } else { offset };
    }
    year
}
