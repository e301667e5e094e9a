//! Calendar date helpers
//!
//! Dates travel as `YYYY-MM-DD` strings and are stored that way, so
//! lexical order equals chronological order in SQL.

use chrono::NaiveDate;

use super::{AppError, AppResult};

pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// Parse a date string (YYYY-MM-DD)
pub fn parse_date(date: &str) -> AppResult<NaiveDate> {
    NaiveDate::parse_from_str(date.trim(), DATE_FORMAT)
        .map_err(|_| AppError::validation(format!("Invalid date format: {}", date)))
}

/// Format a date for storage
pub fn format_date(date: NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

/// Parse an optional bound, skipping empty strings
pub fn parse_optional_date(date: Option<&str>) -> AppResult<Option<NaiveDate>> {
    match date.map(str::trim).filter(|d| !d.is_empty()) {
        Some(d) => parse_date(d).map(Some),
        None => Ok(None),
    }
}

/// Every calendar day from `start` to `end`, both inclusive
///
/// Empty when `start > end`.
pub fn days_inclusive(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = NaiveDate> {
    start.iter_days().take_while(move |d| *d <= end)
}

/// Number of days in `start..=end`
pub fn span_days(start: NaiveDate, end: NaiveDate) -> i64 {
    (end - start).num_days() + 1
}

#[cfg(test)]
mod tests {
    use super::*;

    fn d(s: &str) -> NaiveDate {
        parse_date(s).unwrap()
    }

    #[test]
    fn parse_date_rejects_garbage() {
        assert!(parse_date("2024-02-30").is_err());
        assert!(parse_date("03/01/2024").is_err());
        assert_eq!(format_date(d(" 2024-03-01 ")), "2024-03-01");
    }

    #[test]
    fn optional_date_treats_blank_as_absent() {
        assert_eq!(parse_optional_date(None).unwrap(), None);
        assert_eq!(parse_optional_date(Some("  ")).unwrap(), None);
        assert_eq!(parse_optional_date(Some("2024-01-02")).unwrap(), Some(d("2024-01-02")));
        assert!(parse_optional_date(Some("yesterday")).is_err());
    }

    #[test]
    fn days_inclusive_crosses_month_and_leap_day() {
        let days: Vec<String> = days_inclusive(d("2024-02-28"), d("2024-03-01"))
            .map(format_date)
            .collect();
        assert_eq!(days, vec!["2024-02-28", "2024-02-29", "2024-03-01"]);
        assert_eq!(span_days(d("2024-02-28"), d("2024-03-01")), 3);
    }

    #[test]
    fn single_day_and_reversed_ranges() {
        assert_eq!(days_inclusive(d("2024-05-05"), d("2024-05-05")).count(), 1);
        assert_eq!(days_inclusive(d("2024-05-06"), d("2024-05-05")).count(), 0);
    }
}
