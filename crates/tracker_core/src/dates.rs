//! Calendar date helpers shared by validation, storage and responses.
//!
//! # Invariants
//! - Storage form is always ISO `YYYY-MM-DD`.
//! - Display form is `Www Mmm DD YYYY` rendered in UTC, e.g. `Mon Jan 15 2024`.

use chrono::{NaiveDate, Utc};

/// ISO calendar date layout used on the wire and in storage.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";
const DISPLAY_DATE_FORMAT: &str = "%a %b %d %Y";

/// Returns the current calendar date in UTC.
pub fn today_utc() -> NaiveDate {
    Utc::now().date_naive()
}

/// Renders `date` in canonical storage form.
pub fn to_iso(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Parses a canonical storage date. Returns `None` for non-dates.
pub fn parse_iso(value: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT).ok()
}

/// Renders `date` (taken as midnight UTC) in human-readable form.
pub fn to_display(date: NaiveDate) -> String {
    date.format(DISPLAY_DATE_FORMAT).to_string()
}

#[cfg(test)]
mod tests {
    use super::{parse_iso, to_display, to_iso};
    use chrono::NaiveDate;

    #[test]
    fn display_uses_weekday_month_day_year() {
        let date = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        assert_eq!(to_display(date), "Mon Jan 15 2024");

        let date = NaiveDate::from_ymd_opt(2024, 2, 29).unwrap();
        assert_eq!(to_display(date), "Thu Feb 29 2024");
    }

    #[test]
    fn display_pads_day_to_two_digits() {
        let date = NaiveDate::from_ymd_opt(2023, 7, 4).unwrap();
        assert_eq!(to_display(date), "Tue Jul 04 2023");
    }

    #[test]
    fn iso_form_is_zero_padded() {
        let date = NaiveDate::from_ymd_opt(2024, 3, 5).unwrap();
        assert_eq!(to_iso(date), "2024-03-05");
        assert_eq!(parse_iso("2024-03-05"), Some(date));
    }

    #[test]
    fn parse_iso_rejects_impossible_dates() {
        assert_eq!(parse_iso("2023-02-29"), None);
        assert_eq!(parse_iso("not-a-date"), None);
    }
}
