//! Timestamp and calendar-date utilities

use chrono::{DateTime, Local, NaiveDate, Utc};

/// Get current UTC timestamp
pub fn now() -> DateTime<Utc> {
    Utc::now()
}

/// Today's date on the local calendar
pub fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// Parse a `YYYY-MM-DD` date, tolerating a trailing time part (`2025-03-01T20:00:00`)
pub fn parse_date(s: &str) -> Option<NaiveDate> {
    let day = s.split('T').next().unwrap_or_default().trim();
    NaiveDate::parse_from_str(day, "%Y-%m-%d").ok()
}

/// Whole days from `today` until `date`; negative for past dates
pub fn days_until(date: &str, today: NaiveDate) -> Option<i64> {
    parse_date(date).map(|d| (d - today).num_days())
}
