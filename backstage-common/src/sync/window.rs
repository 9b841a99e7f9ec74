//! Fixed date window requested on every sync
//!
//! From the first day of the previous calendar month through the last day of
//! the eleventh month ahead. The booking API returns the whole window in one
//! response, so there is no paging state to track.

use chrono::{Datelike, Duration, NaiveDate};

/// Inclusive date range sent as `from` / `to`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SyncWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl SyncWindow {
    /// Window around `today`
    pub fn around(today: NaiveDate) -> Self {
        let from = month_start(today, -1);
        // Day before the first of month +12 is the last day of month +11
        let to = month_start(today, 12) - Duration::days(1);
        Self { from, to }
    }

    pub fn from_param(&self) -> String {
        self.from.format("%Y-%m-%d").to_string()
    }

    pub fn to_param(&self) -> String {
        self.to.format("%Y-%m-%d").to_string()
    }
}

/// First day of the month `offset` months away from `date`'s month
fn month_start(date: NaiveDate, offset: i32) -> NaiveDate {
    let months = date.year() * 12 + date.month0() as i32 + offset;
    let year = months.div_euclid(12);
    let month = months.rem_euclid(12) as u32 + 1;
    NaiveDate::from_ymd_opt(year, month, 1).unwrap_or(date)
}
