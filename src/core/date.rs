//! Date entered through the prompts

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt::Display;

/// Earliest year accepted for a single date lookup.
pub const SINGLE_DATE_MIN_YEAR: i32 = 2018;

/// Earliest year accepted for either end of a date range.
pub const RANGE_MIN_YEAR: i32 = 1999;

/// Year, month and day as typed by the user.
///
/// Each part is only range checked on its own (month 1-12, day 1-31), so a
/// value such as 31-02-2020 is representable and is sent to the API as-is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Ord, PartialOrd, Serialize, Deserialize)]
pub struct DateComponents {
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl DateComponents {
    pub fn new(year: i32, month: u32, day: u32) -> Self {
        Self { year, month, day }
    }

    /// Returns the matching calendar date, or `None` for combinations like 31-02.
    pub fn to_naive_date(&self) -> Option<NaiveDate> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
    }

    pub fn is_calendar_date(&self) -> bool {
        self.to_naive_date().is_some()
    }
}

/// Renders as zero padded `YYYY-MM-DD`.
impl Display for DateComponents {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day)
    }
}
