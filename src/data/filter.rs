//! Date Range Filter Module
//! Restricts the rental frame to an inclusive calendar-date interval.

use chrono::{Datelike, NaiveDate};
use polars::prelude::*;
use serde::{Deserialize, Serialize};

use crate::data::loader::DATE_COL;

/// Days between 0001-01-01 (CE day 1) and the Unix epoch.
const EPOCH_CE_DAYS: i32 = 719_163;

/// An inclusive calendar-date interval.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateRange {
    pub start: NaiveDate,
    pub end: NaiveDate,
}

impl DateRange {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }
}

/// Rows whose date falls within `range`, both bounds inclusive.
///
/// `start <= end` is not enforced; an inverted range matches nothing and
/// yields an empty frame rather than an error.
pub fn filter_by_range(df: &DataFrame, range: &DateRange) -> PolarsResult<DataFrame> {
    let start = lit(days_from_date(range.start)).cast(DataType::Date);
    let end = lit(days_from_date(range.end)).cast(DataType::Date);

    df.clone()
        .lazy()
        .filter(col(DATE_COL).gt_eq(start).and(col(DATE_COL).lt_eq(end)))
        .collect()
}

/// Date to Polars' days-since-epoch encoding.
pub(crate) fn days_from_date(date: NaiveDate) -> i32 {
    date.num_days_from_ce() - EPOCH_CE_DAYS
}

/// Days-since-epoch back to a date.
pub(crate) fn date_from_days(days: i32) -> Option<NaiveDate> {
    days.checked_add(EPOCH_CE_DAYS)
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}
