//! Date windows: the one-day half-open spans the migration iterates over.

use std::fmt;

use chrono::NaiveDate;

use crate::constants::DATE_FORMAT;

/// A half-open date span, `from` inclusive and `to` exclusive.
///
/// The driving loop only produces one-day windows, matching the recordings
/// API's `fromdate`/`todate` contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DateWindow {
    pub from: NaiveDate,
    pub to: NaiveDate,
}

impl DateWindow {
    /// A one-day window starting at `from`. Returns `None` at the end of
    /// the representable date range.
    pub fn single_day(from: NaiveDate) -> Option<Self> {
        from.succ_opt().map(|to| DateWindow { from, to })
    }

    /// One-day windows for every day from `start` through `end` inclusive,
    /// ascending. Empty when `start` is after `end`.
    pub fn days(start: NaiveDate, end: NaiveDate) -> impl Iterator<Item = DateWindow> {
        start
            .iter_days()
            .take_while(move |day| *day <= end)
            .filter_map(DateWindow::single_day)
    }
}

impl fmt::Display for DateWindow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} to {}",
            self.from.format(DATE_FORMAT),
            self.to.format(DATE_FORMAT)
        )
    }
}
