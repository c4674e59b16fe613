//! Time window resolution for the day, week and month views.
//!
//! The week convention is Sunday-start everywhere a window or label is
//! derived. Navigation is the one place that does not normalize: paging a
//! week moves the raw reference date by seven days, so a mid-week anchor
//! stays mid-week while the derived window snaps back to Sunday.

use chrono::{Datelike, Duration, Months, NaiveDate};

use crate::models::view::{TimeWindow, ViewMode};
use crate::utils::date::{end_of_day, start_of_day};

/// The Sunday on or before the given date.
pub fn week_start(date: NaiveDate) -> NaiveDate {
    date - Duration::days(date.weekday().num_days_from_sunday() as i64)
}

/// First day of the reference date's month.
pub fn month_start(date: NaiveDate) -> NaiveDate {
    date.with_day(1).unwrap()
}

/// Last day of the reference date's month.
pub fn month_end(date: NaiveDate) -> NaiveDate {
    month_start(date) + Months::new(1) - Duration::days(1)
}

/// Resolve the inclusive visible range for a view.
///
/// Any two reference dates inside the same logical window resolve to the
/// same window.
pub fn resolve_window(mode: ViewMode, reference: NaiveDate) -> TimeWindow {
    match mode {
        ViewMode::Day => TimeWindow {
            start: start_of_day(reference),
            end: end_of_day(reference),
        },
        ViewMode::Week => {
            let first = week_start(reference);
            TimeWindow {
                start: start_of_day(first),
                end: end_of_day(first + Duration::days(6)),
            }
        }
        ViewMode::Month => TimeWindow {
            start: start_of_day(month_start(reference)),
            end: end_of_day(month_end(reference)),
        },
    }
}

/// Reference date after paging backwards.
pub fn previous_reference(mode: ViewMode, reference: NaiveDate) -> NaiveDate {
    match mode {
        ViewMode::Day => reference - Duration::days(1),
        // Raw seven-day shift; the window derivation re-normalizes to Sunday.
        ViewMode::Week => reference - Duration::days(7),
        ViewMode::Month => reference - Months::new(1),
    }
}

/// Reference date after paging forwards.
pub fn next_reference(mode: ViewMode, reference: NaiveDate) -> NaiveDate {
    match mode {
        ViewMode::Day => reference + Duration::days(1),
        ViewMode::Week => reference + Duration::days(7),
        ViewMode::Month => reference + Months::new(1),
    }
}

/// Human-readable label for the visible range, e.g. the panel header or the
/// sidebar date line.
pub fn window_label(mode: ViewMode, reference: NaiveDate) -> String {
    match mode {
        ViewMode::Day => reference.format("%A, %d %B %Y").to_string(),
        ViewMode::Week => {
            let first = week_start(reference);
            let last = first + Duration::days(6);
            format!(
                "{} - {}",
                first.format("%d %b %Y"),
                last.format("%d %b %Y")
            )
        }
        ViewMode::Month => reference.format("%B %Y").to_string(),
    }
}
