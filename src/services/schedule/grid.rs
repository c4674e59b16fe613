//! Slot and cell grid generation for the calendar views.
//!
//! Day and week views share the same 48-slot half-hour scale; the month view
//! draws a fixed 6x7 cell matrix anchored to the Sunday on or before the
//! first of the month.

use chrono::{Datelike, Duration, NaiveDate, NaiveDateTime, NaiveTime};

use super::window::week_start;

/// Half-hour slots per day.
pub const SLOTS_PER_DAY: usize = 48;

/// Minutes covered by one slot.
pub const SLOT_MINUTES: u32 = 30;

/// Cells in the month grid (6 rows x 7 columns), independent of month
/// length or leap years.
pub const MONTH_GRID_CELLS: usize = 42;

/// One half-hour interval of the day/week time scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeSlot {
    pub hour: u32,
    pub minute: u32,
}

impl TimeSlot {
    /// Slot `i` covers hour `i / 2`, minute `(i % 2) * 30`.
    pub fn from_index(index: usize) -> Self {
        Self {
            hour: index as u32 / 2,
            minute: (index as u32 % 2) * SLOT_MINUTES,
        }
    }

    pub fn time(&self) -> NaiveTime {
        NaiveTime::from_hms_opt(self.hour, self.minute, 0).unwrap()
    }

    /// The instant this slot starts on a given date.
    pub fn instant_on(&self, date: NaiveDate) -> NaiveDateTime {
        date.and_time(self.time())
    }

    /// Label in the configured time format ("12h" renders "09:30 AM").
    pub fn label(&self, time_format: &str) -> String {
        format_time_label(self.time(), time_format)
    }
}

fn format_time_label(time: NaiveTime, time_format: &str) -> String {
    if time_format == "24h" {
        time.format("%H:%M").to_string()
    } else {
        time.format("%I:%M %p").to_string()
    }
}

/// The 48 half-hour slots covering 00:00 through 23:30.
pub fn day_slots() -> Vec<TimeSlot> {
    (0..SLOTS_PER_DAY).map(TimeSlot::from_index).collect()
}

/// Label for the synthetic trailing slot that closes the time scale.
/// Display-only; it represents 23:59 and never receives appointments.
pub fn end_of_day_label(time_format: &str) -> String {
    format_time_label(NaiveTime::from_hms_opt(23, 59, 0).unwrap(), time_format)
}

/// One cell of the month grid. Cells outside the target month are muted but
/// still rendered for context.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MonthCell {
    pub date: NaiveDate,
    pub muted: bool,
}

/// The 42-cell month grid for the reference date's month, starting at the
/// Sunday on or before the 1st.
pub fn month_grid(reference: NaiveDate) -> Vec<MonthCell> {
    let first_of_month = reference.with_day(1).unwrap();
    let grid_start = week_start(first_of_month);
    let target_month = reference.month();

    (0..MONTH_GRID_CELLS as i64)
        .map(|offset| {
            let date = grid_start + Duration::days(offset);
            MonthCell {
                date,
                muted: date.month() != target_month,
            }
        })
        .collect()
}

/// The seven header dates of the week containing the reference date.
pub fn week_dates(reference: NaiveDate) -> Vec<NaiveDate> {
    let first = week_start(reference);
    (0..7).map(|offset| first + Duration::days(offset)).collect()
}
