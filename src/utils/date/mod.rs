// Date utility functions

use chrono::{NaiveDate, NaiveDateTime};

/// Wire format for date-times exchanged with the appointment store:
/// naive local time at seconds precision, no timezone offset.
const WIRE_FORMAT: &str = "%Y-%m-%dT%H:%M:%S";

/// Fallback accepted on input only (datetime-local inputs omit seconds).
const WIRE_FORMAT_MINUTES: &str = "%Y-%m-%dT%H:%M";

pub fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_opt(0, 0, 0).unwrap()
}

/// Last representable instant of the day (23:59:59.999), matching the
/// inclusive upper bound of day/week view windows.
pub fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_hms_milli_opt(23, 59, 59, 999).unwrap()
}

pub fn is_same_day(a: NaiveDateTime, b: NaiveDateTime) -> bool {
    a.date() == b.date()
}

pub fn is_past(instant: NaiveDateTime, now: NaiveDateTime) -> bool {
    instant < now
}

pub fn format_wire_datetime(value: NaiveDateTime) -> String {
    value.format(WIRE_FORMAT).to_string()
}

pub fn parse_wire_datetime(value: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(value, WIRE_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(value, WIRE_FORMAT_MINUTES))
        .ok()
}
