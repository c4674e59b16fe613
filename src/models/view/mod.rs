// View state models
// Calendar view modes and the derived visible time window

use chrono::{NaiveDate, NaiveDateTime};

/// Calendar view modes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ViewMode {
    #[default]
    Day,
    Week,
    Month,
}

impl ViewMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ViewMode::Day => "day",
            ViewMode::Week => "week",
            ViewMode::Month => "month",
        }
    }

    pub fn from_str(value: &str) -> Option<Self> {
        match value {
            "day" => Some(ViewMode::Day),
            "week" => Some(ViewMode::Week),
            "month" => Some(ViewMode::Month),
            _ => None,
        }
    }
}

/// Client-local, ephemeral view selection. The reference date may be any
/// date inside the visible window; the window resolver normalizes it.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ViewState {
    pub mode: ViewMode,
    pub reference_date: NaiveDate,
}

impl ViewState {
    pub fn new(mode: ViewMode, reference_date: NaiveDate) -> Self {
        Self {
            mode,
            reference_date,
        }
    }
}

/// The visible range of a view: inclusive bounds, with `end` sitting at
/// 23:59:59.999 of the last visible day. Derived, never stored.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TimeWindow {
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
}

impl TimeWindow {
    pub fn contains(&self, instant: NaiveDateTime) -> bool {
        self.start <= instant && instant <= self.end
    }

    /// Inclusive interval overlap, used when filtering an appointment list
    /// against the visible window.
    pub fn overlaps(&self, start: NaiveDateTime, end: NaiveDateTime) -> bool {
        start <= self.end && end >= self.start
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn window() -> TimeWindow {
        let day = NaiveDate::from_ymd_opt(2024, 1, 15).unwrap();
        TimeWindow {
            start: day.and_hms_opt(0, 0, 0).unwrap(),
            end: day.and_hms_milli_opt(23, 59, 59, 999).unwrap(),
        }
    }

    #[test]
    fn test_mode_round_trip() {
        for mode in [ViewMode::Day, ViewMode::Week, ViewMode::Month] {
            assert_eq!(ViewMode::from_str(mode.as_str()), Some(mode));
        }
        assert_eq!(ViewMode::from_str("quarter"), None);
    }

    #[test]
    fn test_contains_is_inclusive() {
        let w = window();
        assert!(w.contains(w.start));
        assert!(w.contains(w.end));
        assert!(!w.contains(w.end + chrono::Duration::milliseconds(1)));
    }

    #[test]
    fn test_overlaps_touching_bounds() {
        let w = window();
        let before = w.start - chrono::Duration::hours(2);
        assert!(w.overlaps(before, w.start));
        assert!(!w.overlaps(before, w.start - chrono::Duration::milliseconds(1)));
    }
}
