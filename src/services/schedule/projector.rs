//! Appointment projection onto a single day's grid.
//!
//! Visibility uses a half-open overlap: an appointment ending exactly at the
//! start of a day, or starting exactly at its last instant, is not drawn on
//! that day. Multi-day spans are clamped to the day bounds and drawn,
//! clipped, on every day they overlap.

use chrono::{NaiveDate, NaiveDateTime, Timelike};

use crate::models::appointment::Appointment;
use crate::utils::date::{end_of_day, start_of_day};

use super::grid::SLOT_MINUTES;

/// Maximum appointments listed inside one month cell before collapsing to a
/// "+N more" indicator.
pub const MONTH_CELL_LIMIT: usize = 3;

/// An appointment positioned on one day's time grid: the clamped interval
/// plus pixel geometry relative to the top of the day column.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectedBlock<'a> {
    pub appointment: &'a Appointment,
    pub render_start: NaiveDateTime,
    pub render_end: NaiveDateTime,
    pub top_offset: f32,
    pub pixel_height: f32,
}

impl<'a> ProjectedBlock<'a> {
    /// Whether the whole appointment (not just the clamped segment) has
    /// already finished.
    pub fn is_past(&self, now: NaiveDateTime) -> bool {
        self.appointment.end < now
    }
}

/// Half-open visibility test for a day.
pub fn is_visible_on(appointment: &Appointment, day: NaiveDate) -> bool {
    appointment.end > start_of_day(day) && appointment.start < end_of_day(day)
}

/// Appointments visible on the given day, in store order.
pub fn appointments_for_day<'a>(
    appointments: &'a [Appointment],
    day: NaiveDate,
) -> Vec<&'a Appointment> {
    appointments
        .iter()
        .filter(|appointment| is_visible_on(appointment, day))
        .collect()
}

/// Project the visible appointments onto the day's time grid.
///
/// `slot_height` is the pixel height of one half-hour slot; day and week
/// views pass their respective configured heights.
pub fn project_day<'a>(
    appointments: &'a [Appointment],
    day: NaiveDate,
    slot_height: f32,
) -> Vec<ProjectedBlock<'a>> {
    let day_start = start_of_day(day);
    let day_end = end_of_day(day);

    appointments_for_day(appointments, day)
        .into_iter()
        .map(|appointment| {
            let render_start = appointment.start.max(day_start);
            let render_end = appointment.end.min(day_end);

            let start_minutes =
                (render_start.hour() * 60 + render_start.minute()) as f32;
            let top_offset = start_minutes / SLOT_MINUTES as f32 * slot_height;

            let rendered_minutes =
                (render_end - render_start).num_milliseconds() as f32 / 60_000.0;
            let pixel_height = rendered_minutes / SLOT_MINUTES as f32 * slot_height;

            ProjectedBlock {
                appointment,
                render_start,
                render_end,
                top_offset,
                pixel_height,
            }
        })
        .collect()
}

/// Summary of one month cell: at most [`MONTH_CELL_LIMIT`] appointments in
/// store order, plus the count hidden behind the "+N more" indicator.
#[derive(Debug, Clone, PartialEq)]
pub struct MonthCellAppointments<'a> {
    pub visible: Vec<&'a Appointment>,
    pub extra: usize,
}

pub fn month_cell_appointments<'a>(
    appointments: &'a [Appointment],
    day: NaiveDate,
) -> MonthCellAppointments<'a> {
    let overlapping = appointments_for_day(appointments, day);
    let extra = overlapping.len().saturating_sub(MONTH_CELL_LIMIT);
    let visible = overlapping
        .into_iter()
        .take(MONTH_CELL_LIMIT)
        .collect();

    MonthCellAppointments { visible, extra }
}
