//! Temporal status classification and agenda ordering.
//!
//! Status uses an inclusive end: an appointment reads as ongoing until the
//! instant strictly after its end. This is intentionally asymmetric with the
//! projector's half-open day overlap.

use chrono::NaiveDateTime;

use crate::models::appointment::Appointment;
use crate::models::view::TimeWindow;

/// Temporal status of an appointment relative to "now".
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppointmentStatus {
    Completed,
    Ongoing,
    Upcoming,
}

impl AppointmentStatus {
    /// Sort rank: completed first, then ongoing, then upcoming.
    pub fn rank(self) -> u8 {
        match self {
            AppointmentStatus::Completed => 0,
            AppointmentStatus::Ongoing => 1,
            AppointmentStatus::Upcoming => 2,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Ongoing => "ongoing",
            AppointmentStatus::Upcoming => "upcoming",
        }
    }
}

/// Classify an appointment against the current instant.
pub fn classify(appointment: &Appointment, now: NaiveDateTime) -> AppointmentStatus {
    if appointment.end < now {
        AppointmentStatus::Completed
    } else if appointment.start <= now && now <= appointment.end {
        AppointmentStatus::Ongoing
    } else {
        AppointmentStatus::Upcoming
    }
}

/// An appointment paired with its classification, as listed in the agenda
/// sidebar.
#[derive(Debug, Clone, PartialEq)]
pub struct AgendaEntry<'a> {
    pub appointment: &'a Appointment,
    pub status: AppointmentStatus,
}

/// Build the agenda for a window: filter with inclusive overlap, classify,
/// and order by (status rank, start). The sort is stable, so entries with
/// equal status and start keep their original relative order.
pub fn ordered_agenda<'a>(
    appointments: &'a [Appointment],
    window: &TimeWindow,
    now: NaiveDateTime,
) -> Vec<AgendaEntry<'a>> {
    let mut entries: Vec<AgendaEntry<'a>> = appointments
        .iter()
        .filter(|appointment| window.overlaps(appointment.start, appointment.end))
        .map(|appointment| AgendaEntry {
            appointment,
            status: classify(appointment, now),
        })
        .collect();

    entries.sort_by(|a, b| {
        a.status
            .rank()
            .cmp(&b.status.rank())
            .then(a.appointment.start.cmp(&b.appointment.start))
    });

    entries
}
