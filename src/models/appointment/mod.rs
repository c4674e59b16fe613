// Appointment module
// Time-boxed appointment model shared by the views and the store boundary

use chrono::{NaiveDateTime, Weekday};

/// Declarative repeat metadata attached to an appointment.
/// Stored and round-tripped as-is; this crate never expands a recurring
/// appointment into concrete occurrences.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Recurrence {
    #[default]
    None,
    Daily {
        count: u32,
    },
    Weekly {
        count: u32,
        days: Vec<Weekday>,
    },
}

impl Recurrence {
    pub fn is_recurring(&self) -> bool {
        !matches!(self, Recurrence::None)
    }

    /// Wire token for the recurrence kind; absent means "none".
    pub fn type_token(&self) -> Option<&'static str> {
        match self {
            Recurrence::None => None,
            Recurrence::Daily { .. } => Some("daily"),
            Recurrence::Weekly { .. } => Some("weekly"),
        }
    }

    pub fn count(&self) -> Option<u32> {
        match self {
            Recurrence::None => None,
            Recurrence::Daily { count } | Recurrence::Weekly { count, .. } => Some(*count),
        }
    }

    /// Selected weekdays; non-empty only for weekly recurrence.
    pub fn days(&self) -> &[Weekday] {
        match self {
            Recurrence::Weekly { days, .. } => days,
            _ => &[],
        }
    }
}

/// A persisted appointment as held by the store.
///
/// `start`/`end` are timezone-naive local instants with `end > start`.
/// `participant_ids` is a deduplicated set; insertion order is preserved
/// because the guest list renders in the order guests were added.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Appointment {
    pub id: i64,
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub organizer_id: i64,
    pub organizer_name: String,
    pub participant_ids: Vec<i64>,
    pub recurrence: Recurrence,
}

impl Appointment {
    /// Check the model invariants.
    pub fn validate(&self) -> Result<(), String> {
        if self.title.trim().is_empty() {
            return Err("Appointment title cannot be empty".to_string());
        }
        if self.title.chars().count() > 50 {
            return Err("Appointment title is limited to 50 characters".to_string());
        }
        if self.description.chars().count() > 250 {
            return Err("Appointment description is limited to 250 characters".to_string());
        }
        if self.end <= self.start {
            return Err("Appointment end time must be after start time".to_string());
        }
        match &self.recurrence {
            Recurrence::Weekly { count, days } => {
                if days.is_empty() {
                    return Err("Weekly recurrence requires at least one day".to_string());
                }
                if *count == 0 {
                    return Err("Recurrence count must be positive".to_string());
                }
            }
            Recurrence::Daily { count } if *count == 0 => {
                return Err("Recurrence count must be positive".to_string());
            }
            _ => {}
        }
        Ok(())
    }

    /// Organizer name for display, falling back when the store omitted it.
    pub fn organizer_label(&self) -> &str {
        if self.organizer_name.is_empty() {
            "Unknown"
        } else {
            &self.organizer_name
        }
    }

    pub fn duration(&self) -> chrono::Duration {
        self.end - self.start
    }
}

/// The mutable payload shape: an appointment minus its store-assigned
/// identity and organizer. This is what the scheduling validator gates and
/// what create/update commands carry to the store.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct AppointmentDraft {
    pub title: String,
    pub description: String,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub participant_ids: Vec<i64>,
    pub recurrence: Recurrence,
}

impl AppointmentDraft {
    pub fn new(title: impl Into<String>, start: NaiveDateTime, end: NaiveDateTime) -> Self {
        Self {
            title: title.into(),
            description: String::new(),
            start,
            end,
            participant_ids: Vec::new(),
            recurrence: Recurrence::None,
        }
    }

    pub fn description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn participants(mut self, ids: Vec<i64>) -> Self {
        self.participant_ids = ids;
        self
    }

    pub fn recurrence(mut self, recurrence: Recurrence) -> Self {
        self.recurrence = recurrence;
        self
    }
}
