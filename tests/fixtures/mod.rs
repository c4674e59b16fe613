// Test fixtures - reusable test data
// Provides consistent dates, appointments and an in-memory store fake

#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::rc::Rc;

use appointment_calendar::models::appointment::{Appointment, AppointmentDraft, Recurrence};
use appointment_calendar::models::user::User;
use appointment_calendar::models::view::TimeWindow;
use appointment_calendar::services::store::{AppointmentStore, StoreError};
use chrono::{NaiveDate, NaiveDateTime};

/// Sample dates for testing
pub mod dates {
    use super::*;

    /// Monday, Jan 15 2024
    pub fn jan_15_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 15).unwrap()
    }

    /// Wednesday, Jan 17 2024 (mid-week reference)
    pub fn jan_17_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 1, 17).unwrap()
    }

    /// Feb 29 2024 (leap day)
    pub fn leap_day_2024() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 2, 29).unwrap()
    }

    pub fn at(date: NaiveDate, hour: u32, minute: u32) -> NaiveDateTime {
        date.and_hms_opt(hour, minute, 0).unwrap()
    }
}

/// Sample users for guest selection
pub fn sample_users() -> Vec<User> {
    vec![
        User {
            id: 1,
            user_name: "Alice".to_string(),
        },
        User {
            id: 2,
            user_name: "Bob".to_string(),
        },
        User {
            id: 3,
            user_name: "Carla".to_string(),
        },
    ]
}

/// A one-hour draft on the given date
pub fn hour_draft(date: NaiveDate, hour: u32, title: &str) -> AppointmentDraft {
    AppointmentDraft::new(title, dates::at(date, hour, 0), dates::at(date, hour + 1, 0))
}

/// Weekly recurring variant of [`hour_draft`]
pub fn weekly_draft(
    date: NaiveDate,
    title: &str,
    days: Vec<chrono::Weekday>,
) -> AppointmentDraft {
    hour_draft(date, 9, title).recurrence(Recurrence::Weekly { count: 4, days })
}

/// In-memory stand-in for the remote appointment store. Queries use the
/// same inclusive window overlap the REST service performs, and the failure
/// flags let tests exercise the degrade paths.
///
/// Clones share state, so a test can keep a handle after moving the store
/// into a session.
#[derive(Clone)]
pub struct InMemoryStore {
    appointments: Rc<RefCell<Vec<Appointment>>>,
    users: Vec<User>,
    next_id: Rc<Cell<i64>>,
    pub fail_queries: Rc<Cell<bool>>,
    pub fail_mutations: Rc<Cell<bool>>,
}

impl InMemoryStore {
    pub fn new() -> Self {
        Self {
            appointments: Rc::new(RefCell::new(Vec::new())),
            users: sample_users(),
            next_id: Rc::new(Cell::new(1)),
            fail_queries: Rc::new(Cell::new(false)),
            fail_mutations: Rc::new(Cell::new(false)),
        }
    }

    pub fn len(&self) -> usize {
        self.appointments.borrow().len()
    }

    fn server_error() -> StoreError {
        StoreError::Status(reqwest::StatusCode::INTERNAL_SERVER_ERROR)
    }

    fn materialize(&self, id: i64, user_id: i64, draft: &AppointmentDraft) -> Appointment {
        let organizer_name = self
            .users
            .iter()
            .find(|user| user.id == user_id)
            .map(|user| user.user_name.clone())
            .unwrap_or_default();

        Appointment {
            id,
            title: draft.title.clone(),
            description: draft.description.clone(),
            start: draft.start,
            end: draft.end,
            organizer_id: user_id,
            organizer_name,
            participant_ids: draft.participant_ids.clone(),
            recurrence: draft.recurrence.clone(),
        }
    }
}

impl AppointmentStore for InMemoryStore {
    fn appointments_in_window(
        &self,
        _user_id: i64,
        window: &TimeWindow,
    ) -> Result<Vec<Appointment>, StoreError> {
        if self.fail_queries.get() {
            return Err(Self::server_error());
        }
        Ok(self
            .appointments
            .borrow()
            .iter()
            .filter(|a| a.start <= window.end && a.end >= window.start)
            .cloned()
            .collect())
    }

    fn create(
        &self,
        user_id: i64,
        draft: &AppointmentDraft,
    ) -> Result<Appointment, StoreError> {
        if self.fail_mutations.get() {
            return Err(Self::server_error());
        }
        let id = self.next_id.get();
        self.next_id.set(id + 1);

        let appointment = self.materialize(id, user_id, draft);
        self.appointments.borrow_mut().push(appointment.clone());
        Ok(appointment)
    }

    fn update(
        &self,
        id: i64,
        user_id: i64,
        draft: &AppointmentDraft,
    ) -> Result<Appointment, StoreError> {
        if self.fail_mutations.get() {
            return Err(Self::server_error());
        }
        let mut appointments = self.appointments.borrow_mut();
        let existing = appointments
            .iter_mut()
            .find(|a| a.id == id)
            .ok_or(StoreError::Status(reqwest::StatusCode::NOT_FOUND))?;

        let replacement = Appointment {
            organizer_id: existing.organizer_id,
            organizer_name: existing.organizer_name.clone(),
            ..self.materialize(id, user_id, draft)
        };
        *existing = replacement.clone();
        Ok(replacement)
    }

    fn delete(&self, id: i64, _user_id: i64) -> Result<bool, StoreError> {
        if self.fail_mutations.get() {
            return Err(Self::server_error());
        }
        let mut appointments = self.appointments.borrow_mut();
        let before = appointments.len();
        appointments.retain(|a| a.id != id);
        if appointments.len() == before {
            return Err(StoreError::Status(reqwest::StatusCode::NOT_FOUND));
        }
        Ok(true)
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        if self.fail_queries.get() {
            return Err(Self::server_error());
        }
        Ok(self.users.clone())
    }
}
