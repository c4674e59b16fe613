//! Calendar session orchestration.
//!
//! Owns the view state, the in-memory appointment list and the cached user
//! directory, and drives the store collaborator: windowed queries with
//! stale-result discard, validator-gated mutations, and the
//! re-fetch-after-mutation policy. "Now" is always passed in by the caller
//! so every decision stays deterministic under test.

use anyhow::{Context, Result};
use chrono::{Duration, NaiveDate, NaiveDateTime};

use crate::models::appointment::{Appointment, AppointmentDraft};
use crate::models::user::User;
use crate::models::view::{TimeWindow, ViewMode, ViewState};
use crate::services::schedule::status::{ordered_agenda, AgendaEntry};
use crate::services::schedule::validator::validate_draft;
use crate::services::schedule::window::{
    next_reference, previous_reference, resolve_window, window_label,
};
use crate::services::store::{AppointmentStore, StoreError};
use crate::utils::date::start_of_day;

/// Identity of a window query. A response is applied only while its key
/// still matches the session's current view and user; anything else is a
/// superseded query and is discarded.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QueryKey {
    pub mode: ViewMode,
    pub reference_date: NaiveDate,
    pub user_id: i64,
}

/// One authenticated user's calendar session.
pub struct CalendarSession<S: AppointmentStore> {
    store: S,
    user_id: i64,
    view: ViewState,
    appointments: Vec<Appointment>,
    users: Vec<User>,
}

impl<S: AppointmentStore> CalendarSession<S> {
    /// Open a session in day view on the given date. Call
    /// [`refresh`](Self::refresh) and [`refresh_users`](Self::refresh_users)
    /// to populate it.
    pub fn new(store: S, user_id: i64, today: NaiveDate) -> Self {
        Self {
            store,
            user_id,
            view: ViewState::new(ViewMode::Day, today),
            appointments: Vec::new(),
            users: Vec::new(),
        }
    }

    pub fn view(&self) -> ViewState {
        self.view
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn users(&self) -> &[User] {
        &self.users
    }

    /// The window currently on screen.
    pub fn window(&self) -> TimeWindow {
        resolve_window(self.view.mode, self.view.reference_date)
    }

    /// Header/sidebar label for the visible range.
    pub fn window_label(&self) -> String {
        window_label(self.view.mode, self.view.reference_date)
    }

    fn current_key(&self) -> QueryKey {
        QueryKey {
            mode: self.view.mode,
            reference_date: self.view.reference_date,
            user_id: self.user_id,
        }
    }

    /// Start a window query: the key that identifies it plus the window to
    /// ask the store for.
    pub fn begin_window_query(&self) -> (QueryKey, TimeWindow) {
        (self.current_key(), self.window())
    }

    /// Apply the outcome of a window query. Returns false when the result
    /// was stale (the view or user changed since the query began) and was
    /// discarded. A failed query degrades to an empty window instead of
    /// keeping appointments that no longer match the view.
    pub fn apply_window_results(
        &mut self,
        key: QueryKey,
        result: Result<Vec<Appointment>, StoreError>,
    ) -> bool {
        if key != self.current_key() {
            log::debug!("Discarding stale window query for {:?}", key);
            return false;
        }

        match result {
            Ok(appointments) => self.appointments = appointments,
            Err(err) => {
                log::warn!("Failed to load appointments: {}", err);
                self.appointments.clear();
            }
        }
        true
    }

    /// Query the store for the current window and apply the result.
    pub fn refresh(&mut self) {
        let (key, window) = self.begin_window_query();
        let result = self.store.appointments_in_window(self.user_id, &window);
        self.apply_window_results(key, result);
    }

    /// Reload the user directory; on failure the cached list is kept.
    pub fn refresh_users(&mut self) {
        match self.store.list_users() {
            Ok(users) => self.users = users,
            Err(err) => log::warn!("Failed to load users: {}", err),
        }
    }

    pub fn set_mode(&mut self, mode: ViewMode) {
        self.view.mode = mode;
        self.refresh();
    }

    pub fn set_reference_date(&mut self, date: NaiveDate) {
        self.view.reference_date = date;
        self.refresh();
    }

    /// Jump to day view for a specific date (month cell / week header click).
    pub fn go_to_day(&mut self, date: NaiveDate) {
        self.view = ViewState::new(ViewMode::Day, date);
        self.refresh();
    }

    pub fn go_previous(&mut self) {
        self.view.reference_date = previous_reference(self.view.mode, self.view.reference_date);
        self.refresh();
    }

    pub fn go_next(&mut self) {
        self.view.reference_date = next_reference(self.view.mode, self.view.reference_date);
        self.refresh();
    }

    /// Validate and create an appointment, then re-query the window so the
    /// list picks up any server-side fields. Creating from month view jumps
    /// to day view on the new appointment's date.
    pub fn create(&mut self, draft: &AppointmentDraft, now: NaiveDateTime) -> Result<Appointment> {
        let normalized = validate_draft(draft, now)?;
        let created = self
            .store
            .create(self.user_id, &normalized)
            .context("Failed to create appointment")?;

        if self.view.mode == ViewMode::Month {
            self.view = ViewState::new(ViewMode::Day, created.start.date());
        }
        self.refresh();
        Ok(created)
    }

    /// Validate and replace an existing appointment, then re-query the
    /// window. A failed store call leaves the current list untouched.
    pub fn update(
        &mut self,
        id: i64,
        draft: &AppointmentDraft,
        now: NaiveDateTime,
    ) -> Result<Appointment> {
        let normalized = validate_draft(draft, now)?;
        let updated = self
            .store
            .update(id, self.user_id, &normalized)
            .context("Failed to update appointment")?;

        if self.view.mode == ViewMode::Month {
            self.view = ViewState::new(ViewMode::Day, updated.start.date());
        }
        self.refresh();
        Ok(updated)
    }

    /// Delete an appointment and drop it from the in-memory list. No
    /// re-query: the remaining list is already correct for the window.
    pub fn delete(&mut self, id: i64) -> Result<bool> {
        let deleted = self
            .store
            .delete(id, self.user_id)
            .context("Failed to delete appointment")?;

        if deleted {
            self.appointments.retain(|appointment| appointment.id != id);
        }
        Ok(deleted)
    }

    /// Prefill for a new appointment: 09:00 on the selected date, bumped to
    /// the next half-hour boundary when that instant has already passed
    /// today. Thirty minutes long.
    pub fn default_draft(&self, now: NaiveDateTime) -> AppointmentDraft {
        let mut start = self
            .view
            .reference_date
            .and_hms_opt(9, 0, 0)
            .unwrap();
        if self.view.reference_date == now.date() && start < now {
            start = ceil_to_half_hour(now);
        }
        AppointmentDraft::new("", start, start + Duration::minutes(30))
    }

    /// Sidebar agenda for the visible window.
    pub fn agenda(&self, now: NaiveDateTime) -> Vec<AgendaEntry<'_>> {
        ordered_agenda(&self.appointments, &self.window(), now)
    }
}

/// Round up to the next half-hour boundary; an instant already on a
/// boundary is returned unchanged. Rounding past 23:30 lands on the next
/// day's midnight.
fn ceil_to_half_hour(instant: NaiveDateTime) -> NaiveDateTime {
    const HALF_HOUR_MS: i64 = 30 * 60 * 1000;

    let day_start = start_of_day(instant.date());
    let elapsed_ms = (instant - day_start).num_milliseconds();
    let ceiled = (elapsed_ms + HALF_HOUR_MS - 1) / HALF_HOUR_MS * HALF_HOUR_MS;
    day_start + Duration::milliseconds(ceiled)
}
