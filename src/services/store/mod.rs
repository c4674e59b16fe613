//! Appointment store boundary.
//!
//! The remote service owns persisted appointments and users. This module
//! defines the contract the rest of the crate consumes, the typed failures
//! that can cross it, and the REST-backed implementation with its record
//! mapping.

use crate::models::appointment::{Appointment, AppointmentDraft};
use crate::models::user::User;
use crate::models::view::TimeWindow;
use thiserror::Error;

mod client;
mod mapping;

pub use client::RestAppointmentStore;
pub use mapping::{map_record, map_records, MappedRecord, RawAppointment, SkipReason};

/// Failures at the store boundary. Queries that fail degrade to an empty
/// window; mutations that fail leave prior state untouched.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("request failed: {0}")]
    Transport(#[from] reqwest::Error),
    #[error("server responded with HTTP status {0}")]
    Status(reqwest::StatusCode),
    #[error("malformed response body: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("malformed appointment record: {0}")]
    Record(SkipReason),
}

/// The appointment store contract.
///
/// Create/update/delete are atomic from the caller's perspective: the store
/// either fully succeeds or fails with a [`StoreError`].
#[cfg_attr(test, mockall::automock)]
pub trait AppointmentStore {
    /// Appointments for a user overlapping the given window.
    fn appointments_in_window(
        &self,
        user_id: i64,
        window: &TimeWindow,
    ) -> Result<Vec<Appointment>, StoreError>;

    /// Persist a new appointment; the store assigns the id.
    fn create(&self, user_id: i64, draft: &AppointmentDraft)
        -> Result<Appointment, StoreError>;

    /// Full-payload replace of an existing appointment.
    fn update(
        &self,
        id: i64,
        user_id: i64,
        draft: &AppointmentDraft,
    ) -> Result<Appointment, StoreError>;

    /// Delete an appointment; `true` on success.
    fn delete(&self, id: i64, user_id: i64) -> Result<bool, StoreError>;

    /// The user directory, used for guest selection and display.
    fn list_users(&self) -> Result<Vec<User>, StoreError>;
}
