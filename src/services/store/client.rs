//! REST-backed implementation of the appointment store contract.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder, Response};
use reqwest::Method;
use serde::de::DeserializeOwned;

use super::mapping::{map_record, map_records, DraftPayload, MappedRecord, RawAppointment};
use super::{AppointmentStore, StoreError};
use crate::models::appointment::{Appointment, AppointmentDraft};
use crate::models::settings::Settings;
use crate::models::user::User;
use crate::models::view::TimeWindow;
use crate::utils::date::format_wire_datetime;

/// Blocking HTTP client for the remote appointment service.
///
/// Window bounds travel as naive local date-times at seconds precision;
/// the millisecond tail of a window's end is dropped by the wire format.
pub struct RestAppointmentStore {
    client: Client,
    base_url: String,
    auth_token: Option<String>,
}

impl RestAppointmentStore {
    pub fn new(settings: &Settings) -> Result<Self, StoreError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(settings.request_timeout_secs))
            .build()?;

        Ok(Self {
            client,
            base_url: settings.api_base_url.trim_end_matches('/').to_string(),
            auth_token: settings.auth_token.clone(),
        })
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}/{}", self.base_url, path);
        let builder = self.client.request(method, url);
        match &self.auth_token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }

    fn check_status(response: Response) -> Result<Response, StoreError> {
        let status = response.status();
        if !status.is_success() {
            return Err(StoreError::Status(status));
        }
        Ok(response)
    }

    fn decode<T: DeserializeOwned>(response: Response) -> Result<T, StoreError> {
        let body = response.text()?;
        Ok(serde_json::from_str(&body)?)
    }

    /// A mutation response must map to a strict appointment; a record the
    /// mapper would skip is a malformed response, not a silent drop.
    fn accept_record(raw: RawAppointment) -> Result<Appointment, StoreError> {
        match map_record(raw) {
            MappedRecord::Accepted(appointment) => Ok(appointment),
            MappedRecord::Skipped(reason) => Err(StoreError::Record(reason)),
        }
    }
}

impl AppointmentStore for RestAppointmentStore {
    fn appointments_in_window(
        &self,
        user_id: i64,
        window: &TimeWindow,
    ) -> Result<Vec<Appointment>, StoreError> {
        let response = self
            .request(Method::GET, &format!("Appointments/{}/bydate", user_id))
            .query(&[
                ("startDate", format_wire_datetime(window.start)),
                ("endDate", format_wire_datetime(window.end)),
            ])
            .send()?;

        let raw: Vec<RawAppointment> = Self::decode(Self::check_status(response)?)?;
        Ok(map_records(raw))
    }

    fn create(
        &self,
        user_id: i64,
        draft: &AppointmentDraft,
    ) -> Result<Appointment, StoreError> {
        let response = self
            .request(Method::POST, "appointments")
            .json(&DraftPayload::from_draft(draft, Some(user_id)))
            .send()?;

        let raw: RawAppointment = Self::decode(Self::check_status(response)?)?;
        Self::accept_record(raw)
    }

    fn update(
        &self,
        id: i64,
        user_id: i64,
        draft: &AppointmentDraft,
    ) -> Result<Appointment, StoreError> {
        let response = self
            .request(Method::PUT, &format!("appointments/{}/{}", id, user_id))
            .json(&DraftPayload::from_draft(draft, None))
            .send()?;

        let raw: RawAppointment = Self::decode(Self::check_status(response)?)?;
        Self::accept_record(raw)
    }

    fn delete(&self, id: i64, user_id: i64) -> Result<bool, StoreError> {
        let response = self
            .request(Method::DELETE, &format!("appointments/{}/{}", id, user_id))
            .send()?;

        Self::check_status(response)?;
        Ok(true)
    }

    fn list_users(&self) -> Result<Vec<User>, StoreError> {
        let response = self.request(Method::GET, "users").send()?;
        Self::decode(Self::check_status(response)?)
    }
}
