//! Wire record mapping for the appointment store.
//!
//! The remote service's record shape is outside this crate's control, so
//! every field arrives optional. Raw records are converted into strict
//! [`Appointment`] values in one place; records that cannot be made strict
//! are skipped with a reason instead of crashing a renderer downstream.

use std::fmt;

use chrono::Weekday;
use serde::{Deserialize, Serialize};

use crate::models::appointment::{Appointment, AppointmentDraft, Recurrence};
use crate::utils::date::{format_wire_datetime, parse_wire_datetime};

/// Raw appointment record as received from the store.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct RawAppointment {
    pub id: Option<i64>,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start: Option<String>,
    pub end: Option<String>,
    pub created_by_user_id: Option<i64>,
    pub organizer_name: Option<String>,
    pub participant_ids: Option<Vec<i64>>,
    pub recurrence_type: Option<String>,
    pub recurrence_count: Option<u32>,
    pub recurrence_days: Option<Vec<String>>,
}

/// Why a raw record was dropped at the boundary.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SkipReason {
    MissingId,
    MissingStart,
    MissingEnd,
    UnparsableStart(String),
    UnparsableEnd(String),
    UnknownRecurrenceType(String),
    EmptyRecurrenceDays,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MissingId => write!(f, "record has no id"),
            SkipReason::MissingStart => write!(f, "record has no start"),
            SkipReason::MissingEnd => write!(f, "record has no end"),
            SkipReason::UnparsableStart(value) => {
                write!(f, "unparsable start '{}'", value)
            }
            SkipReason::UnparsableEnd(value) => write!(f, "unparsable end '{}'", value),
            SkipReason::UnknownRecurrenceType(value) => {
                write!(f, "unknown recurrence type '{}'", value)
            }
            SkipReason::EmptyRecurrenceDays => {
                write!(f, "weekly recurrence without days")
            }
        }
    }
}

/// Outcome of mapping one raw record.
#[derive(Debug, Clone, PartialEq)]
pub enum MappedRecord {
    Accepted(Appointment),
    Skipped(SkipReason),
}

/// Convert one raw record into a strict appointment.
pub fn map_record(raw: RawAppointment) -> MappedRecord {
    let Some(id) = raw.id else {
        return MappedRecord::Skipped(SkipReason::MissingId);
    };
    let Some(start_text) = raw.start else {
        return MappedRecord::Skipped(SkipReason::MissingStart);
    };
    let Some(end_text) = raw.end else {
        return MappedRecord::Skipped(SkipReason::MissingEnd);
    };
    let Some(start) = parse_wire_datetime(&start_text) else {
        return MappedRecord::Skipped(SkipReason::UnparsableStart(start_text));
    };
    let Some(end) = parse_wire_datetime(&end_text) else {
        return MappedRecord::Skipped(SkipReason::UnparsableEnd(end_text));
    };

    let recurrence = match map_recurrence(
        raw.recurrence_type.as_deref(),
        raw.recurrence_count,
        raw.recurrence_days.as_deref(),
    ) {
        Ok(recurrence) => recurrence,
        Err(reason) => return MappedRecord::Skipped(reason),
    };

    let mut participant_ids = Vec::new();
    for id in raw.participant_ids.unwrap_or_default() {
        if !participant_ids.contains(&id) {
            participant_ids.push(id);
        }
    }

    MappedRecord::Accepted(Appointment {
        id,
        title: raw.title.unwrap_or_default(),
        description: raw.description.unwrap_or_default(),
        start,
        end,
        organizer_id: raw.created_by_user_id.unwrap_or_default(),
        organizer_name: raw.organizer_name.unwrap_or_default(),
        participant_ids,
        recurrence,
    })
}

/// Map a batch, logging and dropping the records that could not be made
/// strict.
pub fn map_records(raw: Vec<RawAppointment>) -> Vec<Appointment> {
    raw.into_iter()
        .filter_map(|record| match map_record(record) {
            MappedRecord::Accepted(appointment) => Some(appointment),
            MappedRecord::Skipped(reason) => {
                log::warn!("Skipping appointment record: {}", reason);
                None
            }
        })
        .collect()
}

fn map_recurrence(
    kind: Option<&str>,
    count: Option<u32>,
    days: Option<&[String]>,
) -> Result<Recurrence, SkipReason> {
    let Some(kind) = kind else {
        return Ok(Recurrence::None);
    };

    match kind.to_lowercase().as_str() {
        "" | "none" => Ok(Recurrence::None),
        "daily" => Ok(Recurrence::Daily {
            count: count.unwrap_or(1).max(1),
        }),
        "weekly" => {
            let days: Vec<Weekday> = days
                .unwrap_or_default()
                .iter()
                .filter_map(|token| parse_weekday(token))
                .collect();
            if days.is_empty() {
                return Err(SkipReason::EmptyRecurrenceDays);
            }
            Ok(Recurrence::Weekly {
                count: count.unwrap_or(1).max(1),
                days,
            })
        }
        other => Err(SkipReason::UnknownRecurrenceType(other.to_string())),
    }
}

/// Wire token for a weekday, as used by the weekly day selector.
pub(crate) fn weekday_token(day: Weekday) -> &'static str {
    match day {
        Weekday::Sun => "Sun",
        Weekday::Mon => "Mon",
        Weekday::Tue => "Tue",
        Weekday::Wed => "Wed",
        Weekday::Thu => "Thu",
        Weekday::Fri => "Fri",
        Weekday::Sat => "Sat",
    }
}

fn parse_weekday(token: &str) -> Option<Weekday> {
    match token.trim().to_lowercase().as_str() {
        "sun" | "sunday" => Some(Weekday::Sun),
        "mon" | "monday" => Some(Weekday::Mon),
        "tue" | "tuesday" => Some(Weekday::Tue),
        "wed" | "wednesday" => Some(Weekday::Wed),
        "thu" | "thursday" => Some(Weekday::Thu),
        "fri" | "friday" => Some(Weekday::Fri),
        "sat" | "saturday" => Some(Weekday::Sat),
        _ => None,
    }
}

/// Outgoing create/update payload. Recurrence fields serialize as explicit
/// nulls for a non-recurring appointment, matching the store's contract.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub(crate) struct DraftPayload<'a> {
    pub title: &'a str,
    pub description: &'a str,
    pub participant_ids: &'a [i64],
    pub start: String,
    pub end: String,
    pub recurrence_type: Option<&'static str>,
    pub recurrence_count: Option<u32>,
    pub recurrence_days: Option<Vec<&'static str>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub created_by_user_id: Option<i64>,
}

impl<'a> DraftPayload<'a> {
    /// Build the wire payload; `created_by` is set on create only.
    pub fn from_draft(draft: &'a AppointmentDraft, created_by: Option<i64>) -> Self {
        let recurrence_days = match &draft.recurrence {
            Recurrence::Weekly { days, .. } => {
                Some(days.iter().map(|&day| weekday_token(day)).collect())
            }
            _ => None,
        };

        Self {
            title: &draft.title,
            description: &draft.description,
            participant_ids: &draft.participant_ids,
            start: format_wire_datetime(draft.start),
            end: format_wire_datetime(draft.end),
            recurrence_type: draft.recurrence.type_token(),
            recurrence_count: draft.recurrence.count(),
            recurrence_days,
            created_by_user_id: created_by,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{NaiveDate, NaiveDateTime};
    use pretty_assertions::assert_eq;

    fn raw(start: Option<&str>, end: Option<&str>) -> RawAppointment {
        RawAppointment {
            id: Some(10),
            title: Some("Standup".to_string()),
            description: Some("Daily check-in".to_string()),
            start: start.map(str::to_string),
            end: end.map(str::to_string),
            created_by_user_id: Some(4),
            organizer_name: Some("Dana".to_string()),
            participant_ids: Some(vec![2, 3, 2]),
            recurrence_type: None,
            recurrence_count: None,
            recurrence_days: None,
        }
    }

    fn instant(h: u32, m: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(2024, 1, 15)
            .unwrap()
            .and_hms_opt(h, m, 0)
            .unwrap()
    }

    #[test]
    fn test_maps_complete_record() {
        let mapped = map_record(raw(Some("2024-01-15T09:00:00"), Some("2024-01-15T09:30:00")));
        let MappedRecord::Accepted(appointment) = mapped else {
            panic!("expected accepted record");
        };
        assert_eq!(appointment.id, 10);
        assert_eq!(appointment.title, "Standup");
        assert_eq!(appointment.start, instant(9, 0));
        assert_eq!(appointment.end, instant(9, 30));
        assert_eq!(appointment.organizer_id, 4);
        // Participant set deduplicated, order preserved.
        assert_eq!(appointment.participant_ids, vec![2, 3]);
        assert_eq!(appointment.recurrence, Recurrence::None);
    }

    #[test]
    fn test_skips_missing_and_unparsable_dates() {
        assert_eq!(
            map_record(raw(None, Some("2024-01-15T09:30:00"))),
            MappedRecord::Skipped(SkipReason::MissingStart)
        );
        assert_eq!(
            map_record(raw(Some("2024-01-15T09:00:00"), None)),
            MappedRecord::Skipped(SkipReason::MissingEnd)
        );
        assert_eq!(
            map_record(raw(Some("soon"), Some("2024-01-15T09:30:00"))),
            MappedRecord::Skipped(SkipReason::UnparsableStart("soon".to_string()))
        );
    }

    #[test]
    fn test_skips_record_without_id() {
        let mut record = raw(Some("2024-01-15T09:00:00"), Some("2024-01-15T09:30:00"));
        record.id = None;
        assert_eq!(
            map_record(record),
            MappedRecord::Skipped(SkipReason::MissingId)
        );
    }

    #[test]
    fn test_maps_weekly_recurrence() {
        let mut record = raw(Some("2024-01-15T09:00:00"), Some("2024-01-15T09:30:00"));
        record.recurrence_type = Some("weekly".to_string());
        record.recurrence_count = Some(6);
        record.recurrence_days = Some(vec!["Mon".to_string(), "Thu".to_string()]);

        let MappedRecord::Accepted(appointment) = map_record(record) else {
            panic!("expected accepted record");
        };
        assert_eq!(
            appointment.recurrence,
            Recurrence::Weekly {
                count: 6,
                days: vec![Weekday::Mon, Weekday::Thu],
            }
        );
    }

    #[test]
    fn test_null_recurrence_type_means_none() {
        let mut record = raw(Some("2024-01-15T09:00:00"), Some("2024-01-15T09:30:00"));
        record.recurrence_type = None;
        record.recurrence_count = Some(3);

        let MappedRecord::Accepted(appointment) = map_record(record) else {
            panic!("expected accepted record");
        };
        assert_eq!(appointment.recurrence, Recurrence::None);
    }

    #[test]
    fn test_skips_unknown_recurrence_type() {
        let mut record = raw(Some("2024-01-15T09:00:00"), Some("2024-01-15T09:30:00"));
        record.recurrence_type = Some("fortnightly".to_string());
        assert_eq!(
            map_record(record),
            MappedRecord::Skipped(SkipReason::UnknownRecurrenceType(
                "fortnightly".to_string()
            ))
        );
    }

    #[test]
    fn test_skips_weekly_without_usable_days() {
        let mut record = raw(Some("2024-01-15T09:00:00"), Some("2024-01-15T09:30:00"));
        record.recurrence_type = Some("weekly".to_string());
        record.recurrence_days = Some(vec!["Noday".to_string()]);
        assert_eq!(
            map_record(record),
            MappedRecord::Skipped(SkipReason::EmptyRecurrenceDays)
        );
    }

    #[test]
    fn test_map_records_drops_bad_rows() {
        let records = vec![
            raw(Some("2024-01-15T09:00:00"), Some("2024-01-15T09:30:00")),
            raw(None, None),
            raw(Some("2024-01-15T11:00:00"), Some("2024-01-15T12:00:00")),
        ];
        let appointments = map_records(records);
        assert_eq!(appointments.len(), 2);
    }

    #[test]
    fn test_deserializes_camel_case_json() {
        let json = r#"{
            "id": 42,
            "title": "Kickoff",
            "start": "2024-01-15T09:00:00",
            "end": "2024-01-15T10:00:00",
            "createdByUserId": 7,
            "organizerName": "Priya",
            "participantIds": [1, 2],
            "recurrenceType": null,
            "recurrenceCount": null,
            "recurrenceDays": null
        }"#;
        let record: RawAppointment = serde_json::from_str(json).unwrap();
        let MappedRecord::Accepted(appointment) = map_record(record) else {
            panic!("expected accepted record");
        };
        assert_eq!(appointment.id, 42);
        assert_eq!(appointment.organizer_name, "Priya");
    }

    #[test]
    fn test_draft_payload_shape() {
        let draft = AppointmentDraft::new("Planning", instant(9, 0), instant(10, 0))
            .participants(vec![2, 5])
            .recurrence(Recurrence::Weekly {
                count: 4,
                days: vec![Weekday::Sun, Weekday::Wed],
            });

        let value =
            serde_json::to_value(DraftPayload::from_draft(&draft, Some(7))).unwrap();
        assert_eq!(value["title"], "Planning");
        assert_eq!(value["start"], "2024-01-15T09:00:00");
        assert_eq!(value["recurrenceType"], "weekly");
        assert_eq!(value["recurrenceCount"], 4);
        assert_eq!(
            value["recurrenceDays"],
            serde_json::json!(["Sun", "Wed"])
        );
        assert_eq!(value["createdByUserId"], 7);
    }

    #[test]
    fn test_draft_payload_non_recurring_serializes_nulls() {
        let draft = AppointmentDraft::new("Planning", instant(9, 0), instant(10, 0));
        let value = serde_json::to_value(DraftPayload::from_draft(&draft, None)).unwrap();
        assert!(value["recurrenceType"].is_null());
        assert!(value["recurrenceCount"].is_null());
        assert!(value["recurrenceDays"].is_null());
        assert!(value.get("createdByUserId").is_none());
    }
}
